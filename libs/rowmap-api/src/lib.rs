pub mod column;
pub mod config;
pub mod error;
pub mod record;
pub mod storage;
pub mod value;

pub use column::ColumnCodec;
pub use config::{CodecConfig, FloatFormat, UnknownTagPolicy};
pub use error::{CodecError, DecodeError, ErrorKind};
pub use record::Record;
pub use storage::{RowStore, StoreFuture};
pub use value::{ScalarKind, ScalarValue, TypedMapping};
