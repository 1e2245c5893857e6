//! Column codecs for heterogeneous key/value mappings.
//!
//! - [`TaggedMapCodec`]: `TypedMapping ↔ bytes`, every value keeps its
//!   exact kind and width.
//! - [`TransparentCodec`]: `T ↔ bytes` for fixed-schema payloads.
//! - [`row`]: save/load helpers on top of a `RowStore`.

pub mod canonical;
pub mod row;
pub mod tagged;
pub mod transparent;

pub use tagged::TaggedMapCodec;
pub use transparent::TransparentCodec;

pub use rowmap_api::{
    CodecConfig, CodecError, ColumnCodec, DecodeError, ErrorKind, FloatFormat, RowStore,
    ScalarKind, ScalarValue, TypedMapping, UnknownTagPolicy,
};
