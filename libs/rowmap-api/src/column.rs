use crate::error::CodecError;

/// Storage representation of one opaque-bytes column.
///
/// The row store only ever sees bytes; implementations decide how a
/// `Value` becomes bytes and back. Both directions are pure: no I/O, no
/// shared state, callable concurrently.
pub trait ColumnCodec: Send + Sync {
    type Value;

    /// Bytes to persist in the column.
    fn to_storage(&self, value: &Self::Value) -> Result<Vec<u8>, CodecError>;

    /// Rebuild a value from the column. `None` means the row (or the
    /// column value) is absent; each codec defines what that yields.
    fn from_storage(&self, bytes: Option<&[u8]>) -> Result<Self::Value, CodecError>;
}
