use std::fmt;
use std::marker::PhantomData;

use rowmap_api::{CodecError, ColumnCodec, DecodeError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Pass-through codec for a fixed-schema payload.
///
/// The payload's shape is known on both sides, so plain JSON keeps it
/// intact: no tags, no records.
pub struct TransparentCodec<T> {
    _payload: PhantomData<fn() -> T>,
}

impl<T> TransparentCodec<T> {
    pub const fn new() -> Self {
        Self {
            _payload: PhantomData,
        }
    }
}

impl<T> Default for TransparentCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TransparentCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TransparentCodec<T> {}

impl<T> fmt::Debug for TransparentCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransparentCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> TransparentCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::Encode)
    }

    /// Parse failures and schema mismatches are both `Malformed`.
    pub fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(bytes).map_err(DecodeError::Malformed)?)
    }
}

impl<T> ColumnCodec for TransparentCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn to_storage(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.encode(value)
    }

    /// A fixed-schema payload has no empty value: absent is an error.
    fn from_storage(&self, bytes: Option<&[u8]>) -> Result<T, CodecError> {
        let bytes = bytes.ok_or(DecodeError::Absent)?;
        self.decode(bytes)
    }
}
