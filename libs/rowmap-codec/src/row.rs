//! Save and load one row through a [`RowStore`].

use rowmap_api::{CodecError, ColumnCodec, RowStore};

/// Encode `value` and insert it as row `id`.
///
/// An empty `id` is rejected before anything is encoded.
pub async fn save<S, C>(store: &S, codec: &C, id: &str, value: &C::Value) -> Result<(), CodecError>
where
    S: RowStore + ?Sized,
    C: ColumnCodec,
{
    require_id(id)?;
    let column = codec.to_storage(value)?;
    store
        .insert(id, column)
        .await
        .map_err(|e| e.with_context(format!("row '{id}'")))
}

/// Fetch row `id` and decode it.
///
/// A missing row goes through the codec's absent rule: an empty mapping
/// for [`TaggedMapCodec`](crate::TaggedMapCodec), an error for
/// [`TransparentCodec`](crate::TransparentCodec).
pub async fn load<S, C>(store: &S, codec: &C, id: &str) -> Result<C::Value, CodecError>
where
    S: RowStore + ?Sized,
    C: ColumnCodec,
{
    require_id(id)?;
    let column = store
        .get(id)
        .await
        .map_err(|e| e.with_context(format!("row '{id}'")))?;
    if column.is_none() {
        tracing::debug!(id, "row not found");
    }
    codec.from_storage(column.as_deref())
}

fn require_id(id: &str) -> Result<(), CodecError> {
    if id.is_empty() {
        return Err(CodecError::Precondition("row id is required".into()));
    }
    Ok(())
}
