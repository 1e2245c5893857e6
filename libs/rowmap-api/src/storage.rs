use std::future::Future;
use std::pin::Pin;

use crate::error::CodecError;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CodecError>> + Send + 'a>>;

/// Row store: keeps one encoded column per row id.
///
/// Connection and transaction handling belong to the implementation;
/// the codecs never talk to a store directly.
pub trait RowStore: Send + Sync {
    /// Insert a new row. An id that already exists is a storage error.
    fn insert(&self, id: &str, column: Vec<u8>) -> StoreFuture<'_, ()>;

    /// Column bytes of a row, `None` if there is no such row.
    fn get(&self, id: &str) -> StoreFuture<'_, Option<Vec<u8>>>;

    /// Delete a row. Returns whether it existed.
    fn remove(&self, id: &str) -> StoreFuture<'_, bool>;

    /// Number of stored rows.
    fn len(&self) -> StoreFuture<'_, usize>;
}
