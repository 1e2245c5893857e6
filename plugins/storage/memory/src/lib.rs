use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;

use rowmap_api::{CodecError, RowStore, StoreFuture};

// ═══════════════════════════════════════════════════════════════
//  MemoryStoreConfig
// ═══════════════════════════════════════════════════════════════

fn default_max_rows() -> usize {
    100_000
}

#[derive(Debug, serde::Deserialize)]
pub struct MemoryStoreConfig {
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

impl MemoryStoreConfig {
    /// Parse from a JSON object; `"{}"` and blank input give defaults.
    pub fn from_json(config_json: &str) -> Result<Self, CodecError> {
        let trimmed = config_json.trim();
        if trimmed.is_empty() || trimmed == "{}" {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|e| CodecError::Config(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════
//  MemoryRowStore
// ═══════════════════════════════════════════════════════════════

#[derive(Default)]
struct Rows {
    columns: HashMap<String, Vec<u8>>,
    /// Insertion order, oldest first. Used for eviction.
    order: VecDeque<String>,
}

/// In-memory row store with a row cap. Once full, inserting evicts the
/// oldest row. For tests and for embedders without a database.
pub struct MemoryRowStore {
    rows: RwLock<Rows>,
    max_rows: usize,
}

impl MemoryRowStore {
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: RwLock::new(Rows {
                columns: HashMap::with_capacity(max_rows.min(65536)),
                order: VecDeque::with_capacity(max_rows.min(65536)),
            }),
            max_rows,
        }
    }

    pub fn from_config(config: &MemoryStoreConfig) -> Self {
        Self::new(config.max_rows)
    }
}

impl Default for MemoryRowStore {
    fn default() -> Self {
        Self::from_config(&MemoryStoreConfig::default())
    }
}

impl RowStore for MemoryRowStore {
    fn insert(&self, id: &str, column: Vec<u8>) -> StoreFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            if self.max_rows == 0 {
                return Err(CodecError::Storage("store has no capacity".into()));
            }
            let mut rows = self.rows.write().await;
            if rows.columns.contains_key(&id) {
                return Err(CodecError::Storage(format!("duplicate row id '{id}'")));
            }
            while rows.columns.len() >= self.max_rows {
                let Some(oldest) = rows.order.pop_front() else {
                    break;
                };
                rows.columns.remove(&oldest);
                tracing::debug!(id = %oldest, "evicted oldest row");
            }
            rows.order.push_back(id.clone());
            rows.columns.insert(id, column);
            Ok(())
        })
    }

    fn get(&self, id: &str) -> StoreFuture<'_, Option<Vec<u8>>> {
        let id = id.to_string();
        Box::pin(async move {
            let rows = self.rows.read().await;
            Ok(rows.columns.get(&id).cloned())
        })
    }

    fn remove(&self, id: &str) -> StoreFuture<'_, bool> {
        let id = id.to_string();
        Box::pin(async move {
            let mut rows = self.rows.write().await;
            if rows.columns.remove(&id).is_none() {
                return Ok(false);
            }
            rows.order.retain(|existing| existing != &id);
            Ok(true)
        })
    }

    fn len(&self) -> StoreFuture<'_, usize> {
        Box::pin(async move { Ok(self.rows.read().await.columns.len()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_api::ErrorKind;

    #[tokio::test]
    async fn insert_get_remove() {
        let store = MemoryRowStore::default();
        store.insert("a", b"[1]".to_vec()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.get("b").await.unwrap(), None);
        assert_eq!(store.len().await.unwrap(), 1);

        assert!(store.remove("a").await.unwrap());
        assert!(!store.remove("a").await.unwrap());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = MemoryRowStore::default();
        store.insert("a", vec![1]).await.unwrap();
        let err = store.insert("a", vec![2]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(store.get("a").await.unwrap(), Some(vec![1]));
    }

    #[tokio::test]
    async fn full_store_evicts_oldest() {
        let store = MemoryRowStore::new(2);
        store.insert("a", vec![1]).await.unwrap();
        store.insert("b", vec![2]).await.unwrap();
        store.insert("c", vec![3]).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 2);
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("c").await.unwrap(), Some(vec![3]));

        // A removed id no longer counts as oldest.
        assert!(store.remove("b").await.unwrap());
        store.insert("d", vec![4]).await.unwrap();
        store.insert("e", vec![5]).await.unwrap();
        assert_eq!(store.get("c").await.unwrap(), None);
        assert_eq!(store.get("d").await.unwrap(), Some(vec![4]));
    }

    #[tokio::test]
    async fn zero_capacity_rejects_inserts() {
        let store = MemoryRowStore::new(0);
        assert!(store.insert("a", vec![]).await.is_err());
    }

    #[test]
    fn config_from_json() {
        assert_eq!(MemoryStoreConfig::from_json("{}").unwrap().max_rows, 100_000);
        assert_eq!(MemoryStoreConfig::from_json("").unwrap().max_rows, 100_000);
        assert_eq!(
            MemoryStoreConfig::from_json(r#"{"max_rows": 3}"#).unwrap().max_rows,
            3
        );
        let err = MemoryStoreConfig::from_json(r#"{"max_rows": -1}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
