use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Storage, StorageError};

pub type KvMap = Arc<RwLock<HashMap<String, String>>>;

/// Process-local store, used by tests and `--store :memory:` style runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: KvMap,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.read().await;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut map = self.map.write().await;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
