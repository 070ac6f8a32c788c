//! File-backed key-value store: one JSON document holding the key map.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::repository::{CardStore, KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON object on disk.
///
/// Each operation reads or rewrites the whole document. Writes are not
/// atomic and nothing locks the file between processes; concurrent writers
/// race and the last write wins, the same contract the in-memory collection
/// already has.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, treating a missing file as an empty map.
    async fn read_map(&self) -> Result<HashMap<String, Value>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(StorageError::Backend(e.to_string())),
        };
        serde_json::from_str(&contents).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn write_map(&self, map: &HashMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Backend(e.to_string()))?;
            }
        }
        let contents =
            serde_json::to_string(map).map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut map = self.read_map().await?;
        map.insert(key.to_owned(), value);
        self.write_map(&map).await
    }
}

impl CardStore {
    /// Build a `CardStore` backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStore::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonFileStore>();
    }
}
