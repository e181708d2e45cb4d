use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::StorageError;

/// Asynchronous key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Process-local store, nothing survives a restart
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys live in one JSON object on disk
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write of the file within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&data)? {
            Value::Object(map) => Ok(map),
            other => Err(StorageError::Unavailable(format!(
                "expected a JSON object in {}, found {}",
                self.path.display(),
                kind_of(&other)
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_string_pretty(&Value::Object(all))?;
        tokio::fs::write(&self.path, data).await?;

        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert!(store.get("popupState").await.unwrap().is_none());

        store.set("popupState", json!({"a": 1})).await.unwrap();
        assert_eq!(store.get("popupState").await.unwrap(), Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn file_store_creates_file_and_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = JsonFileStore::new(&path);

        assert!(store.get("popupState").await.unwrap().is_none());

        store.set("other", json!("kept")).await.unwrap();
        store.set("popupState", json!({"sourceLanguage": "fr"})).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("other").await.unwrap(), Some(json!("kept")));
        assert_eq!(
            reopened.get("popupState").await.unwrap(),
            Some(json!({"sourceLanguage": "fr"}))
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get("popupState").await,
            Err(StorageError::Unavailable(_))
        ));

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            store.get("popupState").await,
            Err(StorageError::InvalidData(_))
        ));
    }
}
