use crate::domain::chart::{ChartState, ChartStateRepository, STORAGE_KEY, decode_value, encode_state};
use crate::domain::errors::{StorageError, StorageResult};
use gloo::storage::{LocalStorage, Storage, errors::StorageError as GlooStorageError};

/// Chart state kept in `window.localStorage` under a single key
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    key: String,
}

impl Default for LocalStorageRepository {
    fn default() -> Self {
        Self::new(STORAGE_KEY)
    }
}

impl LocalStorageRepository {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

impl ChartStateRepository for LocalStorageRepository {
    fn load(&self) -> StorageResult<Option<ChartState>> {
        match LocalStorage::get::<serde_json::Value>(&self.key) {
            Ok(value) => decode_value(value).map(Some),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(GlooStorageError::SerdeError(e)) => Err(StorageError::Serialization(e.to_string())),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    fn save(&self, state: &ChartState) -> StorageResult<()> {
        let envelope = encode_state(state)?;
        LocalStorage::set(&self.key, envelope).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}
