use super::ChartState;
use crate::domain::errors::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

pub const STORAGE_KEY: &str = "kpi-chart-storage";
pub const STORAGE_VERSION: u32 = 1;

/// Envelope written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedChartState {
    pub state: ChartState,
    pub version: u32,
}

#[derive(Serialize)]
struct PersistedChartStateRef<'a> {
    state: &'a ChartState,
    version: u32,
}

/// Serializes the state inside a versioned envelope.
pub fn encode_state(state: &ChartState) -> StorageResult<serde_json::Value> {
    serde_json::to_value(PersistedChartStateRef { state, version: STORAGE_VERSION })
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Reads a versioned envelope.
///
/// The version is checked before the payload so a stale layout is reported as
/// a mismatch rather than as a decoding failure.
pub fn decode_value(value: serde_json::Value) -> StorageResult<ChartState> {
    let found = value
        .get("version")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| StorageError::Serialization("missing version".to_string()))?;
    if found != STORAGE_VERSION as u64 {
        return Err(StorageError::VersionMismatch {
            found: found as u32,
            expected: STORAGE_VERSION,
        });
    }
    let persisted: PersistedChartState =
        serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(persisted.state)
}

pub fn decode_state(raw: &str) -> StorageResult<ChartState> {
    let value = serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    decode_value(value)
}

/// Durable storage of the chart state.
pub trait ChartStateRepository {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> StorageResult<Option<ChartState>>;
    fn save(&self, state: &ChartState) -> StorageResult<()>;
}

/// Repository keeping the encoded envelope in memory.
///
/// Clones share the same slot, so a test can reopen a store over the data a
/// previous store wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChartStateRepository {
    slot: Rc<RefCell<Option<String>>>,
}

impl InMemoryChartStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(raw.into()))) }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ChartStateRepository for InMemoryChartStateRepository {
    fn load(&self) -> StorageResult<Option<ChartState>> {
        match self.slot.borrow().as_deref() {
            Some(raw) => decode_state(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ChartState) -> StorageResult<()> {
        let value = encode_state(state)?;
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_checked_first() {
        let err = decode_state(r#"{"state":{"thresholds":"garbage"},"version":0}"#).unwrap_err();
        assert_eq!(err, StorageError::VersionMismatch { found: 0, expected: 1 });
    }

    #[test]
    fn unparsable_payload_is_a_serialization_error() {
        assert!(matches!(decode_state("not json"), Err(StorageError::Serialization(_))));
    }
}
