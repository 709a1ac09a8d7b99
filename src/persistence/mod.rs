//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Typed errors, so callers decide whether to fall back to defaults

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::storage::Storage;

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Storage(String),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Versioned wrapper around stored data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            version: FORMAT_VERSION,
            data,
        }
    }
}

/// Load `key` and unwrap its envelope
///
/// `Ok(None)` means nothing is stored under the key.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PersistError> {
    let Some(json) = storage.get_item(key) else {
        return Ok(None);
    };
    let envelope: Envelope<T> = serde_json::from_str(&json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistError::Version {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(Some(envelope.data))
}

/// Wrap `data` in an envelope and store it under `key`
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    data: &T,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(&Envelope::new(data))?;
    storage.set_item(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        best: u64,
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, "sample", &Sample { best: 42 }).unwrap();
        let loaded: Option<Sample> = load_json(&storage, "sample").unwrap();
        assert_eq!(loaded, Some(Sample { best: 42 }));
    }

    #[test]
    fn test_missing_key() {
        let storage = MemoryStorage::new();
        let loaded: Option<Sample> = load_json(&storage, "sample").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_version_mismatch() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("sample", r#"{"version":99,"data":{"best":1}}"#)
            .unwrap();
        let result: Result<Option<Sample>, _> = load_json(&storage, "sample");
        assert!(matches!(
            result,
            Err(PersistError::Version {
                found: 99,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_corrupt_data() {
        let mut storage = MemoryStorage::new();
        storage.set_item("sample", "garbage").unwrap();
        let result: Result<Option<Sample>, _> = load_json(&storage, "sample");
        assert!(matches!(result, Err(PersistError::Json(_))));
    }
}
