//! Key-value persistence behind the workflow services.
//!
//! The original system kept every collection as one JSON document in browser
//! local storage. This module keeps that shape: a store holds opaque JSON
//! text under a handful of fixed logical keys, and repositories load and
//! rewrite whole collections synchronously.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StoreConfig;

/// Logical record holding every registered user.
pub const USERS_KEY: &str = "becas_users";
/// Logical record holding the published funding calls.
pub const CALLS_KEY: &str = "becas_convocatorias";
/// Logical record holding all submitted applications.
pub const APPLICATIONS_KEY: &str = "becas_applications";
/// Logical record holding the current session, if any.
pub const SESSION_KEY: &str = "becas_session";

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record '{key}' holds malformed data")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage abstraction so services can run against memory in tests and a
/// JSON-file directory in a real deployment. Records are JSON text.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and deserialize a logical record, `None` when the key is absent.
pub fn load_record<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(text) => {
            let value = serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serialize and write a logical record, replacing any previous value.
pub fn save_record<S, T>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let text = serde_json::to_string(value).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &text)
}

/// Process-local store, primarily for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

/// Directory-backed store keeping one `<key>.json` file per logical record.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(Self {
            data_dir: config.data_dir.clone(),
        })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.record_path(key), value)
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_store_round_trips_records() {
        let store = MemoryStore::default();
        let sample = Sample {
            name: "beca".to_string(),
            count: 3,
        };

        save_record(&store, USERS_KEY, &sample).expect("save succeeds");
        let loaded: Option<Sample> = load_record(&store, USERS_KEY).expect("load succeeds");
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::default();
        let loaded: Option<Sample> = load_record(&store, CALLS_KEY).expect("load succeeds");
        assert!(loaded.is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStore::default();
        store.set(SESSION_KEY, "{}").expect("set succeeds");
        store.remove(SESSION_KEY).expect("first remove");
        store.remove(SESSION_KEY).expect("second remove");
        assert!(store.get(SESSION_KEY).expect("get succeeds").is_none());
    }

    #[test]
    fn corrupt_record_is_reported_not_swallowed() {
        let store = MemoryStore::default();
        store.set(USERS_KEY, "not json").expect("set succeeds");
        let result: Result<Option<Sample>, StoreError> = load_record(&store, USERS_KEY);
        match result {
            Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, USERS_KEY),
            other => panic!("expected corrupt record error, got {other:?}"),
        }
    }

    #[test]
    fn json_file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::open(&StoreConfig {
            data_dir: dir.path().to_path_buf(),
        })
        .expect("store opens");

        let sample = Sample {
            name: "archivo".to_string(),
            count: 1,
        };
        save_record(&store, APPLICATIONS_KEY, &sample).expect("save succeeds");

        let loaded: Option<Sample> =
            load_record(&store, APPLICATIONS_KEY).expect("load succeeds");
        assert_eq!(loaded, Some(sample));

        store.remove(APPLICATIONS_KEY).expect("remove succeeds");
        assert!(store
            .get(APPLICATIONS_KEY)
            .expect("get succeeds")
            .is_none());
    }
}
