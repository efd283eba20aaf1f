//! Shared test doubles
//!
//! The production codec is an external library and the remote service
//! is a network endpoint, so the test suites run against these fakes:
//! a JSON codec, an in-memory keyed store, and a canned remote source.

use crate::codec::{CodecError, MiiCodec};
use crate::record::{CharacterRecord, FieldId};
use crate::remote::{RemoteError, RemoteSource};
use crate::state::library::{MiiStore, StoreError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Codec that serializes records as JSON. Validation checks the same
/// field bounds the authored schemas use, and can be forced to fail to
/// exercise the commit gate.
pub(crate) struct JsonCodec {
    reject_validation: AtomicBool,
}

impl JsonCodec {
    pub(crate) fn new() -> Self {
        JsonCodec {
            reject_validation: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_reject_validation(&self, reject: bool) {
        self.reject_validation.store(reject, Ordering::SeqCst);
    }
}

impl MiiCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<CharacterRecord, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode(&self, record: &CharacterRecord) -> Vec<u8> {
        serde_json::to_vec(record).expect("record serialization cannot fail")
    }

    fn validate(&self, record: &CharacterRecord) -> Result<(), CodecError> {
        if self.reject_validation.load(Ordering::SeqCst) {
            return Err(CodecError::Validation("forced validation failure".into()));
        }

        let bounds = [
            (FieldId::FavoriteColor, 0, 11),
            (FieldId::SkinColor, 0, 5),
            (FieldId::HairColor, 0, 7),
            (FieldId::EyeColor, 0, 5),
            (FieldId::GlassesType, 0, 7),
            (FieldId::GlassesColor, 0, 5),
            (FieldId::GlassesYPosition, 3, 18),
            (FieldId::GlassesScale, 0, 8),
        ];
        for (field, min, max) in bounds {
            let value = record.get(field);
            if !(min..=max).contains(&value) {
                return Err(CodecError::Validation(format!(
                    "{field:?} = {value} outside [{min}, {max}]"
                )));
            }
        }
        Ok(())
    }
}

/// Encode a record the way the workflow stores it: codec bytes as base64 text
pub(crate) fn encode_record(codec: &JsonCodec, record: &CharacterRecord) -> String {
    BASE64.encode(codec.encode(record))
}

/// In-memory keyed store with deterministic (sorted) enumeration order
pub(crate) struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub(crate) fn seeded(pairs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.lock().unwrap();
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        }
        store
    }
}

#[async_trait]
impl MiiStore for MemoryStore {
    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Remote source answering with canned responses; `Err` payloads are
/// the body text a real non-success response would carry.
pub(crate) struct StubRemote {
    pub(crate) account: Result<String, String>,
    pub(crate) random: Result<String, String>,
}

impl StubRemote {
    /// For tests that never touch the remote
    pub(crate) fn unused() -> Self {
        StubRemote {
            account: Err("unused stub".to_string()),
            random: Err("unused stub".to_string()),
        }
    }
}

#[async_trait]
impl RemoteSource for StubRemote {
    async fn fetch_by_account(&self, _account: &str) -> Result<String, RemoteError> {
        self.account.clone().map_err(RemoteError::Fetch)
    }

    async fn fetch_random(&self) -> Result<String, RemoteError> {
        self.random.clone().map_err(RemoteError::Fetch)
    }
}
