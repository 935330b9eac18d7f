//! Persistence plumbing shared by the persisted stores.
//!
//! - [`Persister`] queues writes to a background task that applies them in
//!   issue order; callers never wait on it.
//! - [`Slot`] is one named storage key with the failure policy baked in:
//!   unreadable or unparsable values read as absent, failed writes are logged
//!   and dropped.
//! - [`Readiness`] reports whether a store has finished rehydrating.

mod readiness;
mod writer;

pub use readiness::Readiness;
pub use writer::Persister;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::storage::StorageAdapter;

/// A storage adapter paired with the writer task that persists into it.
#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn StorageAdapter>,
    persister: Persister,
}

impl Persistence {
    /// Spawn a writer task for `storage`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        let persister = Persister::spawn(Arc::clone(&storage));
        Self { storage, persister }
    }

    /// A handle to the slot stored under `key`.
    pub fn slot(&self, key: impl Into<String>) -> Slot {
        Slot {
            key: key.into(),
            storage: Arc::clone(&self.storage),
            persister: self.persister.clone(),
        }
    }

    /// Wait until every write issued so far has been attempted.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }
}

/// One named storage key.
#[derive(Clone)]
pub struct Slot {
    key: String,
    storage: Arc<dyn StorageAdapter>,
    persister: Persister,
}

impl Slot {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the raw stored string. Read failures are logged and read as absent.
    pub async fn load_raw(&self) -> Option<String> {
        match self.storage.get(&self.key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read persisted state");
                None
            }
        }
    }

    /// Read and decode a JSON value. Malformed payloads read as absent.
    pub async fn load_json<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.load_raw().await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring malformed persisted state");
                None
            }
        }
    }

    /// Queue a raw write.
    pub fn save_raw(&self, value: impl Into<String>) {
        self.persister.set(self.key.clone(), value.into());
    }

    /// Queue a JSON-encoded write.
    pub fn save_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(encoded) => self.save_raw(encoded),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to encode state, write dropped");
            }
        }
    }

    /// Queue removal of the key.
    pub fn clear(&self) {
        self.persister.remove(self.key.clone());
    }

    /// Wait until every write issued so far has been attempted.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }
}

/// A store whose state survives restarts.
#[async_trait]
pub trait Persisted: Send + Sync {
    /// Load persisted state into the store and mark it ready.
    ///
    /// Never fails: storage problems leave defaults in place.
    async fn hydrate(&self);

    /// Readiness flag flipped when [`Persisted::hydrate`] completes.
    fn readiness(&self) -> &Readiness;

    fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }
}
