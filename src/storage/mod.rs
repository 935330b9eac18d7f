//! Asynchronous key-value storage boundary.
//!
//! Stores persist through a [`StorageAdapter`] injected at construction. The
//! adapter owns nothing but strings; encoding is the store's concern.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::error::StorageError;

/// Device-local key-value storage.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
