use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::StorageAdapter;
use crate::error::StorageError;

type Document = BTreeMap<String, String>;

/// Key-value storage backed by a single JSON object on disk.
///
/// Every write rewrites the whole document through a sibling temp file and a
/// rename, so a crash mid-write leaves the previous document intact. A
/// missing file reads as an empty document.
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Load the document a write will be applied to.
    ///
    /// A corrupt document is discarded so that writes keep landing; the flag
    /// reports whether that happened.
    async fn load_for_write(&self) -> Result<(Document, bool), StorageError> {
        match self.load().await {
            Ok(document) => Ok((document, false)),
            Err(StorageError::Json(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt storage document");
                Ok((Document::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn store(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl StorageAdapter for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let (mut document, _) = self.load_for_write().await?;
        document.insert(key.to_string(), value.to_string());
        self.store(&document).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let (mut document, discarded) = self.load_for_write().await?;
        if document.remove(key).is_some() || discarded {
            self.store(&document).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));

        assert_eq!(storage.get("app_theme").await.unwrap(), None);
        storage.remove("app_theme").await.unwrap();
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let storage = FileStorage::new(&path);
        storage.set("app_currency", "EUR").await.unwrap();
        storage.set("app_theme", "dark").await.unwrap();
        storage.remove("app_theme").await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("app_currency").await.unwrap().as_deref(),
            Some("EUR")
        );
        assert_eq!(reopened.get("app_theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("app_theme").await,
            Err(StorageError::Json(_))
        ));
    }

    #[tokio::test]
    async fn write_replaces_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        storage.set("favorites-storage", r#"["p1"]"#).await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("favorites-storage").await.unwrap().as_deref(),
            Some(r#"["p1"]"#)
        );
    }

    #[tokio::test]
    async fn remove_replaces_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        storage.remove("hasCompletedOnboarding").await.unwrap();

        assert_eq!(storage.get("hasCompletedOnboarding").await.unwrap(), None);
    }
}
