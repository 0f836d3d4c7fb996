// File-backed implementation of the KeyValueStore port.
//
// Responsibilities
// - Keep every key in one JSON object document on disk.
// - Replace the document through a temporary sibling file so a crash never leaves it half written.
// - Reads report a malformed document. Writes move it aside to `<path>.corrupt` and start a fresh one.

use crate::shared::infrastructure::key_value_store::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::ffi::OsStr;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(OsStr::new(suffix));
        PathBuf::from(path)
    }

    async fn read_document(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.sibling(".tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(document)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = match self.read_document().await {
            Err(StoreError::Format(error)) => {
                let aside = self.sibling(".corrupt");
                tokio::fs::rename(&self.path, &aside).await?;
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    %error,
                    "key-value document is malformed, starting a fresh one"
                );
                BTreeMap::new()
            }
            other => other?,
        };
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document).await?;
        tracing::debug!(path = %self.path.display(), key, "key-value document written");
        Ok(())
    }
}
