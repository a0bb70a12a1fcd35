//! Key-value blob storage.
//!
//! State is persisted as opaque string blobs addressed by key. The file-backed
//! store keeps one `<key>.json` file per key in the application data
//! directory; the memory store backs tests and throwaway runs.

use crate::libs::data_storage::DataStorage;
use anyhow::{bail, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;

pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    storage: DataStorage,
}

impl FileBlobStore {
    pub fn new() -> Self {
        Self::with_storage(DataStorage::new())
    }

    pub fn with_storage(storage: DataStorage) -> Self {
        FileBlobStore { storage }
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        self.storage.get_path(&format!("{}.json", key))
    }
}

impl Default for FileBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        match fs::read_to_string(&path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.path(key)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail until switched back off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("write to '{}' rejected", key);
        }
        self.blobs.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.blobs.lock().remove(key);
        Ok(())
    }
}
