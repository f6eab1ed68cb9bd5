//! Storage capability used to persist the selected language
//!
//! The store only ever reads and writes [`LANGUAGE_STORAGE_KEY`]. Adapters
//! may be synchronous underneath; the trait is async so both kinds fit.

use crate::error::{I18nError, I18nResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Key under which the selected language is persisted
pub const LANGUAGE_STORAGE_KEY: &str = "i18n-language";

/// Single-value key/value persistence
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> I18nResult<Option<String>>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: &str) -> I18nResult<()>;
}

/// Process-local storage, mostly for tests and servers
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with `(key, value)` pairs
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> I18nResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> I18nResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object in a file
///
/// A missing file reads as empty. Writes rewrite the whole file through a
/// temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Use `path` as the backing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> I18nResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| I18nError::ParseError {
                location: self.path.display().to_string(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(I18nError::storage(
                format!("failed to read {}", self.path.display()),
                e,
            )),
        }
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> I18nResult<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> I18nResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());

        let body = serde_json::to_string_pretty(&values)
            .map_err(|e| I18nError::storage("failed to encode storage file", e))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| I18nError::storage(format!("failed to write {}", tmp.display()), e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| I18nError::storage(format!("failed to replace {}", self.path.display()), e))?;

        debug!(path = %self.path.display(), key, "Storage value written");
        Ok(())
    }
}
