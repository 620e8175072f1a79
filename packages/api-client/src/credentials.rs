use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alma_core::kernel::BaseCredentialStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

type Entries = BTreeMap<String, String>;

/// Credential store backed by a JSON object on disk.
///
/// A missing file reads as empty. The file is removed when the last key goes.
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Entries> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Corrupt credentials file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    async fn write(&self, entries: &Entries) -> Result<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e)
                    .with_context(|| format!("Failed to remove {}", self.path.display())),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[async_trait]
impl BaseCredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        if entries.remove(key).is_some() {
            self.write(&entries).await?;
        }
        Ok(())
    }
}
