//! File-backed Configuration Store
//!
//! Main-process side of the settings link: the configuration lives in one
//! JSON document, and each batch is applied key by key in order, so the
//! last edit for a key wins. Keys this crate does not know are kept.
//!
//! Disk access is synchronous; async callers go through `spawn_blocking`.

use crate::constants::STORE_CONFIG_FILE;
use crate::domain::{ConfigSnapshot, EditBatch};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use crate::services::ConfigStore;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON configuration document on disk
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `config.json` in the platform config directory
    pub fn open_default() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(STORE_CONFIG_FILE);
        info!(path = ?path, "Using configuration file");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw document; missing or empty files yield the defaults
    pub fn load_document(&self) -> Result<Map<String, Value>> {
        let content = if self.path.exists() {
            fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        let value = if content.trim().is_empty() {
            serde_json::to_value(ConfigSnapshot::default())?
        } else {
            serde_json::from_str(&content)?
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Invalid {
                message: format!("{} is not a JSON object", self.path.display()),
            }),
        }
    }

    fn write_document(&self, doc: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<ConfigSnapshot> {
        let doc = self.load_document()?;
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}

impl ConfigStore for FileConfigStore {
    async fn fetch_configuration(&self) -> Result<ConfigSnapshot> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.snapshot()).await?
    }

    fn apply_edits(&self, batch: EditBatch) -> Result<()> {
        let mut doc = self.load_document()?;
        for edit in batch {
            debug!(category = %edit.category, key = %edit.key, "Applying edit");
            doc.insert(edit.key.as_str().to_string(), edit.data);
        }
        self.write_document(&doc)
    }
}
