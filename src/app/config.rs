//! SyncConfig - Tunables for the settings session
//!
//! Loaded from `settings-sync.toml` in the platform config directory.
//! A missing or empty file means defaults.

use crate::constants::{FLUSH_DEBOUNCE_MS, SAVED_RESET_MS, SYNC_CONFIG_FILE};
use crate::domain::Platform;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use crate::states::PageOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Persisted session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Flush debounce window in milliseconds
    pub flush_debounce_ms: u64,
    /// How long "Saved" is shown, in milliseconds
    pub saved_reset_ms: u64,
    /// Override the compiled-in platform rules
    pub platform: Option<Platform>,
    /// Tray icon was visible when the app started
    pub tray_was_visible: bool,
    /// Path of the configuration document served to the view
    pub store_path: Option<PathBuf>,
    /// Write daily-rotated log files here in addition to stderr
    pub log_dir: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            flush_debounce_ms: FLUSH_DEBOUNCE_MS,
            saved_reset_ms: SAVED_RESET_MS,
            platform: None,
            tray_was_visible: false,
            store_path: None,
            log_dir: None,
            log_filter: None,
        }
    }
}

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(SYNC_CONFIG_FILE))
}

impl SyncConfig {
    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;
        Ok(config)
    }

    /// Load from the platform config directory
    pub fn try_load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Write back as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            platform: self.platform.unwrap_or_default(),
            flush_debounce: Duration::from_millis(self.flush_debounce_ms),
            saved_reset: Duration::from_millis(self.saved_reset_ms),
            tray_was_visible: self.tray_was_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_files_use_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings-sync.toml");
        assert_eq!(SyncConfig::load_from(&path).expect("missing"), SyncConfig::default());

        std::fs::write(&path, "  \n").expect("write");
        assert_eq!(SyncConfig::load_from(&path).expect("empty"), SyncConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings-sync.toml");
        std::fs::write(&path, "flush_debounce_ms = 250\nplatform = \"windows\"\n").expect("write");

        let config = SyncConfig::load_from(&path).expect("load");
        assert_eq!(config.flush_debounce_ms, 250);
        assert_eq!(config.saved_reset_ms, SAVED_RESET_MS);

        let options = config.page_options();
        assert_eq!(options.platform, Platform::Windows);
        assert_eq!(options.flush_debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings-sync.toml");
        let config = SyncConfig {
            tray_was_visible: true,
            log_filter: Some("debug".to_string()),
            ..SyncConfig::default()
        };
        config.save_to(&path).expect("save");
        assert_eq!(SyncConfig::load_from(&path).expect("load"), config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings-sync.toml");
        std::fs::write(&path, "flush_debounce_ms = \"soon\"").expect("write");
        assert!(SyncConfig::load_from(&path).is_err());
    }
}
