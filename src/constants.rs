//! Timing and naming constants
//!
//! Centralized so the session, the config layer and tests agree on defaults.

/// Trailing-edge debounce window for flushing the save queue
pub const FLUSH_DEBOUNCE_MS: u64 = 500;

/// How long a category shows "Saved" before falling back to idle
pub const SAVED_RESET_MS: u64 = 2000;

/// Source tag sent with the window double-click notification
pub const WINDOW_SOURCE_SETTINGS: &str = "settings";

/// Command channel depth between a handle and its session task
pub const SESSION_COMMAND_CAPACITY: usize = 256;

/// File names inside the platform config directory
pub const SYNC_CONFIG_FILE: &str = "settings-sync.toml";
pub const STORE_CONFIG_FILE: &str = "config.json";
pub const LOG_FILE_PREFIX: &str = "settings-sync.log";

/// Project directory triple used with `directories::ProjectDirs`
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORGANIZATION: &str = "cyenx";
pub const PROJECT_APPLICATION: &str = "settings-sync";
