//! Config - Configuration snapshot served by the main process

use serde::{Deserialize, Serialize};

/// Full configuration as fetched once when the settings view opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSnapshot {
    /// Schema version of the stored document
    pub version: u32,
    /// Configured servers ("servers" category)
    pub teams: Vec<Team>,
    /// Show an icon in the tray / menu bar
    pub show_tray_icon: bool,
    /// Tray icon variant (Linux)
    pub tray_icon_theme: TrayIconTheme,
    /// Keep running in the tray when the window closes
    pub minimize_to_tray: bool,
    /// Notification behaviour
    pub notifications: Notifications,
    /// Red badge on the taskbar/Dock icon for unread messages
    pub show_unread_badge: bool,
    pub use_spell_checker: bool,
    pub enable_hardware_acceleration: bool,
    /// Start the app on login
    pub autostart: bool,
    /// Whether users may add or edit servers (read-only here)
    pub enable_server_management: bool,
    /// Product name shown in labels (read-only here)
    pub app_name: String,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            version: 2,
            teams: Vec::new(),
            show_tray_icon: false,
            tray_icon_theme: TrayIconTheme::default(),
            minimize_to_tray: false,
            notifications: Notifications::default(),
            show_unread_badge: true,
            use_spell_checker: true,
            enable_hardware_acceleration: true,
            autostart: true,
            enable_server_management: true,
            app_name: "Chat".to_string(),
        }
    }
}

/// One configured server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Display name, also the identifier sent with "switch server"
    pub name: String,
    /// Server URL
    pub url: String,
    /// Position in the server list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl Team {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            order: None,
        }
    }
}

/// Tray icon color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrayIconTheme {
    #[default]
    Light,
    Dark,
}

/// How the Dock icon bounces on a new notification (macOS)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BounceIconType {
    /// Bounce once
    #[default]
    Informational,
    /// Bounce until the app is opened
    Critical,
}

/// Value stored in `flashWindow` when flashing is enabled
pub const FLASH_WINDOW_ENABLED: u8 = 2;
/// Value stored in `flashWindow` when flashing is disabled
pub const FLASH_WINDOW_DISABLED: u8 = 0;

/// Notification settings, always saved as one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notifications {
    /// 2 = flash window and taskbar icon, 0 = off
    pub flash_window: u8,
    pub bounce_icon: bool,
    pub bounce_icon_type: BounceIconType,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            flash_window: FLASH_WINDOW_DISABLED,
            bounce_icon: false,
            bounce_icon_type: BounceIconType::Informational,
        }
    }
}

impl Notifications {
    pub fn set_flash_window(&mut self, enabled: bool) {
        self.flash_window = if enabled {
            FLASH_WINDOW_ENABLED
        } else {
            FLASH_WINDOW_DISABLED
        };
    }
}
