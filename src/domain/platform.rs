//! Platform - host operating system as seen by option handlers

use serde::{Deserialize, Serialize};

/// Desktop platform the settings view runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    pub fn is_macos(self) -> bool {
        self == Platform::MacOs
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            platform: Platform,
        }

        let parsed: Wrapper = toml::from_str("platform = \"macos\"").expect("parse");
        assert_eq!(parsed.platform, Platform::MacOs);
        assert_eq!(Platform::Linux.to_string(), "linux");
    }
}
