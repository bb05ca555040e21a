//! Config Mirror
//!
//! Local copy of the remote configuration plus UI-only flags that are
//! never persisted and must survive the initial fetch.

use crate::domain::ConfigSnapshot;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Loading status of the mirrored configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Fetch in flight, show a placeholder
    #[default]
    Loading,
    /// Snapshot received
    Loaded,
    /// Fetch failed; the view stays unusable
    Error(Arc<str>),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Mirrored configuration and transient view flags
#[derive(Debug, Clone, Default)]
pub struct ConfigMirror {
    snapshot: Option<ConfigSnapshot>,
    load_state: LoadState,
    /// Add-server sub-view is open
    show_add_team_form: bool,
    /// Tray icon was visible when the app started
    tray_was_visible: bool,
    /// `Some(false)` once the first-run policy has been applied
    first_run: Option<bool>,
}

impl ConfigMirror {
    pub fn new(tray_was_visible: bool) -> Self {
        Self {
            tray_was_visible,
            ..Self::default()
        }
    }

    // ==================== Getters ====================

    pub fn is_ready(&self) -> bool {
        self.load_state.is_loaded()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn snapshot(&self) -> Option<&ConfigSnapshot> {
        self.snapshot.as_ref()
    }

    /// Mutable snapshot for optimistic local updates
    pub fn snapshot_mut(&mut self) -> Result<&mut ConfigSnapshot> {
        self.snapshot.as_mut().ok_or_else(|| Error::Invalid {
            message: "configuration is not loaded yet".to_string(),
        })
    }

    pub fn show_add_team_form(&self) -> bool {
        self.show_add_team_form
    }

    pub fn tray_was_visible(&self) -> bool {
        self.tray_was_visible
    }

    pub fn first_run(&self) -> Option<bool> {
        self.first_run
    }

    // ==================== Setters ====================

    pub fn set_show_add_team_form(&mut self, visible: bool) {
        self.show_add_team_form = visible;
    }

    pub fn set_load_error(&mut self, message: impl Into<Arc<str>>) {
        self.load_state = LoadState::Error(message.into());
    }

    /// Merge a freshly fetched snapshot
    ///
    /// Transient flags keep their current values. With no servers and no
    /// prior first-run marker, the add-server form is forced open.
    /// Returns `true` when that happened.
    pub fn apply_fetched(&mut self, snapshot: ConfigSnapshot) -> bool {
        let forced = snapshot.teams.is_empty() && self.first_run != Some(false);
        if forced {
            self.first_run = Some(false);
            self.show_add_team_form = true;
            info!("No servers configured, opening add-server form");
        }

        self.snapshot = Some(snapshot);
        self.load_state = LoadState::Loaded;
        forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Team;

    fn snapshot_with_teams(teams: Vec<Team>) -> ConfigSnapshot {
        ConfigSnapshot {
            teams,
            ..ConfigSnapshot::default()
        }
    }

    #[test]
    fn test_not_ready_until_fetched() {
        let mut mirror = ConfigMirror::new(false);
        assert!(!mirror.is_ready());
        assert!(mirror.snapshot_mut().is_err());

        mirror.apply_fetched(ConfigSnapshot::default());
        assert!(mirror.is_ready());
        assert!(mirror.snapshot().is_some());
    }

    #[test]
    fn test_first_run_forces_add_form() {
        let mut mirror = ConfigMirror::new(false);
        let forced = mirror.apply_fetched(snapshot_with_teams(Vec::new()));

        assert!(forced);
        assert!(mirror.show_add_team_form());
        assert_eq!(mirror.first_run(), Some(false));
    }

    #[test]
    fn test_first_run_applies_once() {
        let mut mirror = ConfigMirror::new(false);
        mirror.apply_fetched(snapshot_with_teams(Vec::new()));
        mirror.set_show_add_team_form(false);

        assert!(!mirror.apply_fetched(snapshot_with_teams(Vec::new())));
        assert!(!mirror.show_add_team_form());
    }

    #[test]
    fn test_existing_servers_keep_form_closed() {
        let mut mirror = ConfigMirror::new(false);
        let forced =
            mirror.apply_fetched(snapshot_with_teams(vec![Team::new("a", "https://a.example")]));

        assert!(!forced);
        assert!(!mirror.show_add_team_form());
        assert_eq!(mirror.first_run(), None);
    }

    #[test]
    fn test_transient_flags_survive_merge() {
        let mut mirror = ConfigMirror::new(true);
        // "add server" pushed before the fetch resolved
        mirror.set_show_add_team_form(true);
        mirror.apply_fetched(snapshot_with_teams(vec![Team::new("a", "https://a.example")]));

        assert!(mirror.show_add_team_form());
        assert!(mirror.tray_was_visible());
    }

    #[test]
    fn test_load_error() {
        let mut mirror = ConfigMirror::new(false);
        mirror.set_load_error("main process unavailable");
        assert_eq!(
            mirror.load_state().error_message(),
            Some("main process unavailable")
        );
        assert!(!mirror.is_ready());
    }
}
