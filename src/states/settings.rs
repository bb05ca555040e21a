//! Settings Page
//!
//! Controller for one open settings view. Owns the config mirror, the save
//! queue with its flush debounce, and the saving indicators. Every handler
//! takes the new value explicitly, updates the mirror optimistically and
//! queues one edit.

use crate::constants::{FLUSH_DEBOUNCE_MS, SAVED_RESET_MS, WINDOW_SOURCE_SETTINGS};
use crate::domain::{
    BounceIconType, Category, ConfigSnapshot, Notifications, PendingEdit, PerCategory, Platform,
    SettingKey, Team, TrayIconTheme,
};
use crate::error::{Error, Result};
use crate::helpers::Debouncer;
use crate::services::{ConfigStore, HostShell};
use crate::states::{
    ConfigMirror, LoadState, SaveQueue, SavingIndicator, SavingState, SavingTransition,
    SettingsEvent,
};
use crossbeam_channel::Sender;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Per-view tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Platform-specific option rules
    pub platform: Platform,
    /// Trailing-edge window before the queue is flushed
    pub flush_debounce: Duration,
    /// How long "Saved" stays up
    pub saved_reset: Duration,
    /// Tray icon was visible at app start
    pub tray_was_visible: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            flush_debounce: Duration::from_millis(FLUSH_DEBOUNCE_MS),
            saved_reset: Duration::from_millis(SAVED_RESET_MS),
            tray_was_visible: false,
        }
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub load_state: LoadState,
    pub snapshot: Option<ConfigSnapshot>,
    pub show_add_team_form: bool,
    pub tray_was_visible: bool,
    pub saving: PerCategory<SavingState>,
    pub save_errors: PerCategory<Option<Arc<str>>>,
    pub pending_edits: usize,
}

/// One settings view
pub struct SettingsPage<S, H> {
    store: S,
    host: H,
    platform: Platform,
    mirror: ConfigMirror,
    queue: SaveQueue,
    flush_timer: Debouncer,
    indicator: SavingIndicator,
    events: Sender<SettingsEvent>,
}

impl<S: ConfigStore, H: HostShell> SettingsPage<S, H> {
    pub fn new(store: S, host: H, options: PageOptions, events: Sender<SettingsEvent>) -> Self {
        Self {
            store,
            host,
            platform: options.platform,
            mirror: ConfigMirror::new(options.tray_was_visible),
            queue: SaveQueue::new(),
            flush_timer: Debouncer::new(options.flush_debounce),
            indicator: SavingIndicator::new(options.saved_reset),
            events,
        }
    }

    // ==================== Getters ====================

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mirror(&self) -> &ConfigMirror {
        &self.mirror
    }

    pub fn queue(&self) -> &SaveQueue {
        &self.queue
    }

    pub fn saving_state(&self, category: Category) -> SavingState {
        self.indicator.state(category)
    }

    pub fn save_error(&self, category: Category) -> Option<&str> {
        self.indicator.error(category)
    }

    pub fn view(&self) -> PageView {
        PageView {
            load_state: self.mirror.load_state().clone(),
            snapshot: self.mirror.snapshot().cloned(),
            show_add_team_form: self.mirror.show_add_team_form(),
            tray_was_visible: self.mirror.tray_was_visible(),
            saving: self.indicator.states(),
            save_errors: PerCategory::from_fn(|c| self.indicator.error(c).map(Arc::from)),
            pending_edits: self.queue.len(),
        }
    }

    fn emit(&self, event: SettingsEvent) {
        let _ = self.events.send(event);
    }

    fn emit_transitions(&self, transitions: Vec<SavingTransition>) {
        for SavingTransition { category, state } in transitions {
            debug!(%category, ?state, "Saving state changed");
            self.emit(SettingsEvent::SavingStateChanged { category, state });
        }
    }

    // ==================== Loading ====================

    /// Merge the fetched configuration and leave the loading state
    pub fn apply_configuration(&mut self, snapshot: ConfigSnapshot) {
        info!(servers = snapshot.teams.len(), "Configuration loaded");
        let add_form_forced = self.mirror.apply_fetched(snapshot);
        self.emit(SettingsEvent::Ready { add_form_forced });
        if add_form_forced {
            self.emit(SettingsEvent::AddTeamFormVisibility { visible: true });
        }
    }

    /// Record a failed fetch; the view stays on its placeholder
    pub fn load_failed(&mut self, err: &Error) {
        error!(error = %err, "Failed to load configuration");
        let message: Arc<str> = err.to_string().into();
        self.mirror.set_load_error(message.clone());
        self.emit(SettingsEvent::LoadFailed { message });
    }

    // ==================== Save Queue ====================

    /// Queue an edit under the key's own category
    pub fn save_setting(&mut self, key: SettingKey, data: Value) {
        self.enqueue(key.category(), key, data);
    }

    /// Append an edit, refresh indicators and (re)arm the flush debounce
    pub fn enqueue(&mut self, category: Category, key: SettingKey, data: Value) {
        let now = Instant::now();
        debug!(%category, %key, "Queueing setting edit");

        self.queue.push(PendingEdit::new(category, key, data));
        self.indicator.clear_error(category);
        self.update_save_state(now);
        self.flush_timer.trigger(now);
    }

    fn update_save_state(&mut self, now: Instant) {
        let counts = self.queue.counts();
        let transitions = self.indicator.recompute(&counts, now);
        self.emit_transitions(transitions);
    }

    /// Drain the whole queue and send it as one batch
    fn flush_at(&mut self, now: Instant) {
        let batch = self.queue.drain();

        if !batch.is_empty() {
            let mut categories: Vec<Category> = batch.iter().map(|e| e.category).collect();
            categories.sort();
            categories.dedup();
            let edits = batch.len();

            match self.store.apply_edits(batch) {
                Ok(()) => {
                    debug!(edits, "Flushed save queue");
                    self.emit(SettingsEvent::BatchSent { edits });
                }
                Err(e) => {
                    warn!(error = %e, edits, "Failed to send settings batch");
                    let message: Arc<str> = e.to_string().into();
                    for category in &categories {
                        self.indicator.set_error(*category, message.clone());
                    }
                    self.emit(SettingsEvent::SaveFailed {
                        categories,
                        message,
                    });
                }
            }
        }

        self.update_save_state(now);
    }

    /// Flush immediately, dropping any pending debounce
    pub fn flush_now(&mut self) {
        self.flush_timer.cancel();
        self.flush_at(Instant::now());
    }

    pub fn has_pending_flush(&self) -> bool {
        self.flush_timer.is_pending()
    }

    /// Run whichever timers have elapsed by `now`
    pub fn poll_timers(&mut self, now: Instant) {
        if self.flush_timer.fire_if_due(now) {
            self.flush_at(now);
        }
        let transitions = self.indicator.fire_resets(now);
        self.emit_transitions(transitions);
    }

    /// Earliest timer deadline, if any timer is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.flush_timer.deadline(), self.indicator.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Reject edits to settings the current install has locked
    ///
    /// The server list is read-only unless `enableServerManagement` is set.
    /// Minimize-to-tray can only change if the tray icon was visible at
    /// startup.
    fn ensure_editable(&self, key: SettingKey) -> Result<()> {
        match key {
            SettingKey::Teams
                if self
                    .mirror
                    .snapshot()
                    .is_some_and(|s| !s.enable_server_management) =>
            {
                Err(Error::Invalid {
                    message: "server management is disabled".to_string(),
                })
            }
            SettingKey::MinimizeToTray if !self.mirror.tray_was_visible() => Err(Error::Invalid {
                message: "minimize to tray takes effect after restarting with the tray icon shown"
                    .to_string(),
            }),
            _ => Ok(()),
        }
    }

    // ==================== Servers ====================

    /// Replace the whole server list
    ///
    /// Closes the add-server form, or reopens it when the list became empty.
    pub fn handle_teams_change(&mut self, teams: Vec<Team>) -> Result<()> {
        self.ensure_editable(SettingKey::Teams)?;
        let data = serde_json::to_value(&teams)?;
        let empty = teams.is_empty();
        self.mirror.snapshot_mut()?.teams = teams;
        self.save_setting(SettingKey::Teams, data);
        self.set_add_team_form_visibility(empty);
        Ok(())
    }

    pub fn update_team(&mut self, index: usize, team: Team) -> Result<()> {
        self.ensure_editable(SettingKey::Teams)?;
        let snapshot = self.mirror.snapshot_mut()?;
        let Some(slot) = snapshot.teams.get_mut(index) else {
            return Err(Error::Invalid {
                message: format!("No server at index {index}"),
            });
        };
        *slot = team;
        let data = serde_json::to_value(&snapshot.teams)?;
        self.save_setting(SettingKey::Teams, data);
        Ok(())
    }

    pub fn add_server(&mut self, team: Team) -> Result<()> {
        self.ensure_editable(SettingKey::Teams)?;
        let snapshot = self.mirror.snapshot_mut()?;
        snapshot.teams.push(team);
        let data = serde_json::to_value(&snapshot.teams)?;
        self.save_setting(SettingKey::Teams, data);
        Ok(())
    }

    /// Switch the main window to a server and ask for this view to close
    pub fn select_team(&mut self, name: &str) -> Result<()> {
        self.host.switch_server(name)?;
        self.emit(SettingsEvent::CloseRequested);
        Ok(())
    }

    // ==================== Add-Server Form ====================

    pub fn toggle_add_team_form(&mut self) {
        let visible = !self.mirror.show_add_team_form();
        self.set_add_team_form_visibility(visible);
    }

    pub fn set_add_team_form_visibility(&mut self, visible: bool) {
        if self.mirror.show_add_team_form() != visible {
            self.mirror.set_show_add_team_form(visible);
            self.emit(SettingsEvent::AddTeamFormVisibility { visible });
        }
    }

    /// External "add server" push; may arrive before the configuration
    pub fn on_add_server_requested(&mut self) {
        self.set_add_team_form_visibility(true);
    }

    // ==================== App Options ====================

    fn update_flag(
        &mut self,
        key: SettingKey,
        value: bool,
        field: impl FnOnce(&mut ConfigSnapshot) -> &mut bool,
    ) -> Result<()> {
        *field(self.mirror.snapshot_mut()?) = value;
        self.save_setting(key, Value::Bool(value));
        Ok(())
    }

    /// Show or hide the tray icon
    ///
    /// On macOS hiding the menu bar icon also turns off minimize-to-tray.
    pub fn change_show_tray_icon(&mut self, show: bool) -> Result<()> {
        let drop_minimize = self.platform.is_macos() && !show;
        self.update_flag(SettingKey::ShowTrayIcon, show, |s| &mut s.show_tray_icon)?;
        if drop_minimize {
            self.update_flag(SettingKey::MinimizeToTray, false, |s| &mut s.minimize_to_tray)?;
        }
        Ok(())
    }

    pub fn change_tray_icon_theme(&mut self, theme: TrayIconTheme) -> Result<()> {
        self.mirror.snapshot_mut()?.tray_icon_theme = theme;
        self.save_setting(SettingKey::TrayIconTheme, serde_json::to_value(theme)?);
        Ok(())
    }

    pub fn change_autostart(&mut self, enabled: bool) -> Result<()> {
        self.update_flag(SettingKey::Autostart, enabled, |s| &mut s.autostart)
    }

    /// Stored value is only `true` while the tray icon is shown
    pub fn change_minimize_to_tray(&mut self, requested: bool) -> Result<()> {
        self.ensure_editable(SettingKey::MinimizeToTray)?;
        let value = self.mirror.snapshot_mut()?.show_tray_icon && requested;
        self.update_flag(SettingKey::MinimizeToTray, value, |s| &mut s.minimize_to_tray)
    }

    fn update_notifications(&mut self, change: impl FnOnce(&mut Notifications)) -> Result<()> {
        let snapshot = self.mirror.snapshot_mut()?;
        change(&mut snapshot.notifications);
        let data = serde_json::to_value(&snapshot.notifications)?;
        self.save_setting(SettingKey::Notifications, data);
        Ok(())
    }

    pub fn change_flash_window(&mut self, enabled: bool) -> Result<()> {
        self.update_notifications(|n| n.set_flash_window(enabled))
    }

    pub fn change_bounce_icon(&mut self, enabled: bool) -> Result<()> {
        self.update_notifications(|n| n.bounce_icon = enabled)
    }

    pub fn change_bounce_icon_type(&mut self, kind: BounceIconType) -> Result<()> {
        self.update_notifications(|n| n.bounce_icon_type = kind)
    }

    pub fn change_show_unread_badge(&mut self, enabled: bool) -> Result<()> {
        self.update_flag(SettingKey::ShowUnreadBadge, enabled, |s| &mut s.show_unread_badge)
    }

    pub fn change_use_spell_checker(&mut self, enabled: bool) -> Result<()> {
        self.update_flag(SettingKey::UseSpellChecker, enabled, |s| &mut s.use_spell_checker)
    }

    pub fn change_enable_hardware_acceleration(&mut self, enabled: bool) -> Result<()> {
        self.update_flag(SettingKey::EnableHardwareAcceleration, enabled, |s| {
            &mut s.enable_hardware_acceleration
        })
    }

    /// Set any key from a raw JSON value
    ///
    /// The value must fit the key's type; it is checked against the mirror
    /// before anything is queued.
    pub fn set_value(&mut self, key: SettingKey, data: Value) -> Result<()> {
        self.ensure_editable(key)?;
        let snapshot = self.mirror.snapshot_mut()?;
        let mut doc = serde_json::to_value(&*snapshot)?;
        let Value::Object(map) = &mut doc else {
            return Err(Error::Invalid {
                message: "configuration is not a JSON object".to_string(),
            });
        };
        map.insert(key.as_str().to_string(), data.clone());
        *snapshot = serde_json::from_value(doc)?;

        let teams_empty = snapshot.teams.is_empty();

        self.save_setting(key, data);
        if key == SettingKey::Teams {
            self.set_add_team_form_visibility(teams_empty);
        }
        Ok(())
    }

    // ==================== Window ====================

    pub fn handle_double_click(&self) -> Result<()> {
        self.host.window_interaction(WINDOW_SOURCE_SETTINGS)
    }
}
