//! Settings Session
//!
//! Runs one [`SettingsPage`] on a tokio task. UI commands, the configuration
//! fetch and timer deadlines are interleaved on a single loop, so the page is
//! never touched concurrently.
//!
//! ```text
//! SettingsHandle ──(SettingsCommand)──► session loop ──► SettingsPage
//!                                          ▲     ▲
//!                         fetch (once) ────┘     └──── sleep_until(next deadline)
//! ```

use crate::constants::SESSION_COMMAND_CAPACITY;
use crate::domain::{BounceIconType, SettingKey, Team, TrayIconTheme};
use crate::error::{Error, Result};
use crate::services::{ConfigStore, HostShell};
use crate::states::{LoadState, PageView, SettingsPage};
use serde_json::Value;
use std::pin::pin;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Everything a renderer can ask of a settings view
#[derive(Debug)]
pub enum SettingsCommand {
    // ==================== Servers ====================
    TeamsChanged(Vec<Team>),
    UpdateTeam { index: usize, team: Team },
    AddServer(Team),
    SelectTeam(String),

    // ==================== Add-Server Form ====================
    ToggleAddTeamForm,
    SetAddTeamFormVisibility(bool),
    /// Pushed by the host at any time after spawn
    AddServerRequested,

    // ==================== App Options ====================
    ShowTrayIcon(bool),
    TrayIconTheme(TrayIconTheme),
    Autostart(bool),
    MinimizeToTray(bool),
    FlashWindow(bool),
    BounceIcon(bool),
    BounceIconType(BounceIconType),
    ShowUnreadBadge(bool),
    UseSpellChecker(bool),
    EnableHardwareAcceleration(bool),
    SetValue { key: SettingKey, data: Value },

    // ==================== Window / Lifecycle ====================
    DoubleClick,
    FlushNow,
    View(oneshot::Sender<PageView>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable sender side of a running session
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    tx: mpsc::Sender<SettingsCommand>,
    load_state: watch::Receiver<LoadState>,
}

impl SettingsHandle {
    pub async fn send(&self, command: SettingsCommand) -> Result<()> {
        self.tx.send(command).await.map_err(|_| Error::ChannelClosed {
            message: "settings session has stopped".to_string(),
        })
    }

    pub async fn request_add_server(&self) -> Result<()> {
        self.send(SettingsCommand::AddServerRequested).await
    }

    /// Current page state
    pub async fn view(&self) -> Result<PageView> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SettingsCommand::View(reply_tx)).await?;
        reply_rx.await.map_err(|_| Error::ChannelClosed {
            message: "settings session dropped the view request".to_string(),
        })
    }

    /// Wait until the configuration fetch has resolved
    pub async fn wait_loaded(&self) -> Result<()> {
        let mut load_state = self.load_state.clone();
        let state = load_state
            .wait_for(|s| !s.is_loading())
            .await
            .map_err(|_| Error::ChannelClosed {
                message: "settings session stopped while loading".to_string(),
            })?
            .clone();

        match state {
            LoadState::Error(message) => Err(Error::Invalid {
                message: message.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Flush queued edits and stop the session
    pub async fn shutdown(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(SettingsCommand::Shutdown(ack_tx)).await?;
        ack_rx.await.map_err(|_| Error::ChannelClosed {
            message: "settings session exited before acknowledging shutdown".to_string(),
        })
    }
}

/// Session spawner
pub struct SettingsSession;

impl SettingsSession {
    /// Start the page's event loop on the current tokio runtime
    pub fn spawn<S, H>(page: SettingsPage<S, H>) -> (SettingsHandle, JoinHandle<()>)
    where
        S: ConfigStore + Clone + 'static,
        H: HostShell + 'static,
    {
        let (tx, rx) = mpsc::channel(SESSION_COMMAND_CAPACITY);
        let (load_tx, load_rx) = watch::channel(LoadState::Loading);
        let task = tokio::spawn(run_session(page, rx, load_tx));
        (
            SettingsHandle {
                tx,
                load_state: load_rx,
            },
            task,
        )
    }
}

async fn run_session<S, H>(
    mut page: SettingsPage<S, H>,
    mut rx: mpsc::Receiver<SettingsCommand>,
    load_tx: watch::Sender<LoadState>,
) where
    S: ConfigStore + Clone,
    H: HostShell,
{
    info!("Settings session started");

    let store = page.store().clone();
    let mut fetch = pin!(store.fetch_configuration());
    let mut loading = true;

    loop {
        let deadline = page.next_deadline();

        tokio::select! {
            result = &mut fetch, if loading => {
                loading = false;
                match result {
                    Ok(snapshot) => page.apply_configuration(snapshot),
                    Err(e) => page.load_failed(&e),
                }
                load_tx.send_replace(page.mirror().load_state().clone());
            }
            command = rx.recv() => {
                match command {
                    Some(SettingsCommand::Shutdown(ack)) => {
                        page.flush_now();
                        let _ = ack.send(());
                        break;
                    }
                    Some(command) => dispatch(&mut page, command),
                    None => {
                        page.flush_now();
                        break;
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                page.poll_timers(Instant::now());
            }
        }
    }

    info!("Settings session stopped");
}

fn dispatch<S, H>(page: &mut SettingsPage<S, H>, command: SettingsCommand)
where
    S: ConfigStore,
    H: HostShell,
{
    debug!(?command, "Settings command");

    let result = match command {
        SettingsCommand::TeamsChanged(teams) => page.handle_teams_change(teams),
        SettingsCommand::UpdateTeam { index, team } => page.update_team(index, team),
        SettingsCommand::AddServer(team) => page.add_server(team),
        SettingsCommand::SelectTeam(name) => page.select_team(&name),
        SettingsCommand::ToggleAddTeamForm => {
            page.toggle_add_team_form();
            Ok(())
        }
        SettingsCommand::SetAddTeamFormVisibility(visible) => {
            page.set_add_team_form_visibility(visible);
            Ok(())
        }
        SettingsCommand::AddServerRequested => {
            page.on_add_server_requested();
            Ok(())
        }
        SettingsCommand::ShowTrayIcon(show) => page.change_show_tray_icon(show),
        SettingsCommand::TrayIconTheme(theme) => page.change_tray_icon_theme(theme),
        SettingsCommand::Autostart(enabled) => page.change_autostart(enabled),
        SettingsCommand::MinimizeToTray(enabled) => page.change_minimize_to_tray(enabled),
        SettingsCommand::FlashWindow(enabled) => page.change_flash_window(enabled),
        SettingsCommand::BounceIcon(enabled) => page.change_bounce_icon(enabled),
        SettingsCommand::BounceIconType(kind) => page.change_bounce_icon_type(kind),
        SettingsCommand::ShowUnreadBadge(enabled) => page.change_show_unread_badge(enabled),
        SettingsCommand::UseSpellChecker(enabled) => page.change_use_spell_checker(enabled),
        SettingsCommand::EnableHardwareAcceleration(enabled) => {
            page.change_enable_hardware_acceleration(enabled)
        }
        SettingsCommand::SetValue { key, data } => page.set_value(key, data),
        SettingsCommand::DoubleClick => page.handle_double_click(),
        SettingsCommand::FlushNow => {
            page.flush_now();
            Ok(())
        }
        SettingsCommand::View(reply) => {
            let _ = reply.send(page.view());
            Ok(())
        }
        SettingsCommand::Shutdown(ack) => {
            let _ = ack.send(());
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!(error = %e, "Settings command rejected");
    }
}
