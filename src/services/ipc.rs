//! In-process IPC Link
//!
//! Renderer and main process exchange messages over one ordered channel.
//!
//! ```text
//! SettingsPage ──► IpcClient ──(IpcMessage)──► serve_ipc ──► ConfigStore / HostShell
//!                      ▲                             │
//!                      └──────── oneshot reply ──────┘  (configuration fetch only)
//! ```

use crate::domain::{ConfigSnapshot, EditBatch};
use crate::error::{Error, Result};
use crate::services::{ConfigStore, HostShell};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Messages crossing the link
#[derive(Debug)]
pub enum IpcMessage {
    /// Request/response: full configuration
    GetLocalConfiguration(oneshot::Sender<Result<ConfigSnapshot>>),
    /// One-way: ordered edit batch
    UpdateConfiguration(EditBatch),
    /// One-way: activate a server in the main window
    SwitchServer(String),
    /// One-way: a window was double-clicked
    DoubleClickOnWindow(String),
}

/// Renderer-side endpoint; implements both collaborator traits
#[derive(Debug, Clone)]
pub struct IpcClient {
    tx: mpsc::UnboundedSender<IpcMessage>,
}

/// Create a connected client and the receiver for [`serve_ipc`]
pub fn ipc_channel() -> (IpcClient, mpsc::UnboundedReceiver<IpcMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IpcClient { tx }, rx)
}

impl IpcClient {
    fn send(&self, message: IpcMessage) -> Result<()> {
        self.tx.send(message).map_err(|_| Error::ChannelClosed {
            message: "main process unreachable".to_string(),
        })
    }
}

impl ConfigStore for IpcClient {
    async fn fetch_configuration(&self) -> Result<ConfigSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(IpcMessage::GetLocalConfiguration(reply_tx))?;
        reply_rx.await.map_err(|_| Error::ChannelClosed {
            message: "configuration request dropped".to_string(),
        })?
    }

    fn apply_edits(&self, batch: EditBatch) -> Result<()> {
        self.send(IpcMessage::UpdateConfiguration(batch))
    }
}

impl HostShell for IpcClient {
    fn switch_server(&self, server_name: &str) -> Result<()> {
        self.send(IpcMessage::SwitchServer(server_name.to_string()))
    }

    fn window_interaction(&self, source: &str) -> Result<()> {
        self.send(IpcMessage::DoubleClickOnWindow(source.to_string()))
    }
}

/// Main-process loop; runs until every client is dropped
///
/// Failures on one-way messages are logged and never reported back.
/// Batches are applied on the blocking pool, one at a time, in arrival order.
pub async fn serve_ipc<S, H>(mut rx: mpsc::UnboundedReceiver<IpcMessage>, store: S, host: H)
where
    S: ConfigStore + Clone + 'static,
    H: HostShell,
{
    info!("IPC server started");

    while let Some(message) = rx.recv().await {
        match message {
            IpcMessage::GetLocalConfiguration(reply) => {
                let result = store.fetch_configuration().await;
                if reply.send(result).is_err() {
                    debug!("Configuration requester went away");
                }
            }
            IpcMessage::UpdateConfiguration(batch) => {
                let edits = batch.len();
                let store = store.clone();
                let applied = tokio::task::spawn_blocking(move || store.apply_edits(batch))
                    .await
                    .map_err(Error::from)
                    .and_then(|result| result);
                match applied {
                    Ok(()) => debug!(edits, "Configuration updated"),
                    Err(e) => warn!(error = %e, edits, "Failed to update configuration"),
                }
            }
            IpcMessage::SwitchServer(name) => {
                if let Err(e) = host.switch_server(&name) {
                    warn!(error = %e, server = %name, "Switch server failed");
                }
            }
            IpcMessage::DoubleClickOnWindow(source) => {
                if let Err(e) = host.window_interaction(&source) {
                    warn!(error = %e, %source, "Window interaction failed");
                }
            }
        }
    }

    info!("IPC server stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, PendingEdit, SettingKey, Team};
    use crate::services::testing::{HostCall, RecordingHost, RecordingStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_round_trip_through_server() {
        let snapshot = ConfigSnapshot {
            teams: vec![Team::new("alpha", "https://alpha.example.com")],
            ..ConfigSnapshot::default()
        };
        let store = RecordingStore::with_snapshot(snapshot.clone());
        let host = RecordingHost::default();
        let (client, rx) = ipc_channel();
        let server = tokio::spawn(serve_ipc(rx, store.clone(), host.clone()));

        let fetched = client.fetch_configuration().await.expect("fetch");
        assert_eq!(fetched, snapshot);

        client
            .apply_edits(vec![PendingEdit::new(
                Category::AppOptions,
                SettingKey::Autostart,
                json!(false),
            )])
            .expect("send");
        client.switch_server("alpha").expect("switch");
        client.window_interaction("settings").expect("double click");

        drop(client);
        server.await.expect("server task");

        assert_eq!(store.batches().len(), 1);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::SwitchServer("alpha".to_string()),
                HostCall::WindowInteraction("settings".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_closed_link_reports_error() {
        let (client, rx) = ipc_channel();
        drop(rx);

        assert!(client.apply_edits(Vec::new()).is_err());
        assert!(client.fetch_configuration().await.is_err());
    }
}
