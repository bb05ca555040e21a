//! Collaborator Traits
//!
//! The settings page talks to two opaque peers: the configuration store
//! owned by the main process and the host shell that owns the windows.

use crate::domain::{ConfigSnapshot, EditBatch};
use crate::error::Result;
use std::future::Future;
use tracing::info;

/// Remote configuration store
pub trait ConfigStore: Send + Sync {
    /// Request the full configuration (invoked once per view)
    fn fetch_configuration(&self) -> impl Future<Output = Result<ConfigSnapshot>> + Send;

    /// Send one ordered batch of edits
    ///
    /// One-way: an `Ok` means the batch was handed off, not that it was
    /// persisted.
    fn apply_edits(&self, batch: EditBatch) -> Result<()>;
}

/// Window host notifications (fire-and-forget)
pub trait HostShell: Send + Sync {
    /// Make `server_name` the active server in the main window
    fn switch_server(&self, server_name: &str) -> Result<()>;

    /// A window received an interaction such as a title bar double-click
    fn window_interaction(&self, source: &str) -> Result<()>;
}

/// Host shell that only records notifications in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHost;

impl HostShell for LogHost {
    fn switch_server(&self, server_name: &str) -> Result<()> {
        info!(server = server_name, "Switch server requested");
        Ok(())
    }

    fn window_interaction(&self, source: &str) -> Result<()> {
        info!(source, "Window double-click");
        Ok(())
    }
}
