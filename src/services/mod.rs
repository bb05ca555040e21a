//! Service Layer
//!
//! Collaborators of the settings page and the task that drives it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────── renderer ─────────────────────────────┐
//! │  SettingsHandle ──► SettingsSession ──► SettingsPage ──► IpcClient │
//! └───────────────────────────────────────────────────────────│───────┘
//!                                                             ▼ IpcMessage
//! ┌──────────────────────────── main process ─────────────────────────┐
//! │                serve_ipc ──► FileConfigStore / HostShell           │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

mod file_store;
mod ipc;
mod session;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use file_store::*;
pub use ipc::*;
pub use session::*;
pub use store::*;
