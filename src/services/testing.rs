//! In-memory collaborators for unit tests

use crate::domain::{ConfigSnapshot, EditBatch};
use crate::error::{Error, Result};
use crate::services::{ConfigStore, HostShell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Store that records every batch it is handed
#[derive(Clone, Default)]
pub struct RecordingStore {
    snapshot: ConfigSnapshot,
    fetch_delay: Option<Duration>,
    fail_fetch: bool,
    fail_sends: Arc<AtomicBool>,
    batches: Arc<Mutex<Vec<EditBatch>>>,
}

impl RecordingStore {
    pub fn with_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<EditBatch> {
        self.batches.lock().expect("batches lock").clone()
    }
}

impl ConfigStore for RecordingStore {
    async fn fetch_configuration(&self) -> Result<ConfigSnapshot> {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch {
            return Err(Error::ChannelClosed {
                message: "main process gone".to_string(),
            });
        }
        Ok(self.snapshot.clone())
    }

    fn apply_edits(&self, batch: EditBatch) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(Error::Store {
                message: "send rejected".to_string(),
            });
        }
        self.batches.lock().expect("batches lock").push(batch);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    SwitchServer(String),
    WindowInteraction(String),
}

/// Host shell that records notifications
#[derive(Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl HostShell for RecordingHost {
    fn switch_server(&self, server_name: &str) -> Result<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(HostCall::SwitchServer(server_name.to_string()));
        Ok(())
    }

    fn window_interaction(&self, source: &str) -> Result<()> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(HostCall::WindowInteraction(source.to_string()));
        Ok(())
    }
}
