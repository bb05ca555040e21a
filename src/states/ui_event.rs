//! UI Events
//!
//! Events emitted from the settings page to whatever renders it.

use crate::domain::Category;
use crate::states::SavingState;
use std::sync::Arc;

/// Notifications for the rendering layer
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsEvent {
    /// Configuration arrived; the form can replace the loading placeholder
    Ready {
        /// The add-server form was forced open by the first-run policy
        add_form_forced: bool,
    },

    /// Configuration fetch failed
    LoadFailed {
        message: Arc<str>,
    },

    /// A category indicator changed state
    SavingStateChanged {
        category: Category,
        state: SavingState,
    },

    /// A batch of edits was handed to the store
    BatchSent {
        edits: usize,
    },

    /// Handing a batch to the store failed; nothing is retried
    SaveFailed {
        categories: Vec<Category>,
        message: Arc<str>,
    },

    /// Add-server form opened or closed
    AddTeamFormVisibility {
        visible: bool,
    },

    /// The view asked to be closed (after switching server)
    CloseRequested,
}
