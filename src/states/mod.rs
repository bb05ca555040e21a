//! State Layer
//!
//! The settings page and its parts. Everything here is mutated from a single
//! event loop:
//!
//! ```text
//! UI handler → local update → SaveQueue → (debounce) → flush → ConfigStore
//!                                 │
//!                                 ▼
//!                          SavingIndicator → SettingsEvent
//! ```

mod indicator;
mod mirror;
mod save_queue;
mod settings;
mod ui_event;

pub use indicator::*;
pub use mirror::*;
pub use save_queue::*;
pub use settings::*;
pub use ui_event::*;
