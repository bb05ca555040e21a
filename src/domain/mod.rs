//! Domain Models
//!
//! Plain data exchanged between the settings view and the configuration store.

mod config;
mod edit;
mod platform;

pub use config::*;
pub use edit::*;
pub use platform::*;
