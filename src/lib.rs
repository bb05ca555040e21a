//! settings-sync
//!
//! Core of a desktop chat client's settings view: a local mirror of the
//! configuration held by the main process, a debounced save queue that
//! pushes edits back over IPC, and per-category saving indicators.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod states;
