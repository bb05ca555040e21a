//! Application Layer
//!
//! Configuration loading, logging setup and the wiring that runs one
//! settings session against the file-backed store.

pub mod application;
pub mod config;
pub mod logging;
