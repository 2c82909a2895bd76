//! fuzzy-enhance - fuzzy-logic image enhancement
//!
//! PNG in, metrics out, fuzzy inference on the metrics, enhanced PNG out.
//! This library exposes modules for the CLI and for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod imaging;
pub mod models;
pub mod server;
pub mod services;
