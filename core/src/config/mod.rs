//! Minimal configuration module for remote-console core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{ConsoleConfig, DEFAULT_ANCHOR, DEFAULT_API_URL, DEFAULT_START};
