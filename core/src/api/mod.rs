//! Remote API access
//!
//! The console talks to the remote environments/simulations API through
//! the [`ConsoleApi`] trait. [`HttpConsoleApi`] is the real client,
//! [`MemoryApi`] keeps everything in process.

pub mod client;
pub mod http;
pub mod memory;
pub mod models;

pub use client::ConsoleApi;
pub use http::HttpConsoleApi;
pub use memory::MemoryApi;
pub use models::{Environment, EnvironmentKind, Run, RunStatus, Simulation};
