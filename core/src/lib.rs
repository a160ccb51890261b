//! # remote-console Core
//!
//! Core library for remote-console, a console for managing remote execution
//! environments and simulations.
//!
//! This library provides the route table that maps console URLs to pages,
//! the navigation controller, the remote API client and the application
//! bootstrap that mounts everything into an anchor.

// Core modules
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod pages;
pub mod router;

// Re-export commonly used types
pub use api::{ConsoleApi, HttpConsoleApi, MemoryApi};
pub use app::{Application, Document, MountTarget, MountedApplication, RootView, RouterHandle};
pub use config::ConsoleConfig;
pub use error::{Error, Result};
pub use pages::{console_route_table, Page};
pub use router::{Resolution, RouteTable, Router};

/// Current version of the remote-console-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing to stderr. `RUST_LOG` wins over the default level,
/// which is `debug` in debug mode and `warn` otherwise.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
