//! CLI command implementations

pub mod interactive;
pub mod open;
pub mod resolve;
pub mod routes;

pub use interactive::interactive_command;
pub use open::open_command;
pub use resolve::resolve_command;
pub use routes::routes_command;

use anyhow::Result;
use remote_console_core::{Application, ConsoleConfig, MemoryApi};
use std::sync::Arc;
use tracing::info;

/// Bootstrap the application against the remote API, or against the
/// built-in sample data when offline
pub fn application(config: ConsoleConfig, offline: bool) -> Result<Application> {
    if offline {
        info!("Offline mode: using built-in sample data");
        let api = Arc::new(MemoryApi::with_sample_data());
        return Ok(Application::bootstrap(config, api)?);
    }
    Ok(Application::connect(config)?)
}

/// Whether stdout takes ANSI colors
pub fn colorize() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
