//! Interactive mode command

use super::application;
use crate::config::CliConfigLoader;
use crate::interactive::TerminalSurface;
use anyhow::{Context, Result};
use tracing::debug;

/// Start interactive mode
pub async fn interactive_command(config_loader: CliConfigLoader, offline: bool) -> Result<()> {
    let config = config_loader.load().await?;
    debug!("Using API at {}", config.api_url);

    let anchor = config.anchor.clone();
    let application = application(config, offline)?;

    let mut surface = TerminalSurface::detect(&anchor);
    application.mount(&mut surface).with_context(|| {
        format!(
            "Cannot start the interactive console: mount point '{}' needs a terminal",
            anchor
        )
    })?;

    surface.run().await
}
