//! # remote-console CLI
//!
//! Command-line interface for remote-console - browse and manage remote
//! execution environments, simulations and runs.
//!
//! ## Usage
//!
//! - `remote-console` - Start the interactive console
//! - `remote-console routes` - Show the route table
//! - `remote-console resolve <url>` - Show which page a URL opens
//! - `remote-console open <url>` - Load a page and print it
//!
//! The interactive console is a terminal UI powered by iocraft.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod interactive;
mod output;

use commands::open::{parse_key_value, OpenOptions};
use commands::{interactive_command, open_command, resolve_command, routes_command};
use config::CliConfigLoader;

/// remote-console - a console for remote environments and simulations
#[derive(Parser)]
#[command(name = "remote-console")]
#[command(version = remote_console_core::VERSION)]
#[command(about = "Browse and manage remote environments, simulations and runs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the remote API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Location to open at startup
    #[arg(long, global = true)]
    start: Option<String>,

    /// Use built-in sample data instead of the remote API
    #[arg(long, global = true)]
    offline: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console (default)
    Interactive,

    /// Show the route table
    Routes,

    /// Show which page a URL opens
    Resolve {
        /// Path or URL, e.g. /environment/42/show or #/runs
        url: String,
    },

    /// Load a page and print it
    Open {
        /// Path or URL of the page
        url: String,

        /// Form value for create pages
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_value)]
        values: Vec<(String, String)>,

        /// Confirm a delete page
        #[arg(short, long)]
        yes: bool,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(api_url) = &cli.api_url {
        loader = loader.with_api_url_override(api_url.clone());
    }

    if let Some(start) = &cli.start {
        loader = loader.with_start_override(start.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays clean
    remote_console_core::init_tracing_with_debug(cli.verbose);

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match cli.command {
        None | Some(Commands::Interactive) => {
            interactive_command(config_loader, cli.offline).await
        }
        Some(Commands::Routes) => routes_command(),
        Some(Commands::Resolve { url }) => resolve_command(&url),
        Some(Commands::Open { url, values, yes }) => {
            let options = OpenOptions {
                values,
                confirm: yes,
            };
            open_command(config_loader, cli.offline, &url, options).await
        }
    }
}
