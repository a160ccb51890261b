//! Simple CLI configuration loader for remote-console
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./remote-console.json or ./.remote-console/config.json
//! 3. Git repository root: <repo_root>/.remote-console/config.json
//! 4. User config: <config_dir>/remote-console/config.json
//! 5. Built-in defaults
//!
//! Environment variables are applied on top of the file, flags on top of both.

use anyhow::{anyhow, Context, Result};
use remote_console_core::ConsoleConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "remote-console";
const FILE_NAME: &str = "remote-console.json";

pub const ENV_API_URL: &str = "REMOTE_CONSOLE_API_URL";
pub const ENV_ANCHOR: &str = "REMOTE_CONSOLE_ANCHOR";
pub const ENV_START: &str = "REMOTE_CONSOLE_START";

/// Raw configuration file format; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Base URL of the remote API
    pub api_url: Option<String>,
    /// Mount point selector
    pub anchor: Option<String>,
    /// Location shown at startup
    pub start: Option<String>,
    /// Navigation history size
    pub max_history: Option<usize>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Additional headers (values may be "env:VAR_NAME")
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    api_url_override: Option<String>,
    start_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override; `~` and env vars are expanded
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        let expanded = shellexpand::full(&path.to_string_lossy())
            .map(|p| PathBuf::from(p.into_owned()))
            .ok();
        self.config_override = Some(expanded.unwrap_or(path));
        self
    }

    /// Set API URL override
    pub fn with_api_url_override(mut self, api_url: String) -> Self {
        self.api_url_override = Some(api_url);
        self
    }

    /// Set start location override
    pub fn with_start_override(mut self, start: String) -> Self {
        self.start_override = Some(start);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ConsoleConfig> {
        // Step 1: Find and load base configuration
        let raw = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Environment, then flags
        let raw = apply_env(raw, |key| std::env::var(key).ok());
        let raw = self.apply_overrides(raw);

        // Step 3: Resolve to final console config
        resolve_config(raw, |key| std::env::var(key).ok())
    }

    fn apply_overrides(&self, mut raw: RawConfig) -> RawConfig {
        if let Some(api_url) = &self.api_url_override {
            raw.api_url = Some(api_url.clone());
        }
        if let Some(start) = &self.start_override {
            raw.start = Some(start.clone());
        }
        raw
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let cwd = std::env::current_dir()?;
        let mut candidates = vec![
            cwd.join(FILE_NAME),
            cwd.join(format!(".{}", APP_DIR)).join("config.json"),
        ];
        if let Some(git_root) = find_git_root(&cwd) {
            candidates.push(git_root.join(format!(".{}", APP_DIR)).join("config.json"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(APP_DIR).join("config.json"));
        }

        for candidate in candidates {
            if candidate.is_file() {
                debug!("Using config file {}", candidate.display());
                return self.load_file(&candidate).await;
            }
        }

        debug!("No config file found, using defaults");
        Ok(RawConfig::default())
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Apply environment variable overrides
fn apply_env(mut raw: RawConfig, lookup: impl Fn(&str) -> Option<String>) -> RawConfig {
    if let Some(api_url) = lookup(ENV_API_URL) {
        raw.api_url = Some(api_url);
    }
    if let Some(anchor) = lookup(ENV_ANCHOR) {
        raw.anchor = Some(anchor);
    }
    if let Some(start) = lookup(ENV_START) {
        raw.start = Some(start);
    }
    raw
}

/// Resolve raw config to a validated ConsoleConfig
fn resolve_config(raw: RawConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<ConsoleConfig> {
    let defaults = ConsoleConfig::default();

    // Resolve header values (handle env: prefix)
    let mut headers = HashMap::new();
    for (name, value) in raw.headers {
        let value = match value.strip_prefix("env:") {
            Some(var_name) => lookup(var_name)
                .ok_or_else(|| anyhow!("Environment variable not found: {}", var_name))?,
            None => value,
        };
        headers.insert(name, value);
    }

    let config = ConsoleConfig {
        api_url: raw.api_url.unwrap_or(defaults.api_url),
        anchor: raw.anchor.unwrap_or(defaults.anchor),
        start: raw.start.unwrap_or(defaults.start),
        max_history: raw.max_history.unwrap_or(defaults.max_history),
        timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
        headers,
    };

    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
