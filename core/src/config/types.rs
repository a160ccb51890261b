//! Resolved console configuration
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use crate::router::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default base URL of the remote API (a local development backend)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Default mount point selector
pub const DEFAULT_ANCHOR: &str = "#app";

/// Default location shown at startup
pub const DEFAULT_START: &str = "/environments";

/// A fully resolved console configuration ready for use by core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the remote environments/simulations API
    pub api_url: String,
    /// Selector of the mount point the application attaches to
    pub anchor: String,
    /// Location shown before the first navigation
    pub start: String,
    /// Maximum number of navigation history entries (0 disables history)
    pub max_history: usize,
    /// Request timeout for API calls, in seconds
    pub timeout_secs: u64,
    /// Additional headers sent with every API request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            anchor: DEFAULT_ANCHOR.to_string(),
            start: DEFAULT_START.to_string(),
            max_history: 50,
            timeout_secs: 30,
            headers: HashMap::new(),
        }
    }
}

impl ConsoleConfig {
    /// Set the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the start location
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    /// Set the mount point selector
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = anchor.into();
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_url".to_string(),
            });
        }

        // Validate URL format
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api_url".to_string(),
                value: self.api_url.clone(),
            });
        }

        if self.anchor.len() < 2 || !self.anchor.starts_with('#') {
            return Err(ConfigError::InvalidValue {
                field: "anchor".to_string(),
                value: self.anchor.clone(),
            });
        }

        if Location::parse(&self.start).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "start".to_string(),
                value: self.start.clone(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConsoleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = ConsoleConfig::default().with_api_url("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api_url"
        ));

        let config = ConsoleConfig::default().with_anchor("app");
        assert!(config.validate().is_err());

        let config = ConsoleConfig::default().with_start("runs");
        assert!(config.validate().is_err());

        let config = ConsoleConfig::default().with_api_url("");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_start_must_be_a_location() {
        for start in ["#", "#runs", "runs", "  "] {
            let config = ConsoleConfig::default().with_start(start);
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidValue { ref field, .. }) if field == "start"
                ),
                "{:?} should be rejected",
                start
            );
        }

        for start in ["/runs", "#/runs", "http://host/#/runs", "/environment/42/show"] {
            let config = ConsoleConfig::default().with_start(start);
            assert!(config.validate().is_ok(), "{:?} should be accepted", start);
        }
    }
}

