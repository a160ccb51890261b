//! Error types and handling for remote-console core

use thiserror::Error;

/// Result type alias for remote-console operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for remote-console core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Route declaration and navigation errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Mounting the application failed
    #[error("Mount error: {0}")]
    Mount(#[from] MountError),

    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Structured error type for router operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("No routes configured")]
    NoRoutes,

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route pattern '{0}' is declared more than once")]
    DuplicatePattern(String),

    #[error("Route id '{0}' is declared more than once")]
    DuplicateRoute(String),

    #[error("Invalid location '{0}'")]
    InvalidLocation(String),

    #[error("Missing route parameter '{name}' for '{pattern}'")]
    MissingParam { pattern: String, name: String },

    #[error("No route matches '{0}'")]
    NotFound(String),
}

/// Errors raised while attaching the application to a mount target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    #[error("Mount point '{0}' not found")]
    AnchorNotFound(String),

    #[error("Mount point '{0}' already has an application mounted")]
    AlreadyMounted(String),
}

/// Remote API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },

    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
