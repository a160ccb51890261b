//! Route definitions and utilities
//!
//! This module defines the core route types: a route binds one path
//! pattern to one page.

use super::pattern::RoutePattern;
use crate::error::RouterError;
use crate::pages::Page;
use std::fmt;

/// Unique identifier for a route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(pub String);

impl RouteId {
    /// Create a new route ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Route definition containing metadata and configuration
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique identifier for this route
    pub id: RouteId,
    /// Human-readable name for this route
    pub name: String,
    /// Path pattern this route answers to
    pub pattern: RoutePattern,
    /// Page rendered when the pattern matches
    pub page: Page,
    /// Optional description of what this route displays
    pub description: Option<String>,
}

impl Route {
    /// Create a new route, compiling its pattern
    pub fn new(
        id: impl Into<RouteId>,
        name: impl Into<String>,
        pattern: &str,
        page: Page,
    ) -> Result<Self, RouterError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            pattern: RoutePattern::parse(pattern)?,
            page,
            description: None,
        })
    }

    /// Set the description for this route
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
