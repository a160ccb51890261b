//! Router implementation for managing navigation state
//!
//! This module provides the navigation controller: it owns the current
//! location, resolves every navigation against the shared route table and
//! keeps a bounded back history.

use super::location::Location;
use super::pattern::RouteParams;
use super::table::{Resolution, RouteTable, RouterResult};
use crate::pages::Page;
use std::sync::Arc;
use tracing::{debug, warn};

/// Current state of the router
#[derive(Debug, Clone)]
pub struct RouterState {
    /// Currently active location
    pub current: Location,
    /// What the current location resolved to
    pub resolution: Resolution,
    /// Navigation history (most recent first)
    pub history: Vec<Location>,
    /// Maximum number of history entries to keep
    pub max_history: usize,
}

impl RouterState {
    /// Create a new router state at the given location
    pub fn new(initial: Location, resolution: Resolution) -> Self {
        Self {
            current: initial,
            resolution,
            history: Vec::new(),
            max_history: 50, // Default history limit
        }
    }

    /// Move to a new location
    pub fn navigate_to(&mut self, location: Location, resolution: Resolution) {
        // Add current location to history if it's different
        if self.current != location && self.max_history > 0 {
            self.history.insert(0, self.current.clone());

            // Trim history if it exceeds max size
            if self.history.len() > self.max_history {
                self.history.truncate(self.max_history);
            }
        }

        self.current = location;
        self.resolution = resolution;
    }

    /// Pop the most recent history entry
    pub fn pop_history(&mut self) -> Option<Location> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.history.remove(0))
        }
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Configuration for the router
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// The route table shared by every holder
    pub table: Arc<RouteTable>,
    /// Location shown before the first navigation
    pub initial_location: String,
    /// Whether to enable navigation history
    pub enable_history: bool,
    /// Maximum number of history entries
    pub max_history: usize,
}

impl RouterConfig {
    /// Create a new router configuration over a table
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            initial_location: "/".to_string(),
            enable_history: true,
            max_history: 50,
        }
    }

    /// Set the initial location
    pub fn with_initial_location(mut self, location: impl Into<String>) -> Self {
        self.initial_location = location.into();
        self
    }

    /// Disable navigation history
    pub fn without_history(mut self) -> Self {
        self.enable_history = false;
        self
    }

    /// Set maximum history size
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }
}

/// Navigation controller over an immutable route table
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    state: RouterState,
}

impl Router {
    /// Create a new router with the given configuration
    pub fn new(config: RouterConfig) -> RouterResult<Self> {
        let initial = Location::parse(&config.initial_location)?;
        let resolution = config.table.resolve_location(&initial);
        if !resolution.is_found() {
            warn!("Initial location '{}' matches no route", initial);
        }

        let mut state = RouterState::new(initial, resolution);
        state.max_history = if config.enable_history {
            config.max_history
        } else {
            0
        };

        Ok(Self {
            table: config.table,
            state,
        })
    }

    /// Navigate to a path or URL.
    ///
    /// Unknown paths are still navigated to; the returned resolution is
    /// [`Resolution::NotFound`] so the caller can show it. Only input that
    /// is not a location at all is an error.
    pub fn navigate(&mut self, url: &str) -> RouterResult<&Resolution> {
        let location = Location::parse(url)?;
        let resolution = self.table.resolve_location(&location);
        match &resolution {
            Resolution::Matched(m) => debug!("Navigated to {} ({:?})", location, m.page),
            Resolution::NotFound { path } => warn!("No route matches '{}'", path),
        }
        self.state.navigate_to(location, resolution);
        Ok(&self.state.resolution)
    }

    /// Navigate to the route bound to `page`
    pub fn navigate_to_page(
        &mut self,
        page: Page,
        params: &RouteParams,
    ) -> RouterResult<&Resolution> {
        let href = self.table.href(page, params)?;
        self.navigate(&href)
    }

    /// Go back to the previous location
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.state.pop_history() else {
            return false;
        };
        let resolution = self.table.resolve_location(&previous);
        debug!("Went back to {}", previous);
        self.state.current = previous;
        self.state.resolution = resolution;
        true
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// What the current location resolved to
    pub fn current(&self) -> &Resolution {
        &self.state.resolution
    }

    /// The current location
    pub fn current_location(&self) -> &Location {
        &self.state.current
    }

    /// Locations that `go_back` will visit, most recent first
    pub fn history(&self) -> &[Location] {
        &self.state.history
    }

    /// Resolve without navigating
    pub fn resolve(&self, url: &str) -> Resolution {
        self.table.resolve(url)
    }

    /// The shared route table
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }
}
