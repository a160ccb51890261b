//! Router module for managing page navigation and routing
//!
//! This module provides the route table that maps URL patterns to pages
//! and the navigation controller that resolves locations against it.

pub mod location;
pub mod pattern;
pub mod route;
pub mod router;
pub mod table;

// Re-export commonly used types
pub use location::Location;
pub use pattern::{RouteParams, RoutePattern};
pub use route::{Route, RouteId};
pub use router::{Router, RouterConfig, RouterState};
pub use table::{Resolution, RouteMatch, RouteTable, RouteTableBuilder, RouterResult};
