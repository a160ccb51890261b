//! The immutable route table and URL resolution
//!
//! Routes are tried in declaration order and the first match wins.
//! Patterns matching exactly the same paths are rejected when the table
//! is built, so first-match-wins only decides between overlapping
//! patterns such as `/environment/new/show` and `/environment/:id/show`.

use super::location::Location;
use super::pattern::RouteParams;
use super::route::{Route, RouteId};
use crate::error::RouterError;
use crate::pages::Page;
use tracing::debug;

/// Type alias for router operation results
pub type RouterResult<T> = Result<T, RouterError>;

/// A successful match of a location against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route_id: RouteId,
    pub page: Page,
    /// The pattern that matched, as declared
    pub pattern: String,
    pub params: RouteParams,
    pub location: Location,
}

/// Outcome of resolving a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    NotFound { path: String },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Resolution::Matched(m) => Some(m.page),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&RouteParams> {
        match self {
            Resolution::Matched(m) => Some(&m.params),
            Resolution::NotFound { .. } => None,
        }
    }

    /// The path that was resolved
    pub fn path(&self) -> &str {
        match self {
            Resolution::Matched(m) => m.location.path(),
            Resolution::NotFound { path } => path,
        }
    }
}

/// Ordered, validated set of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Start declaring a table
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Resolve a path or URL. Input that cannot be parsed resolves to
    /// [`Resolution::NotFound`] like any other unknown path.
    pub fn resolve(&self, url: &str) -> Resolution {
        match Location::parse(url) {
            Ok(location) => self.resolve_location(&location),
            Err(_) => {
                debug!("Unparseable location '{}'", url);
                Resolution::NotFound {
                    path: url.to_string(),
                }
            }
        }
    }

    /// Resolve an already parsed location
    pub fn resolve_location(&self, location: &Location) -> Resolution {
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(location) {
                return Resolution::Matched(RouteMatch {
                    route_id: route.id.clone(),
                    page: route.page,
                    pattern: route.pattern.as_str().to_string(),
                    params,
                    location: location.clone(),
                });
            }
        }
        Resolution::NotFound {
            path: location.path().to_string(),
        }
    }

    /// Build the concrete path of the route bound to `page`
    pub fn href(&self, page: Page, params: &RouteParams) -> RouterResult<String> {
        let route = self
            .route_for(page)
            .ok_or_else(|| RouterError::NotFound(page.title().to_string()))?;
        route.pattern.format(params)
    }

    /// First route bound to `page`
    pub fn route_for(&self, page: Page) -> Option<&Route> {
        self.routes.iter().find(|route| route.page == page)
    }

    pub fn get(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|route| &route.id == id)
    }

    /// All routes in declaration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for [`RouteTable`]
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    error: Option<RouterError>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a route; pattern errors surface from [`build`](Self::build)
    pub fn route(
        mut self,
        id: impl Into<RouteId>,
        name: impl Into<String>,
        pattern: &str,
        page: Page,
    ) -> Self {
        match Route::new(id, name, pattern, page) {
            Ok(route) => self.routes.push(route),
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    /// Add an already constructed route
    pub fn add_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> RouterResult<RouteTable> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.routes.is_empty() {
            return Err(RouterError::NoRoutes);
        }

        for (index, route) in self.routes.iter().enumerate() {
            for earlier in &self.routes[..index] {
                if earlier.id == route.id {
                    return Err(RouterError::DuplicateRoute(route.id.0.clone()));
                }
                if earlier.pattern.same_shape(&route.pattern) {
                    return Err(RouterError::DuplicatePattern(
                        route.pattern.as_str().to_string(),
                    ));
                }
            }
        }

        debug!("Route table built with {} routes", self.routes.len());
        Ok(RouteTable {
            routes: self.routes,
        })
    }
}
