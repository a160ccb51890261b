//! The console route table

use super::Page;
use crate::error::RouterError;
use crate::router::{Route, RouteParams, RoutePattern, RouteTable, RouterResult};

/// `(route id, name, path pattern, page)` for every navigable URL
pub const CONSOLE_ROUTES: [(&str, &str, &str, Page); 9] = [
    ("environment.list", "Environments", "/environments", Page::ListEnvironments),
    ("environment.create", "Create environment", "/create-environment", Page::CreateEnvironment),
    ("environment.show", "Show environment", "/environment/:id/show", Page::ShowEnvironment),
    ("environment.delete", "Delete environment", "/environment/:id/delete", Page::DeleteEnvironment),
    ("simulation.list", "Simulations", "/simulations", Page::ListSimulations),
    ("simulation.create", "Create simulation", "/create-simulation", Page::CreateSimulation),
    ("simulation.show", "Show simulation", "/simulation/:id/show", Page::ShowSimulation),
    ("simulation.delete", "Delete simulation", "/simulation/:id/delete", Page::DeleteSimulation),
    ("runs", "Runs", "/runs", Page::Runs),
];

/// Build the console's route table
pub fn console_route_table() -> RouterResult<RouteTable> {
    let mut builder = RouteTable::builder();
    for (id, name, pattern, page) in CONSOLE_ROUTES {
        let route = Route::new(id, name, pattern, page)?.with_description(page.description());
        builder = builder.add_route(route);
    }
    builder.build()
}

/// Concrete path of a console page, with `id` for pages that need one
pub fn href(page: Page, id: Option<&str>) -> RouterResult<String> {
    let pattern = CONSOLE_ROUTES
        .iter()
        .find(|(_, _, _, p)| *p == page)
        .map(|(_, _, pattern, _)| *pattern)
        .ok_or_else(|| RouterError::NotFound(page.title().to_string()))?;
    let params = match id {
        Some(id) => RouteParams::new().with("id", id),
        None => RouteParams::new(),
    };
    RoutePattern::parse(pattern)?.format(&params)
}
