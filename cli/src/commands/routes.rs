//! Print the route table

use super::colorize;
use crate::output::{print_lines, table, LineStyle, StyledLine, Stdout};
use anyhow::Result;
use remote_console_core::console_route_table;

pub fn routes_command() -> Result<()> {
    let routes = console_route_table()?;
    let rows = routes
        .routes()
        .iter()
        .map(|route| {
            vec![
                route.pattern.as_str().to_string(),
                route.page.title().to_string(),
                route.id.to_string(),
                route.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut lines = vec![StyledLine::new(
        format!("{} routes", routes.len()),
        LineStyle::Title,
    )];
    lines.extend(table(&["PATTERN", "PAGE", "ID", "DESCRIPTION"], rows, "No routes"));
    print_lines(&Stdout, &lines, colorize());
    Ok(())
}
