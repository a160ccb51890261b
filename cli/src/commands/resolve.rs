//! Resolve a URL against the route table without loading anything

use super::colorize;
use crate::output::{print_lines, render_not_found, LineStyle, StyledLine, Stdout};
use anyhow::{bail, Result};
use remote_console_core::console_route_table;
use remote_console_core::router::Resolution;

pub fn resolve_command(url: &str) -> Result<()> {
    let routes = console_route_table()?;
    match routes.resolve(url) {
        Resolution::Matched(route_match) => {
            let mut lines = vec![
                StyledLine::new(route_match.page.title(), LineStyle::Title),
                StyledLine::new(format!("page     {:?}", route_match.page), LineStyle::Normal),
                StyledLine::new(format!("route    {}", route_match.route_id), LineStyle::Normal),
                StyledLine::new(format!("pattern  {}", route_match.pattern), LineStyle::Normal),
                StyledLine::new(format!("path     {}", route_match.location.path()), LineStyle::Normal),
            ];
            for (name, value) in route_match.params.iter() {
                lines.push(StyledLine::new(
                    format!("param    {} = {}", name, value),
                    LineStyle::Normal,
                ));
            }
            print_lines(&Stdout, &lines, colorize());
            Ok(())
        }
        Resolution::NotFound { path } => {
            print_lines(&Stdout, &render_not_found(&path), colorize());
            bail!("No route matches '{}'", path)
        }
    }
}
