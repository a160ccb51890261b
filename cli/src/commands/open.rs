//! Open a console URL headlessly: load and print the page, optionally
//! submitting a create form or confirming a delete

use super::{application, colorize};
use crate::config::CliConfigLoader;
use crate::output::{print_lines, render_not_found, render_page, LineStyle, StyledLine, Stdout};
use anyhow::{anyhow, bail, Result};
use remote_console_core::pages::{
    confirm_delete, load_page, submit_form, FormValues, PageAction, PageRequest,
};
use remote_console_core::router::Resolution;
use remote_console_core::{Document, MountedApplication};
use tracing::{info, warn};

/// Options of the `open` command
#[derive(Debug, Default)]
pub struct OpenOptions {
    /// Form values for create pages
    pub values: Vec<(String, String)>,
    /// Confirm delete pages
    pub confirm: bool,
}

pub async fn open_command(
    config_loader: CliConfigLoader,
    offline: bool,
    url: &str,
    options: OpenOptions,
) -> Result<()> {
    let config = config_loader.load().await?;
    let mut document = Document::new().with_anchor(config.anchor.clone());
    let mounted = application(config, offline)?.mount(&mut document)?;

    let request = navigate(&mounted, url)?;
    let page = request.page();

    match page.action() {
        PageAction::Create if !options.values.is_empty() => {
            let resource = page
                .resource()
                .ok_or_else(|| anyhow!("{} has no form", page))?;
            let values: FormValues = options.values.into_iter().collect();
            let location = submit_form(mounted.api().as_ref(), resource, &values).await?;
            let id = values.get("id").map(|id| id.trim()).unwrap_or_default();
            print_status(format!("Created {} '{}'", resource, id));
            show(&mounted, &location).await
        }
        PageAction::Delete if options.confirm => {
            let resource = page
                .resource()
                .ok_or_else(|| anyhow!("{} deletes nothing", page))?;
            let id = request
                .id()
                .ok_or_else(|| anyhow!("{} needs an id", page))?;
            let location = confirm_delete(mounted.api().as_ref(), resource, id).await?;
            print_status(format!("Deleted {} '{}'", resource, id));
            show(&mounted, &location).await
        }
        action => {
            if !options.values.is_empty() {
                warn!("--set only applies to create pages; ignoring it");
            }
            if options.confirm && action != PageAction::Delete {
                warn!("--yes only applies to delete pages; ignoring it");
            }
            show_request(&mounted, &request).await?;
            match action {
                PageAction::Create => print_hint("Submit with --set <field>=<value> ..."),
                PageAction::Delete => print_hint("Re-run with --yes to delete"),
                _ => {}
            }
            Ok(())
        }
    }
}

/// Navigate the mounted router and bind the page parameters
fn navigate(mounted: &MountedApplication, url: &str) -> Result<PageRequest> {
    match mounted.router().navigate(url)? {
        Resolution::Matched(route_match) => Ok(PageRequest::from_match(&route_match)?),
        Resolution::NotFound { path } => {
            print_lines(&Stdout, &render_not_found(&path), colorize());
            bail!("No route matches '{}'", path)
        }
    }
}

async fn show(mounted: &MountedApplication, url: &str) -> Result<()> {
    let request = navigate(mounted, url)?;
    show_request(mounted, &request).await
}

async fn show_request(mounted: &MountedApplication, request: &PageRequest) -> Result<()> {
    info!("Loading {}", mounted.router().current_location());
    let data = load_page(mounted.api().as_ref(), request).await?;
    print_lines(&Stdout, &render_page(request.page(), &data), colorize());
    Ok(())
}

fn print_status(message: String) {
    print_lines(&Stdout, &[StyledLine::new(message, LineStyle::Success)], colorize());
}

fn print_hint(message: &str) {
    print_lines(&Stdout, &[StyledLine::new(message, LineStyle::Muted)], colorize());
}

/// Parse a `key=value` argument
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected <field>=<value>, got '{}'", arg)),
    }
}
