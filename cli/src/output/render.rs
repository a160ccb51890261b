//! Page rendering
//!
//! Turns loaded page data into styled text lines. Headless commands print
//! them; the interactive console maps the styles onto iocraft colors.

use remote_console_core::api::{Environment, Simulation};
use remote_console_core::pages::{FormSpec, FormValues, PageData, Resource, RunsOverview};
use remote_console_core::Page;
use serde_json::Value;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

const EMPTY: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Normal,
    Muted,
    Warning,
    Error,
    Success,
    /// Row `n` of a list page
    Row(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }
}

/// Render a loaded page
pub fn render_page(page: Page, data: &PageData) -> Vec<StyledLine> {
    let mut lines = vec![StyledLine::new(page.title(), LineStyle::Title)];
    match data {
        PageData::Environments(environments) => {
            lines.extend(table(
                &["ID", "NAME", "TYPE", "STATUS"],
                environments.iter().map(environment_row).collect(),
                "No environments",
            ));
        }
        PageData::Environment(environment) => lines.extend(environment_details(environment)),
        PageData::Simulations(simulations) => {
            lines.extend(table(
                &["ID", "NAME", "ENVIRONMENT", "STATUS"],
                simulations.iter().map(simulation_row).collect(),
                "No simulations",
            ));
        }
        PageData::Simulation(simulation) => lines.extend(simulation_details(simulation)),
        PageData::Form(spec) => lines.extend(render_form(spec, &FormValues::new(), None)),
        PageData::ConfirmDelete {
            resource,
            label,
            ..
        } => lines.extend(confirm_lines(*resource, label)),
        PageData::Runs(overview) => lines.extend(runs(overview)),
    }
    lines
}

/// Shown for locations no route matches
pub fn render_not_found(path: &str) -> Vec<StyledLine> {
    vec![
        StyledLine::new("Route Not Found", LineStyle::Error),
        StyledLine::new(format!("Unknown route: {}", path), LineStyle::Normal),
    ]
}

/// Render a create form; `active` marks the field being edited
pub fn render_form(spec: &FormSpec, values: &FormValues, active: Option<usize>) -> Vec<StyledLine> {
    let label_width = spec
        .fields
        .iter()
        .map(|f| f.label.width() + usize::from(f.required) * 2)
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (index, field) in spec.fields.iter().enumerate() {
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.to_string()
        };
        let value = values.get(field.name).map(String::as_str).unwrap_or("");
        let marker = if active == Some(index) { ">" } else { " " };
        let mut text = format!("{} {}  {}", marker, pad(&label, label_width), value);
        if !field.choices.is_empty() && value.is_empty() {
            text.push_str(&format!("({})", field.choices.join("|")));
        }
        let style = if active == Some(index) {
            LineStyle::Row(index)
        } else {
            LineStyle::Normal
        };
        lines.push(StyledLine::new(text, style));
    }
    lines.push(StyledLine::new("* required", LineStyle::Muted));
    lines
}

fn confirm_lines(resource: Resource, label: &str) -> Vec<StyledLine> {
    vec![
        StyledLine::new(
            format!("Delete {} {}?", resource.singular(), label),
            LineStyle::Warning,
        ),
        StyledLine::new("This cannot be undone.", LineStyle::Muted),
    ]
}

fn runs(overview: &RunsOverview) -> Vec<StyledLine> {
    let mut lines = vec![StyledLine::new(
        format!(
            "{} runs: {} alive, {} finished, {} failed",
            overview.runs.len(),
            overview.alive,
            overview.finished,
            overview.failed
        ),
        LineStyle::Muted,
    )];
    let rows = overview
        .runs
        .iter()
        .map(|run| {
            vec![
                run.simulation.clone(),
                run.name.clone(),
                run.environment.clone().unwrap_or_else(|| EMPTY.to_string()),
                run.status.to_string(),
            ]
        })
        .collect();
    lines.extend(table(
        &["SIMULATION", "NAME", "ENVIRONMENT", "STATUS"],
        rows,
        "No runs",
    ));
    lines
}

fn environment_row(environment: &Environment) -> Vec<String> {
    vec![
        environment.id.clone(),
        environment.name.clone(),
        environment.kind.to_string(),
        environment
            .status
            .clone()
            .unwrap_or_else(|| EMPTY.to_string()),
    ]
}

fn simulation_row(simulation: &Simulation) -> Vec<String> {
    vec![
        simulation.id.clone(),
        simulation.name.clone(),
        simulation
            .environment
            .clone()
            .unwrap_or_else(|| EMPTY.to_string()),
        simulation.status.clone().unwrap_or_else(|| EMPTY.to_string()),
    ]
}

fn environment_details(environment: &Environment) -> Vec<StyledLine> {
    let mut fields = vec![
        ("ID", environment.id.clone()),
        ("Name", environment.name.clone()),
        ("Type", environment.kind.to_string()),
        ("Status", optional(&environment.status)),
    ];
    if let Some(path) = &environment.path {
        fields.push(("Path", path.clone()));
    }
    details(fields, &environment.extra)
}

fn simulation_details(simulation: &Simulation) -> Vec<StyledLine> {
    let fields = vec![
        ("ID", simulation.id.clone()),
        ("Name", simulation.name.clone()),
        ("Environment", optional(&simulation.environment)),
        ("Status", optional(&simulation.status)),
    ];
    details(fields, &simulation.extra)
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| EMPTY.to_string())
}

fn details(fields: Vec<(&str, String)>, extra: &BTreeMap<String, Value>) -> Vec<StyledLine> {
    let mut pairs: Vec<(String, String)> = fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    pairs.extend(extra.iter().map(|(k, v)| {
        let value = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (k.clone(), value)
    }));

    let width = pairs.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    pairs
        .into_iter()
        .map(|(k, v)| StyledLine::new(format!("{}  {}", pad(&k, width), v), LineStyle::Normal))
        .collect()
}

/// Pad to a display width
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Column-aligned table; rows are styled [`LineStyle::Row`]
pub fn table(headers: &[&str], rows: Vec<Vec<String>>, empty: &str) -> Vec<StyledLine> {
    if rows.is_empty() {
        return vec![StyledLine::blank(), StyledLine::new(empty, LineStyle::Muted)];
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        StyledLine::blank(),
        StyledLine::new(format_row(headers.to_vec()), LineStyle::Heading),
    ];
    for (index, row) in rows.iter().enumerate() {
        let cells = row.iter().map(String::as_str).collect();
        lines.push(StyledLine::new(format_row(cells), LineStyle::Row(index)));
    }
    lines
}
