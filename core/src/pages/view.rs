//! Page data loading and submission
//!
//! A resolved route is bound to a typed [`PageRequest`], which is then
//! loaded through a [`ConsoleApi`] into the [`PageData`] a frontend draws.

use super::{href, Page, PageAction, Resource};
use crate::api::{ConsoleApi, Environment, EnvironmentKind, Run, RunStatus, Simulation};
use crate::error::{ApiError, Result, RouterError};
use crate::router::RouteMatch;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Values entered into a form, keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// A page with its route parameters bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    ListEnvironments,
    CreateEnvironment,
    ShowEnvironment { id: String },
    DeleteEnvironment { id: String },
    ListSimulations,
    CreateSimulation,
    ShowSimulation { id: String },
    DeleteSimulation { id: String },
    Runs,
}

impl PageRequest {
    /// Bind the parameters of a route match
    pub fn from_match(route_match: &RouteMatch) -> Result<Self> {
        Self::new(route_match.page, route_match.params.id())
    }

    /// Bind a page to an optional id; pages that address one resource
    /// require it
    pub fn new(page: Page, id: Option<&str>) -> Result<Self> {
        let bind_id = || -> Result<String> {
            id.filter(|id| !id.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    RouterError::MissingParam {
                        pattern: page.title().to_string(),
                        name: "id".to_string(),
                    }
                    .into()
                })
        };

        Ok(match page {
            Page::ListEnvironments => PageRequest::ListEnvironments,
            Page::CreateEnvironment => PageRequest::CreateEnvironment,
            Page::ShowEnvironment => PageRequest::ShowEnvironment { id: bind_id()? },
            Page::DeleteEnvironment => PageRequest::DeleteEnvironment { id: bind_id()? },
            Page::ListSimulations => PageRequest::ListSimulations,
            Page::CreateSimulation => PageRequest::CreateSimulation,
            Page::ShowSimulation => PageRequest::ShowSimulation { id: bind_id()? },
            Page::DeleteSimulation => PageRequest::DeleteSimulation { id: bind_id()? },
            Page::Runs => PageRequest::Runs,
        })
    }

    pub fn page(&self) -> Page {
        match self {
            PageRequest::ListEnvironments => Page::ListEnvironments,
            PageRequest::CreateEnvironment => Page::CreateEnvironment,
            PageRequest::ShowEnvironment { .. } => Page::ShowEnvironment,
            PageRequest::DeleteEnvironment { .. } => Page::DeleteEnvironment,
            PageRequest::ListSimulations => Page::ListSimulations,
            PageRequest::CreateSimulation => Page::CreateSimulation,
            PageRequest::ShowSimulation { .. } => Page::ShowSimulation,
            PageRequest::DeleteSimulation { .. } => Page::DeleteSimulation,
            PageRequest::Runs => Page::Runs,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            PageRequest::ShowEnvironment { id }
            | PageRequest::DeleteEnvironment { id }
            | PageRequest::ShowSimulation { id }
            | PageRequest::DeleteSimulation { id } => Some(id),
            _ => None,
        }
    }
}

/// One input of a create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Allowed values; empty means free text
    pub choices: &'static [&'static str],
}

/// Fields of a create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub resource: Resource,
    pub fields: &'static [FormField],
}

const ENVIRONMENT_FORM: FormSpec = FormSpec {
    resource: Resource::Environment,
    fields: &[
        FormField { name: "id", label: "ID", required: true, choices: &[] },
        FormField { name: "name", label: "Name", required: false, choices: &[] },
        FormField { name: "type", label: "Type", required: true, choices: &["local", "ssh", "lsf"] },
        FormField { name: "path", label: "Path", required: false, choices: &[] },
    ],
};

const SIMULATION_FORM: FormSpec = FormSpec {
    resource: Resource::Simulation,
    fields: &[
        FormField { name: "id", label: "ID", required: true, choices: &[] },
        FormField { name: "name", label: "Name", required: false, choices: &[] },
        FormField { name: "environment", label: "Environment", required: false, choices: &[] },
    ],
};

impl FormSpec {
    pub fn for_resource(resource: Resource) -> &'static FormSpec {
        match resource {
            Resource::Environment => &ENVIRONMENT_FORM,
            Resource::Simulation => &SIMULATION_FORM,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Runs with counts per lifecycle stage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunsOverview {
    pub runs: Vec<Run>,
    pub alive: usize,
    pub finished: usize,
    pub failed: usize,
}

impl RunsOverview {
    pub fn new(mut runs: Vec<Run>) -> Self {
        runs.sort_by(|a, b| a.simulation.cmp(&b.simulation));
        let alive = runs.iter().filter(|r| r.status.is_alive()).count();
        let finished = runs.iter().filter(|r| r.status == RunStatus::Finished).count();
        let failed = runs.iter().filter(|r| r.status == RunStatus::Failed).count();
        Self {
            runs,
            alive,
            finished,
            failed,
        }
    }
}

/// Everything a frontend needs to draw a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Environments(Vec<Environment>),
    Environment(Environment),
    Simulations(Vec<Simulation>),
    Simulation(Simulation),
    Form(&'static FormSpec),
    ConfirmDelete {
        resource: Resource,
        id: String,
        label: String,
    },
    Runs(RunsOverview),
}

impl PageData {
    /// Ids of the rows of a list page, in display order
    pub fn row_ids(&self) -> Vec<&str> {
        match self {
            PageData::Environments(list) => list.iter().map(|e| e.id.as_str()).collect(),
            PageData::Simulations(list) => list.iter().map(|s| s.id.as_str()).collect(),
            PageData::Runs(overview) => overview
                .runs
                .iter()
                .map(|r| r.simulation.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Load the data of a page
pub async fn load_page(api: &dyn ConsoleApi, request: &PageRequest) -> Result<PageData> {
    debug!("Loading {:?} from {}", request, api.backend_name());
    let data = match request {
        PageRequest::ListEnvironments => PageData::Environments(api.list_environments().await?),
        PageRequest::CreateEnvironment => {
            PageData::Form(FormSpec::for_resource(Resource::Environment))
        }
        PageRequest::ShowEnvironment { id } => PageData::Environment(api.get_environment(id).await?),
        PageRequest::DeleteEnvironment { id } => {
            let environment = api.get_environment(id).await?;
            PageData::ConfirmDelete {
                resource: Resource::Environment,
                id: id.clone(),
                label: display_name(&environment.name, id),
            }
        }
        PageRequest::ListSimulations => PageData::Simulations(api.list_simulations().await?),
        PageRequest::CreateSimulation => {
            PageData::Form(FormSpec::for_resource(Resource::Simulation))
        }
        PageRequest::ShowSimulation { id } => PageData::Simulation(api.get_simulation(id).await?),
        PageRequest::DeleteSimulation { id } => {
            let simulation = api.get_simulation(id).await?;
            PageData::ConfirmDelete {
                resource: Resource::Simulation,
                id: id.clone(),
                label: display_name(&simulation.name, id),
            }
        }
        PageRequest::Runs => PageData::Runs(RunsOverview::new(api.list_runs().await?)),
    };
    Ok(data)
}

fn display_name(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        format!("{} ({})", name, id)
    }
}

fn value<'a>(values: &'a FormValues, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn required<'a>(values: &'a FormValues, name: &str) -> Result<&'a str> {
    value(values, name).ok_or_else(|| {
        ApiError::MissingField {
            field: name.to_string(),
        }
        .into()
    })
}

/// Values not covered by the form travel as extra string fields
fn extra_fields(spec: &FormSpec, values: &FormValues) -> BTreeMap<String, serde_json::Value> {
    values
        .iter()
        .filter(|(k, v)| spec.field(k).is_none() && !v.trim().is_empty())
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.trim().to_string())))
        .collect()
}

/// Submit a create form; returns the location of the created resource
pub async fn submit_form(
    api: &dyn ConsoleApi,
    resource: Resource,
    values: &FormValues,
) -> Result<String> {
    let spec = FormSpec::for_resource(resource);
    let id = required(values, "id")?;
    let name = value(values, "name").unwrap_or(id);

    match resource {
        Resource::Environment => {
            let kind: EnvironmentKind = required(values, "type")?
                .parse()
                .map_err(|message| ApiError::Rejected { message })?;
            let mut environment = Environment::new(id, name, kind);
            environment.path = value(values, "path").map(str::to_string);
            environment.extra = extra_fields(spec, values);
            api.create_environment(&environment).await?;
        }
        Resource::Simulation => {
            let mut simulation = Simulation::new(id, name);
            simulation.environment = value(values, "environment").map(str::to_string);
            simulation.extra = extra_fields(spec, values);
            api.create_simulation(&simulation).await?;
        }
    }

    info!("Created {} '{}'", resource, id);
    Ok(href(Page::for_resource(resource, PageAction::Show), Some(id))?)
}

/// Delete a resource; returns the location of its list page
pub async fn confirm_delete(api: &dyn ConsoleApi, resource: Resource, id: &str) -> Result<String> {
    match resource {
        Resource::Environment => api.delete_environment(id).await?,
        Resource::Simulation => api.delete_simulation(id).await?,
    }
    info!("Deleted {} '{}'", resource, id);
    Ok(href(Page::for_resource(resource, PageAction::List), None)?)
}
