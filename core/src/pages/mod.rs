//! Pages of the console
//!
//! Every navigable screen is a [`Page`] variant. Routes bind path patterns
//! to these tags; frontends look up how to draw each tag.

pub mod routes;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use routes::{console_route_table, href, CONSOLE_ROUTES};
pub use view::{
    confirm_delete, load_page, submit_form, FormField, FormSpec, FormValues, PageData,
    PageRequest, RunsOverview,
};

/// Remote resource types managed through the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Environment,
    Simulation,
}

impl Resource {
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Environment => "environment",
            Resource::Simulation => "simulation",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// What a page does with its resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageAction {
    List,
    Create,
    Show,
    Delete,
}

/// Every screen of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    ListEnvironments,
    CreateEnvironment,
    ShowEnvironment,
    DeleteEnvironment,
    ListSimulations,
    CreateSimulation,
    ShowSimulation,
    DeleteSimulation,
    Runs,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::ListEnvironments,
        Page::CreateEnvironment,
        Page::ShowEnvironment,
        Page::DeleteEnvironment,
        Page::ListSimulations,
        Page::CreateSimulation,
        Page::ShowSimulation,
        Page::DeleteSimulation,
        Page::Runs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::ListEnvironments => "Environments",
            Page::CreateEnvironment => "Create environment",
            Page::ShowEnvironment => "Environment",
            Page::DeleteEnvironment => "Delete environment",
            Page::ListSimulations => "Simulations",
            Page::CreateSimulation => "Create simulation",
            Page::ShowSimulation => "Simulation",
            Page::DeleteSimulation => "Delete simulation",
            Page::Runs => "Runs",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Page::ListEnvironments => "list all environments",
            Page::CreateEnvironment => "create-environment form",
            Page::ShowEnvironment => "show one environment by id",
            Page::DeleteEnvironment => "delete-confirmation for one environment",
            Page::ListSimulations => "list all simulations",
            Page::CreateSimulation => "create-simulation form",
            Page::ShowSimulation => "show one simulation by id",
            Page::DeleteSimulation => "delete-confirmation for one simulation",
            Page::Runs => "list all runs",
        }
    }

    /// The resource this page manages; runs are derived and have none
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Page::ListEnvironments
            | Page::CreateEnvironment
            | Page::ShowEnvironment
            | Page::DeleteEnvironment => Some(Resource::Environment),
            Page::ListSimulations
            | Page::CreateSimulation
            | Page::ShowSimulation
            | Page::DeleteSimulation => Some(Resource::Simulation),
            Page::Runs => None,
        }
    }

    pub fn action(&self) -> PageAction {
        match self {
            Page::ListEnvironments | Page::ListSimulations | Page::Runs => PageAction::List,
            Page::CreateEnvironment | Page::CreateSimulation => PageAction::Create,
            Page::ShowEnvironment | Page::ShowSimulation => PageAction::Show,
            Page::DeleteEnvironment | Page::DeleteSimulation => PageAction::Delete,
        }
    }

    /// Show and delete pages address one resource through an `id` parameter
    pub fn requires_id(&self) -> bool {
        matches!(self.action(), PageAction::Show | PageAction::Delete)
    }

    pub fn for_resource(resource: Resource, action: PageAction) -> Page {
        match (resource, action) {
            (Resource::Environment, PageAction::List) => Page::ListEnvironments,
            (Resource::Environment, PageAction::Create) => Page::CreateEnvironment,
            (Resource::Environment, PageAction::Show) => Page::ShowEnvironment,
            (Resource::Environment, PageAction::Delete) => Page::DeleteEnvironment,
            (Resource::Simulation, PageAction::List) => Page::ListSimulations,
            (Resource::Simulation, PageAction::Create) => Page::CreateSimulation,
            (Resource::Simulation, PageAction::Show) => Page::ShowSimulation,
            (Resource::Simulation, PageAction::Delete) => Page::DeleteSimulation,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_resource_round_trips() {
        for page in Page::ALL {
            if let Some(resource) = page.resource() {
                assert_eq!(Page::for_resource(resource, page.action()), page);
            }
        }
    }

    #[test]
    fn test_requires_id() {
        let with_id: Vec<Page> = Page::ALL.into_iter().filter(|p| p.requires_id()).collect();
        assert_eq!(
            with_id,
            vec![
                Page::ShowEnvironment,
                Page::DeleteEnvironment,
                Page::ShowSimulation,
                Page::DeleteSimulation
            ]
        );
    }
}
