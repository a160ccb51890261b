//! Console API trait

use super::models::{Environment, Run, Simulation};
use crate::error::Result;
use async_trait::async_trait;

/// Operations the console pages perform against the remote API
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// All environments, sorted by id
    async fn list_environments(&self) -> Result<Vec<Environment>>;

    async fn get_environment(&self, id: &str) -> Result<Environment>;

    /// Create an environment under `environment.id`
    async fn create_environment(&self, environment: &Environment) -> Result<()>;

    async fn delete_environment(&self, id: &str) -> Result<()>;

    /// All simulations, sorted by id
    async fn list_simulations(&self) -> Result<Vec<Simulation>>;

    async fn get_simulation(&self, id: &str) -> Result<Simulation>;

    /// Create a simulation under `simulation.id`
    async fn create_simulation(&self, simulation: &Simulation) -> Result<()>;

    async fn delete_simulation(&self, id: &str) -> Result<()>;

    /// Describes the backend (its base URL, or a short name) for logs and
    /// status lines
    fn backend_name(&self) -> &str;

    /// Runs derived from the simulations that carry a run status
    async fn list_runs(&self) -> Result<Vec<Run>> {
        let simulations = self.list_simulations().await?;
        Ok(simulations.iter().filter_map(Run::from_simulation).collect())
    }
}
