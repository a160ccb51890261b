//! In-process [`ConsoleApi`] used for offline mode and tests
//!
//! Behaves like the remote API as far as the console can observe it:
//! duplicate ids, unknown environment types and local environments
//! without an existing absolute runtime directory are rejected with the
//! same messages.

use super::client::ConsoleApi;
use super::models::{Environment, EnvironmentKind, Simulation};
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryApi {
    environments: Mutex<BTreeMap<String, Environment>>,
    simulations: Mutex<BTreeMap<String, Simulation>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(resource: &str, id: &str) -> ApiError {
    ApiError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

impl MemoryApi {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three environments a fresh backend starts with
    pub fn with_sample_data() -> Self {
        Self::new()
            .with_environment(
                Environment::new("ivt-nama", "IVT Nama", EnvironmentKind::Ssh).with_status("idle"),
            )
            .with_environment(
                Environment::new("euler", "Euler", EnvironmentKind::Lsf).with_status("idle"),
            )
            .with_environment(
                Environment::new("local", "Local", EnvironmentKind::LocalLinux)
                    .with_status("idle"),
            )
    }

    /// Seed an environment, bypassing creation checks
    pub fn with_environment(self, environment: Environment) -> Self {
        lock(&self.environments).insert(environment.id.clone(), environment);
        self
    }

    /// Seed a simulation, bypassing creation checks
    pub fn with_simulation(self, simulation: Simulation) -> Self {
        lock(&self.simulations).insert(simulation.id.clone(), simulation);
        self
    }
}

fn check_new_id<T>(store: &BTreeMap<String, T>, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ApiError::MissingField {
            field: "id".to_string(),
        }
        .into());
    }
    if store.contains_key(id) {
        return Err(ApiError::Rejected {
            message: "ID exists already".to_string(),
        }
        .into());
    }
    Ok(())
}

/// A local environment runs in a directory on the API host
fn check_runtime_directory(environment: &Environment) -> Result<()> {
    if environment.kind != EnvironmentKind::Local {
        return Ok(());
    }

    let path = environment.path.as_deref().unwrap_or_default();
    let message = if !Path::new(path).is_absolute() {
        format!("Runtime directory should be absolute: {}", path)
    } else if !Path::new(path).exists() {
        format!("Local directory does not exist: {}", path)
    } else {
        return Ok(());
    };
    Err(ApiError::Rejected { message }.into())
}

#[async_trait]
impl ConsoleApi for MemoryApi {
    async fn list_environments(&self) -> Result<Vec<Environment>> {
        Ok(lock(&self.environments).values().cloned().collect())
    }

    async fn get_environment(&self, id: &str) -> Result<Environment> {
        lock(&self.environments)
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("environment", id).into())
    }

    async fn create_environment(&self, environment: &Environment) -> Result<()> {
        let mut environments = lock(&self.environments);
        check_new_id(&environments, &environment.id)?;
        if !EnvironmentKind::CREATABLE.contains(&environment.kind) {
            return Err(ApiError::Rejected {
                message: "Invalid type".to_string(),
            }
            .into());
        }
        check_runtime_directory(environment)?;
        debug!("Created environment {}", environment.id);
        environments.insert(environment.id.clone(), environment.clone());
        Ok(())
    }

    async fn delete_environment(&self, id: &str) -> Result<()> {
        lock(&self.environments)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("environment", id).into())
    }

    async fn list_simulations(&self) -> Result<Vec<Simulation>> {
        Ok(lock(&self.simulations).values().cloned().collect())
    }

    async fn get_simulation(&self, id: &str) -> Result<Simulation> {
        lock(&self.simulations)
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("simulation", id).into())
    }

    async fn create_simulation(&self, simulation: &Simulation) -> Result<()> {
        let mut simulations = lock(&self.simulations);
        check_new_id(&simulations, &simulation.id)?;
        debug!("Created simulation {}", simulation.id);
        simulations.insert(simulation.id.clone(), simulation.clone());
        Ok(())
    }

    async fn delete_simulation(&self, id: &str) -> Result<()> {
        lock(&self.simulations)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found("simulation", id).into())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
