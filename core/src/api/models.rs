//! Resource types exchanged with the remote API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of execution environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentKind {
    /// Runs on the API host
    Local,
    /// Local environment as reported by a running backend
    LocalLinux,
    /// Remote host reached over SSH
    Ssh,
    /// LSF batch cluster
    Lsf,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EnvironmentKind {
    /// Kinds that can be requested when creating an environment
    pub const CREATABLE: [EnvironmentKind; 3] =
        [EnvironmentKind::Local, EnvironmentKind::Ssh, EnvironmentKind::Lsf];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentKind::Local => "local",
            EnvironmentKind::LocalLinux => "local_linux",
            EnvironmentKind::Ssh => "ssh",
            EnvironmentKind::Lsf => "lsf",
            EnvironmentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(EnvironmentKind::Local),
            "local_linux" => Ok(EnvironmentKind::LocalLinux),
            "ssh" => Ok(EnvironmentKind::Ssh),
            "lsf" => Ok(EnvironmentKind::Lsf),
            other => Err(format!("Invalid type '{}'", other)),
        }
    }
}

/// An execution environment managed by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EnvironmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Runtime directory for local environments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Fields this console does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Environment {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EnvironmentKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            status: None,
            path: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Scheduled,
    Started,
    Finished,
    Failed,
    Stopped,
}

impl RunStatus {
    pub const ALL: [RunStatus; 5] = [
        RunStatus::Scheduled,
        RunStatus::Started,
        RunStatus::Finished,
        RunStatus::Failed,
        RunStatus::Stopped,
    ];

    /// A run is alive until it finished, failed or was stopped
    pub fn is_alive(&self) -> bool {
        !matches!(
            self,
            RunStatus::Finished | RunStatus::Failed | RunStatus::Stopped
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Scheduled => "scheduled",
            RunStatus::Started => "started",
            RunStatus::Finished => "finished",
            RunStatus::Failed => "failed",
            RunStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown run status '{}'", s))
    }
}

/// A simulation definition managed by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Environment the simulation runs in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Run status as reported by the API, if the simulation was started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Simulation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            environment: None,
            status: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    /// The parsed run status; unknown values count as no run
    pub fn run_status(&self) -> Option<RunStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// A run derived from a simulation that carries a run status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub simulation: String,
    pub name: String,
    pub environment: Option<String>,
    pub status: RunStatus,
}

impl Run {
    pub fn from_simulation(simulation: &Simulation) -> Option<Self> {
        simulation.run_status().map(|status| Self {
            simulation: simulation.id.clone(),
            name: simulation.name.clone(),
            environment: simulation.environment.clone(),
            status,
        })
    }
}

/// Flatten an id-keyed object into a list sorted by id, filling in ids
/// the bodies leave out.
pub(crate) fn from_keyed<T>(
    keyed: BTreeMap<String, T>,
    id_of: impl Fn(&mut T) -> &mut String,
) -> Vec<T> {
    keyed
        .into_iter()
        .map(|(key, mut item)| {
            let id = id_of(&mut item);
            if id.is_empty() {
                *id = key;
            }
            item
        })
        .collect()
}
