use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::health::{SubsystemEvaluator, DEFAULT_PROCESS_LIMIT, DEFAULT_TOP_PROCESSES};
use crate::domain::value_objects::ThresholdSet;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: ThresholdSet,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub dependencies: DependencyConfig,
}

/// Sampling parameters for the metrics provider and evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(default = "default_cpu_sample_ms")]
    pub cpu_sample_ms: u64,
    #[serde(default = "default_process_limit")]
    pub process_limit: usize,
    #[serde(default = "default_top_processes")]
    pub top_processes: usize,
}

/// Structured export destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Optional dependencies to probe. Absent sections are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis: Option<EndpointConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresConfig>,
}

/// Network endpoint of one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// PostgreSQL endpoint plus the login the check authenticates with.
/// `database` defaults to the user name on the server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConfig {
    #[serde(flatten)]
    pub endpoint: EndpointConfig,
    #[serde(default = "default_postgres_user")]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// --- Defaults ---

const fn default_cpu_sample_ms() -> u64 {
    1000
}

const fn default_process_limit() -> usize {
    DEFAULT_PROCESS_LIMIT
}

const fn default_top_processes() -> usize {
    DEFAULT_TOP_PROCESSES
}

fn default_output_path() -> PathBuf {
    PathBuf::from("system_health_report.json")
}

const fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "localhost".into()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_postgres_user() -> String {
    "postgres".into()
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            cpu_sample_ms: default_cpu_sample_ms(),
            process_limit: default_process_limit(),
            top_processes: default_top_processes(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            pretty: default_true(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load from `explicit` if given, else from the default location when a
    /// file exists there, else fall back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, is not
    /// valid TOML, or carries invalid thresholds. An explicit path that does
    /// not exist is also an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// `<config_dir>/hostcheck/config.toml`, if the platform has a config dir.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hostcheck").join("config.toml"))
    }

    #[must_use]
    pub fn evaluator(&self) -> SubsystemEvaluator {
        SubsystemEvaluator::new(self.thresholds.clone())
            .with_process_limit(self.collection.process_limit)
            .with_top_processes(self.collection.top_processes)
    }
}
