#[cfg(feature = "postgres")]
pub mod postgres_check;
#[cfg(feature = "redis")]
pub mod redis_check;

use async_trait::async_trait;
use thiserror::Error;

use crate::application::config::{DependencyConfig, EndpointConfig, PostgresConfig};
use crate::domain::entities::{DependencyCheck, DependencyStatus};
use crate::domain::ports::DependencyProbe;

/// Which client libraries were compiled into this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeCapabilities {
    pub redis: bool,
    pub postgres: bool,
}

impl ProbeCapabilities {
    /// Resolved from cargo features, once, at startup.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            redis: cfg!(feature = "redis"),
            postgres: cfg!(feature = "postgres"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[cfg(feature = "redis")]
    #[error("redis: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[cfg(feature = "postgres")]
    #[error("postgres: {0}")]
    Postgres(#[from] tokio_postgres::Error),
    #[error("no reply within {0:?}")]
    Timeout(std::time::Duration),
    #[error("unexpected reply: {0:?}")]
    UnexpectedReply(String),
}

/// Probe standing in for a dependency whose support is not compiled in.
pub struct SkippedProbe {
    name: String,
    reason: String,
}

impl SkippedProbe {
    #[must_use]
    pub fn not_compiled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: format!("{name} support not compiled in"),
        }
    }
}

#[async_trait]
impl DependencyProbe for SkippedProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> DependencyStatus {
        DependencyStatus::Skipped(self.reason.clone())
    }
}

#[cfg(feature = "redis")]
fn redis_client(endpoint: &EndpointConfig) -> Box<dyn DependencyProbe> {
    Box::new(redis_check::RedisProbe::new(endpoint))
}

#[cfg(not(feature = "redis"))]
fn redis_client(_endpoint: &EndpointConfig) -> Box<dyn DependencyProbe> {
    Box::new(SkippedProbe::not_compiled("redis"))
}

#[cfg(feature = "postgres")]
fn postgres_client(config: &PostgresConfig) -> Box<dyn DependencyProbe> {
    Box::new(postgres_check::PostgresProbe::new(config))
}

#[cfg(not(feature = "postgres"))]
fn postgres_client(_config: &PostgresConfig) -> Box<dyn DependencyProbe> {
    Box::new(SkippedProbe::not_compiled("postgres"))
}

/// One probe per configured dependency, in a fixed order (redis, postgres).
/// Unconfigured dependencies are not probed at all.
#[must_use]
pub fn build_probes(
    config: &DependencyConfig,
    caps: ProbeCapabilities,
) -> Vec<Box<dyn DependencyProbe>> {
    let mut probes: Vec<Box<dyn DependencyProbe>> = Vec::new();
    if let Some(endpoint) = &config.redis {
        probes.push(if caps.redis {
            redis_client(endpoint)
        } else {
            Box::new(SkippedProbe::not_compiled("redis"))
        });
    }
    if let Some(postgres) = &config.postgres {
        probes.push(if caps.postgres {
            postgres_client(postgres)
        } else {
            Box::new(SkippedProbe::not_compiled("postgres"))
        });
    }
    probes
}

/// Runs every probe sequentially, logging each outcome.
pub async fn run_probes(probes: &[Box<dyn DependencyProbe>]) -> Vec<DependencyCheck> {
    let mut checks = Vec::with_capacity(probes.len());
    for probe in probes {
        let check = probe.run().await;
        match &check.status {
            DependencyStatus::Failed(msg) => {
                tracing::warn!(dependency = %check.name, "dependency check failed: {msg}");
            }
            status => tracing::debug!(dependency = %check.name, %status, "dependency checked"),
        }
        checks.push(check);
    }
    checks
}
