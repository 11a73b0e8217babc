use chrono::{DateTime, Utc};

use crate::domain::entities::{DependencyCheck, HealthReport, SubsystemReport, SystemInfo};
use crate::domain::health::{AggregationError, ReportBuilder, SubsystemEvaluator};
use crate::domain::ports::provider::{MetricsProvider, PlatformInfoProvider};
use crate::domain::value_objects::SubsystemKind;

/// Everything gathered during one collection pass, before aggregation.
#[derive(Debug, Clone)]
pub struct CollectedPass {
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub subsystems: Vec<SubsystemReport>,
}

impl CollectedPass {
    /// Freezes the pass into a report, attaching dependency checks.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError` if no subsystem measured anything.
    pub fn into_report(
        self,
        dependencies: Vec<DependencyCheck>,
    ) -> Result<HealthReport, AggregationError> {
        ReportBuilder::new(self.timestamp, self.system)
            .subsystems(self.subsystems)
            .dependencies(dependencies)
            .build()
    }
}

/// Runs one pass: provider → evaluator, in the fixed order
/// cpu → memory → disk → network → processes.
///
/// Owns its collaborators so a pass can be moved onto a blocking thread.
pub struct HealthCheckService {
    provider: Box<dyn MetricsProvider>,
    platform: Box<dyn PlatformInfoProvider>,
    evaluator: SubsystemEvaluator,
}

impl HealthCheckService {
    #[must_use]
    pub fn new(
        provider: Box<dyn MetricsProvider>,
        platform: Box<dyn PlatformInfoProvider>,
        evaluator: SubsystemEvaluator,
    ) -> Self {
        Self {
            provider,
            platform,
            evaluator,
        }
    }

    /// Samples every subsystem. A failing provider call yields an empty
    /// report for that subsystem; the pass itself never fails.
    #[must_use]
    pub fn collect(&self) -> CollectedPass {
        let timestamp = Utc::now();
        tracing::info!("Collecting system health metrics...");

        let system = self.platform.platform_info();
        let subsystems = SubsystemKind::ALL
            .into_iter()
            .map(|kind| self.collect_subsystem(kind))
            .collect();

        CollectedPass {
            timestamp,
            system,
            subsystems,
        }
    }

    /// Collects and builds a report without dependency checks.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError` if no subsystem measured anything.
    pub fn run_once(&self) -> Result<HealthReport, AggregationError> {
        self.collect().into_report(Vec::new())
    }

    fn collect_subsystem(&self, kind: SubsystemKind) -> SubsystemReport {
        let evaluator = &self.evaluator;
        let result = match kind {
            SubsystemKind::Cpu => self.provider.cpu().map(|s| evaluator.evaluate_cpu(s)),
            SubsystemKind::Memory => self.provider.memory().map(|s| evaluator.evaluate_memory(s)),
            SubsystemKind::Disk => self
                .provider
                .partitions()
                .map(|items| evaluator.evaluate_disk(items)),
            SubsystemKind::Network => self
                .provider
                .network()
                .map(|s| evaluator.evaluate_network(s)),
            SubsystemKind::Processes => self
                .provider
                .processes()
                .map(|table| evaluator.evaluate_processes(table)),
        };
        result.unwrap_or_else(|e| evaluator.evaluate_unavailable(kind, &e))
    }
}
