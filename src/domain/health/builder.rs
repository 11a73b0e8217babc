use chrono::{DateTime, Utc};

use super::aggregate::{aggregate, AggregationError};
use crate::domain::entities::{DependencyCheck, HealthReport, SubsystemReport, SystemInfo};

/// Assembles a [`HealthReport`] from a completed set of subsystem reports.
///
/// Subsystems keep their insertion order; nothing is observable until
/// [`build`](Self::build) freezes the result.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    timestamp: DateTime<Utc>,
    system: SystemInfo,
    subsystems: Vec<SubsystemReport>,
    dependencies: Vec<DependencyCheck>,
}

impl ReportBuilder {
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, system: SystemInfo) -> Self {
        Self {
            timestamp,
            system,
            subsystems: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn subsystem(mut self, report: SubsystemReport) -> Self {
        self.subsystems.push(report);
        self
    }

    #[must_use]
    pub fn subsystems(mut self, reports: impl IntoIterator<Item = SubsystemReport>) -> Self {
        self.subsystems.extend(reports);
        self
    }

    #[must_use]
    pub fn dependencies(mut self, checks: impl IntoIterator<Item = DependencyCheck>) -> Self {
        self.dependencies.extend(checks);
        self
    }

    /// Computes the overall status and freezes the report.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError` if no subsystem measured anything; no
    /// report is produced in that case.
    pub fn build(self) -> Result<HealthReport, AggregationError> {
        let overall = aggregate(&self.subsystems)?;
        Ok(HealthReport::new(
            self.timestamp,
            self.system,
            self.subsystems,
            self.dependencies,
            overall,
        ))
    }
}

/// Builds a report with no dependency checks.
///
/// # Errors
///
/// Returns `AggregationError` if `subsystems` is empty or measured nothing.
pub fn build_report(
    timestamp: DateTime<Utc>,
    system: SystemInfo,
    subsystems: Vec<SubsystemReport>,
) -> Result<HealthReport, AggregationError> {
    ReportBuilder::new(timestamp, system)
        .subsystems(subsystems)
        .build()
}
