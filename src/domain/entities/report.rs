use chrono::{DateTime, Utc};

use super::dependency::DependencyCheck;
use super::metric::MetricSample;
use super::samples::{
    CpuSample, MemorySample, NetworkSample, PartitionSample, ProcessSample, SkipDiagnostic,
};
use super::system_info::SystemInfo;
use crate::domain::value_objects::{StatusLevel, SubsystemKind};

/// One partition inside the disk subsystem, with its own status.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionEntry {
    pub partition: PartitionSample,
    pub status: StatusLevel,
}

/// Process-table payload: the full count plus the top CPU consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSummary {
    pub total_processes: usize,
    pub top_cpu: Vec<ProcessSample>,
}

/// Subsystem-specific payload kept for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum SubsystemDetail {
    Cpu(CpuSample),
    Memory(MemorySample),
    Disk(Vec<PartitionEntry>),
    Network(NetworkSample),
    Processes(ProcessSummary),
    /// The provider returned nothing usable for this subsystem.
    Unavailable,
}

/// Evaluation result for one subsystem.
///
/// `status` is `None` when the subsystem contributed no measurement at all
/// (every item skipped or the provider call failed). Such a report is
/// excluded from aggregation instead of counting as healthy.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemReport {
    kind: SubsystemKind,
    samples: Vec<MetricSample>,
    status: Option<StatusLevel>,
    detail: SubsystemDetail,
    skipped: Vec<SkipDiagnostic>,
}

impl SubsystemReport {
    #[must_use]
    pub const fn new(
        kind: SubsystemKind,
        samples: Vec<MetricSample>,
        status: Option<StatusLevel>,
        detail: SubsystemDetail,
        skipped: Vec<SkipDiagnostic>,
    ) -> Self {
        Self {
            kind,
            samples,
            status,
            detail,
            skipped,
        }
    }

    /// Report for a subsystem whose provider call failed outright.
    #[must_use]
    pub fn unavailable(kind: SubsystemKind, diagnostic: SkipDiagnostic) -> Self {
        Self::new(
            kind,
            Vec::new(),
            None,
            SubsystemDetail::Unavailable,
            vec![diagnostic],
        )
    }

    #[must_use]
    pub const fn kind(&self) -> SubsystemKind {
        self.kind
    }

    #[must_use]
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Value of the sample named `name`, if this report carries one.
    #[must_use]
    pub fn sample_value(&self, name: &str) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.name() == name)
            .map(MetricSample::value)
    }

    #[must_use]
    pub const fn status(&self) -> Option<StatusLevel> {
        self.status
    }

    #[must_use]
    pub const fn detail(&self) -> &SubsystemDetail {
        &self.detail
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkipDiagnostic] {
        &self.skipped
    }

    /// True when nothing was measured, so the report has no say in the verdict.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}

/// Immutable result of one health-check pass.
///
/// Built once by [`ReportBuilder`](crate::domain::health::ReportBuilder);
/// there are no mutators, a new pass produces a new report.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    timestamp: DateTime<Utc>,
    system: SystemInfo,
    subsystems: Vec<SubsystemReport>,
    dependencies: Vec<DependencyCheck>,
    overall: StatusLevel,
}

impl HealthReport {
    pub(crate) const fn new(
        timestamp: DateTime<Utc>,
        system: SystemInfo,
        subsystems: Vec<SubsystemReport>,
        dependencies: Vec<DependencyCheck>,
        overall: StatusLevel,
    ) -> Self {
        Self {
            timestamp,
            system,
            subsystems,
            dependencies,
            overall,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn system(&self) -> &SystemInfo {
        &self.system
    }

    /// Subsystem reports in collection order.
    #[must_use]
    pub fn subsystems(&self) -> &[SubsystemReport] {
        &self.subsystems
    }

    #[must_use]
    pub fn subsystem(&self, kind: SubsystemKind) -> Option<&SubsystemReport> {
        self.subsystems.iter().find(|s| s.kind() == kind)
    }

    #[must_use]
    pub fn dependencies(&self) -> &[DependencyCheck] {
        &self.dependencies
    }

    #[must_use]
    pub const fn overall(&self) -> StatusLevel {
        self.overall
    }
}
