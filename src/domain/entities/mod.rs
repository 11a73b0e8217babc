pub mod dependency;
pub mod metric;
pub mod report;
pub mod samples;
pub mod system_info;

pub use dependency::{DependencyCheck, DependencyStatus};
pub use metric::MetricSample;
pub use report::{HealthReport, PartitionEntry, ProcessSummary, SubsystemDetail, SubsystemReport};
pub use samples::{
    partition_outcomes, CpuSample, ItemOutcome, MemorySample, NetworkSample, PartitionSample,
    ProcessSample, ProcessTable, SkipDiagnostic,
};
pub use system_info::SystemInfo;
