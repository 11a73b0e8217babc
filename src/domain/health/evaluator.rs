use tracing::{debug, warn};

use super::classify::classify;
use crate::domain::entities::{
    partition_outcomes, CpuSample, ItemOutcome, MemorySample, MetricSample, NetworkSample,
    PartitionEntry, PartitionSample, ProcessSample, ProcessSummary, ProcessTable, SkipDiagnostic,
    SubsystemDetail, SubsystemReport,
};
use crate::domain::ports::provider::CollectionError;
use crate::domain::value_objects::{StatusLevel, SubsystemKind, ThresholdSet, Thresholds};

/// Number of top CPU consumers kept in the process payload.
pub const DEFAULT_TOP_PROCESSES: usize = 5;

/// Process-table size treated as 100% pressure (classic Linux `pid_max`).
pub const DEFAULT_PROCESS_LIMIT: usize = 32_768;

/// Worst classification among the percent samples, `None` if there are none.
fn status_from_samples(samples: &[MetricSample], thresholds: &Thresholds) -> Option<StatusLevel> {
    samples
        .iter()
        .filter(|s| s.is_percent())
        .map(|s| classify(s.value(), thresholds))
        .max()
}

fn log_skips(kind: SubsystemKind, skipped: &[SkipDiagnostic]) {
    for diagnostic in skipped {
        warn!(subsystem = %kind, item = %diagnostic.item, "skipped: {}", diagnostic.reason);
    }
}

/// Turns raw provider samples into [`SubsystemReport`]s.
///
/// Evaluation is a pure fold: each item is classified on its own and either
/// appended to the report or recorded as a skip. No state survives a call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemEvaluator {
    thresholds: ThresholdSet,
    process_limit: usize,
    top_processes: usize,
}

impl SubsystemEvaluator {
    #[must_use]
    pub const fn new(thresholds: ThresholdSet) -> Self {
        Self {
            thresholds,
            process_limit: DEFAULT_PROCESS_LIMIT,
            top_processes: DEFAULT_TOP_PROCESSES,
        }
    }

    /// Process count that maps to 100% table pressure. Zero is raised to one.
    #[must_use]
    pub fn with_process_limit(mut self, limit: usize) -> Self {
        self.process_limit = limit.max(1);
        self
    }

    #[must_use]
    pub const fn with_top_processes(mut self, count: usize) -> Self {
        self.top_processes = count;
        self
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    fn finish(
        &self,
        kind: SubsystemKind,
        samples: Vec<MetricSample>,
        detail: SubsystemDetail,
        skipped: Vec<SkipDiagnostic>,
    ) -> SubsystemReport {
        let status = status_from_samples(&samples, self.thresholds.for_kind(kind));
        debug!(subsystem = %kind, status = StatusLevel::label(status), "evaluated");
        log_skips(kind, &skipped);
        SubsystemReport::new(kind, samples, status, detail, skipped)
    }

    #[must_use]
    pub fn evaluate_cpu(&self, sample: CpuSample) -> SubsystemReport {
        let samples = vec![
            MetricSample::percent("cpu_percent_total", sample.percent_total),
            MetricSample::count("cpu_count_logical", sample.logical_cores as u64),
        ];
        self.finish(
            SubsystemKind::Cpu,
            samples,
            SubsystemDetail::Cpu(sample),
            Vec::new(),
        )
    }

    #[must_use]
    pub fn evaluate_memory(&self, sample: MemorySample) -> SubsystemReport {
        let samples = vec![
            MetricSample::percent("memory_percent_used", sample.percent_used),
            MetricSample::bytes("memory_total", sample.total_bytes),
            MetricSample::bytes("memory_used", sample.used_bytes),
            MetricSample::bytes("memory_available", sample.available_bytes),
        ];
        self.finish(
            SubsystemKind::Memory,
            samples,
            SubsystemDetail::Memory(sample),
            Vec::new(),
        )
    }

    /// Each readable partition gets its own status; unreadable ones become
    /// skip diagnostics. The subsystem status is the worst partition.
    #[must_use]
    pub fn evaluate_disk(&self, items: Vec<ItemOutcome<PartitionSample>>) -> SubsystemReport {
        let thresholds = &self.thresholds.disk;
        let (partitions, skipped) = partition_outcomes(items);

        let mut samples = Vec::with_capacity(partitions.len() * 2);
        let mut entries = Vec::with_capacity(partitions.len());
        for partition in partitions {
            samples.push(MetricSample::percent(
                format!("disk_percent_used:{}", partition.mount_point),
                partition.percent_used,
            ));
            samples.push(MetricSample::bytes(
                format!("disk_used:{}", partition.mount_point),
                partition.used_bytes,
            ));
            entries.push(PartitionEntry {
                status: classify(partition.percent_used, thresholds),
                partition,
            });
        }

        self.finish(
            SubsystemKind::Disk,
            samples,
            SubsystemDetail::Disk(entries),
            skipped,
        )
    }

    #[must_use]
    pub fn evaluate_network(&self, sample: NetworkSample) -> SubsystemReport {
        let samples = vec![
            MetricSample::percent("network_error_percent", sample.error_percent()),
            MetricSample::bytes("network_bytes_sent", sample.bytes_sent),
            MetricSample::bytes("network_bytes_recv", sample.bytes_recv),
            MetricSample::count(
                "network_errors",
                sample.errors_in.saturating_add(sample.errors_out),
            ),
        ];
        self.finish(
            SubsystemKind::Network,
            samples,
            SubsystemDetail::Network(sample),
            Vec::new(),
        )
    }

    /// Status follows table pressure (listed processes against the configured
    /// limit). The top-N list is payload only and does not affect it.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate_processes(&self, table: ProcessTable) -> SubsystemReport {
        let total_processes = table.entries.len();
        let (mut measured, skipped) = partition_outcomes(table.entries);

        if measured.is_empty() {
            return self.finish(
                SubsystemKind::Processes,
                Vec::new(),
                SubsystemDetail::Processes(ProcessSummary {
                    total_processes,
                    top_cpu: Vec::new(),
                }),
                skipped,
            );
        }

        let pressure = (total_processes as f64 / self.process_limit as f64) * 100.0;
        let samples = vec![
            MetricSample::count("process_count", total_processes as u64),
            MetricSample::percent("process_table_percent", pressure),
        ];

        top_by_cpu(&mut measured, self.top_processes);
        self.finish(
            SubsystemKind::Processes,
            samples,
            SubsystemDetail::Processes(ProcessSummary {
                total_processes,
                top_cpu: measured,
            }),
            skipped,
        )
    }

    /// Report for a subsystem whose provider call failed. It carries no
    /// status and is ignored by aggregation.
    #[must_use]
    pub fn evaluate_unavailable(&self, kind: SubsystemKind, error: &CollectionError) -> SubsystemReport {
        warn!(subsystem = %kind, "collection failed: {error}");
        SubsystemReport::unavailable(kind, SkipDiagnostic::new(kind.key(), error.to_string()))
    }
}

impl Default for SubsystemEvaluator {
    fn default() -> Self {
        Self::new(ThresholdSet::default())
    }
}

/// Sorts by CPU usage (highest first, PID as tie-break) and keeps `n` entries.
fn top_by_cpu(processes: &mut Vec<ProcessSample>, n: usize) {
    processes.sort_by(|a, b| {
        b.cpu_percent
            .total_cmp(&a.cpu_percent)
            .then_with(|| a.pid.cmp(&b.pid))
    });
    processes.truncate(n);
}
