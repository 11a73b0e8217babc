use serde::Serialize;

/// Raw CPU measurement handed over by a metrics provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSample {
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub percent_total: f64,
    pub percent_per_core: Vec<f64>,
    pub frequency_mhz: Option<u64>,
}

/// Raw memory and swap measurement, in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub percent_used: f64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
    pub swap_percent: f64,
}

/// Usage of one mounted partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSample {
    pub device: String,
    pub mount_point: String,
    pub filesystem: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent_used: f64,
}

/// Cumulative network counters over all interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSample {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    pub interface_count: usize,
}

impl NetworkSample {
    /// Share of packets that hit an error, `0.0` when no packets were seen.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn error_percent(&self) -> f64 {
        let packets = self.packets_sent.saturating_add(self.packets_recv);
        if packets == 0 {
            return 0.0;
        }
        let errors = self.errors_in.saturating_add(self.errors_out);
        (errors as f64 / packets as f64) * 100.0
    }
}

/// One entry of the process table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// Every process the provider listed, read or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessTable {
    pub entries: Vec<ItemOutcome<ProcessSample>>,
}

/// Record that one item of a multi-item subsystem could not be measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipDiagnostic {
    pub item: String,
    pub reason: String,
}

impl SkipDiagnostic {
    #[must_use]
    pub fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SkipDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.item, self.reason)
    }
}

/// Per-item read result: either a sample or the reason it was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome<T> {
    Measured(T),
    Skipped(SkipDiagnostic),
}

impl<T> ItemOutcome<T> {
    #[must_use]
    pub fn skipped(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Skipped(SkipDiagnostic::new(item, reason))
    }
}

/// Splits outcomes into measured items and skip diagnostics, keeping order.
#[must_use]
pub fn partition_outcomes<T>(outcomes: Vec<ItemOutcome<T>>) -> (Vec<T>, Vec<SkipDiagnostic>) {
    let mut measured = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Measured(item) => measured.push(item),
            ItemOutcome::Skipped(diagnostic) => skipped.push(diagnostic),
        }
    }
    (measured, skipped)
}
