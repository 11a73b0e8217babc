use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::units::{bytes_to_gb, bytes_to_mb, format_timestamp, round2};
use crate::domain::entities::{
    CpuSample, DependencyCheck, HealthReport, MemorySample, NetworkSample, PartitionEntry,
    ProcessSummary, SkipDiagnostic, SubsystemDetail, SubsystemReport, SystemInfo,
};
use crate::domain::ports::ExportError;
use crate::domain::value_objects::StatusLevel;

/// Structured (JSON) rendering of a report, newline-terminated.
///
/// Keys appear in report order: `timestamp`, `system`, one block per
/// subsystem in collection order, `dependencies` when any were checked, and
/// `overall_health` last. Percentages are rounded to two decimals and byte
/// counts are expressed in GB (network traffic in MB). Rendering the same
/// report twice gives identical bytes.
///
/// # Errors
///
/// Returns `ExportError::Serialize` if JSON encoding fails.
pub fn render_structured(report: &HealthReport, pretty: bool) -> Result<Vec<u8>, ExportError> {
    let view = ReportView(report);
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(&view)?
    } else {
        serde_json::to_vec(&view)?
    };
    bytes.push(b'\n');
    Ok(bytes)
}

struct ReportView<'a>(&'a HealthReport);

impl Serialize for ReportView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("timestamp", &format_timestamp(report.timestamp()))?;
        map.serialize_entry("system", &SystemView(report.system()))?;
        for subsystem in report.subsystems() {
            map.serialize_entry(subsystem.kind().key(), &block(subsystem))?;
        }
        if !report.dependencies().is_empty() {
            let deps: Vec<DependencyView<'_>> =
                report.dependencies().iter().map(DependencyView::from).collect();
            map.serialize_entry("dependencies", &deps)?;
        }
        map.serialize_entry("overall_health", report.overall().as_str())?;
        map.end()
    }
}

struct SystemView<'a>(&'a SystemInfo);

impl Serialize for SystemView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let info = self.0;
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry("hostname", &info.hostname)?;
        map.serialize_entry("platform", &info.platform)?;
        map.serialize_entry("platform_version", &info.platform_version)?;
        map.serialize_entry("architecture", &info.architecture)?;
        map.serialize_entry("processor", &info.processor)?;
        map.serialize_entry("kernel_version", &info.kernel_version)?;
        map.serialize_entry("runtime_version", &info.runtime_version)?;
        map.end()
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Block<'a> {
    Cpu(CpuBlock<'a>),
    Memory(MemoryBlock<'a>),
    Disk(DiskBlock<'a>),
    Network(NetworkBlock<'a>),
    Processes(ProcessBlock<'a>),
    Unavailable(UnavailableBlock<'a>),
}

fn is_empty(skipped: &[SkipDiagnostic]) -> bool {
    skipped.is_empty()
}

#[derive(Serialize)]
struct CpuBlock<'a> {
    cpu_count: Option<usize>,
    cpu_count_logical: usize,
    cpu_percent_total: f64,
    cpu_percent_per_core: Vec<f64>,
    cpu_freq_mhz: Option<u64>,
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct MemoryBlock<'a> {
    total_gb: f64,
    available_gb: f64,
    used_gb: f64,
    percent_used: f64,
    swap_total_gb: f64,
    swap_used_gb: f64,
    swap_percent: f64,
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct PartitionView<'a> {
    device: &'a str,
    mountpoint: &'a str,
    fstype: &'a str,
    total_gb: f64,
    used_gb: f64,
    free_gb: f64,
    percent_used: f64,
    status: StatusLevel,
}

#[derive(Serialize)]
struct DiskBlock<'a> {
    partitions: Vec<PartitionView<'a>>,
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct NetworkBlock<'a> {
    bytes_sent_mb: f64,
    bytes_recv_mb: f64,
    packets_sent: u64,
    packets_recv: u64,
    errors_in: u64,
    errors_out: u64,
    interface_count: usize,
    error_percent: f64,
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct ProcessView<'a> {
    pid: u32,
    name: &'a str,
    cpu_percent: f64,
    memory_percent: f64,
}

#[derive(Serialize)]
struct ProcessBlock<'a> {
    total_processes: usize,
    process_table_percent: Option<f64>,
    top_cpu_processes: Vec<ProcessView<'a>>,
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct UnavailableBlock<'a> {
    status: &'static str,
    skipped: &'a [SkipDiagnostic],
}

#[derive(Serialize)]
struct DependencyView<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl<'a> From<&'a DependencyCheck> for DependencyView<'a> {
    fn from(check: &'a DependencyCheck) -> Self {
        Self {
            name: &check.name,
            status: check.status.as_str(),
            message: check.status.message(),
        }
    }
}

fn block(report: &SubsystemReport) -> Block<'_> {
    let status = StatusLevel::label(report.status());
    let skipped = report.skipped();
    match report.detail() {
        SubsystemDetail::Cpu(cpu) => Block::Cpu(cpu_block(cpu, status, skipped)),
        SubsystemDetail::Memory(memory) => Block::Memory(memory_block(memory, status, skipped)),
        SubsystemDetail::Disk(partitions) => Block::Disk(DiskBlock {
            partitions: partitions.iter().map(partition_view).collect(),
            status,
            skipped,
        }),
        SubsystemDetail::Network(network) => {
            Block::Network(network_block(network, status, skipped))
        }
        SubsystemDetail::Processes(summary) => Block::Processes(process_block(
            summary,
            report.sample_value("process_table_percent"),
            status,
            skipped,
        )),
        SubsystemDetail::Unavailable => Block::Unavailable(UnavailableBlock { status, skipped }),
    }
}

fn cpu_block<'a>(cpu: &CpuSample, status: &'static str, skipped: &'a [SkipDiagnostic]) -> CpuBlock<'a> {
    CpuBlock {
        cpu_count: cpu.physical_cores,
        cpu_count_logical: cpu.logical_cores,
        cpu_percent_total: round2(cpu.percent_total),
        cpu_percent_per_core: cpu.percent_per_core.iter().copied().map(round2).collect(),
        cpu_freq_mhz: cpu.frequency_mhz,
        status,
        skipped,
    }
}

fn memory_block<'a>(
    memory: &MemorySample,
    status: &'static str,
    skipped: &'a [SkipDiagnostic],
) -> MemoryBlock<'a> {
    MemoryBlock {
        total_gb: bytes_to_gb(memory.total_bytes),
        available_gb: bytes_to_gb(memory.available_bytes),
        used_gb: bytes_to_gb(memory.used_bytes),
        percent_used: round2(memory.percent_used),
        swap_total_gb: bytes_to_gb(memory.swap_total_bytes),
        swap_used_gb: bytes_to_gb(memory.swap_used_bytes),
        swap_percent: round2(memory.swap_percent),
        status,
        skipped,
    }
}

fn partition_view(entry: &PartitionEntry) -> PartitionView<'_> {
    let p = &entry.partition;
    PartitionView {
        device: &p.device,
        mountpoint: &p.mount_point,
        fstype: &p.filesystem,
        total_gb: bytes_to_gb(p.total_bytes),
        used_gb: bytes_to_gb(p.used_bytes),
        free_gb: bytes_to_gb(p.free_bytes),
        percent_used: round2(p.percent_used),
        status: entry.status,
    }
}

fn network_block<'a>(
    network: &NetworkSample,
    status: &'static str,
    skipped: &'a [SkipDiagnostic],
) -> NetworkBlock<'a> {
    NetworkBlock {
        bytes_sent_mb: bytes_to_mb(network.bytes_sent),
        bytes_recv_mb: bytes_to_mb(network.bytes_recv),
        packets_sent: network.packets_sent,
        packets_recv: network.packets_recv,
        errors_in: network.errors_in,
        errors_out: network.errors_out,
        interface_count: network.interface_count,
        error_percent: round2(network.error_percent()),
        status,
        skipped,
    }
}

fn process_block<'a>(
    summary: &'a ProcessSummary,
    table_percent: Option<f64>,
    status: &'static str,
    skipped: &'a [SkipDiagnostic],
) -> ProcessBlock<'a> {
    ProcessBlock {
        total_processes: summary.total_processes,
        process_table_percent: table_percent.map(round2),
        top_cpu_processes: summary
            .top_cpu
            .iter()
            .map(|p| ProcessView {
                pid: p.pid,
                name: &p.name,
                cpu_percent: round2(p.cpu_percent),
                memory_percent: round2(p.memory_percent),
            })
            .collect(),
        status,
        skipped,
    }
}
