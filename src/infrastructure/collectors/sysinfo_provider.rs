use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use sysinfo::{Disks, Networks, ProcessStatus, System};

use super::disk_filter::is_pseudo_filesystem;
use crate::domain::entities::{
    CpuSample, ItemOutcome, MemorySample, NetworkSample, PartitionSample, ProcessSample,
    ProcessTable, SystemInfo,
};
use crate::domain::ports::provider::{CollectionError, MetricsProvider, PlatformInfoProvider};

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Returns the arithmetic mean of `per_core` usages, or `0.0` when the slice is empty.
#[allow(clippy::cast_precision_loss)]
fn avg_cpu_usage(per_core: &[f64]) -> f64 {
    let count = per_core.len();
    if count > 0 {
        per_core.iter().sum::<f64>() / count as f64
    } else {
        0.0
    }
}

/// Metrics provider backed by the `sysinfo` crate.
///
/// Uses `Mutex<System>` for interior mutability since `MetricsProvider`
/// takes `&self` but `sysinfo::System` needs `&mut self` for refresh.
/// Clones share the same `System`.
#[derive(Clone)]
pub struct SysinfoProvider {
    sys: Arc<Mutex<System>>,
    cpu_interval: Duration,
}

impl SysinfoProvider {
    /// Creates a provider that observes the CPU for `cpu_interval` per
    /// sample. Intervals shorter than sysinfo's minimum are raised to it.
    #[must_use]
    pub fn new(cpu_interval: Duration) -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            cpu_interval: cpu_interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, System>, CollectionError> {
        self.sys
            .lock()
            .map_err(|e| CollectionError::MetricsUnavailable(format!("system lock poisoned: {e}")))
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl MetricsProvider for SysinfoProvider {
    fn cpu(&self) -> Result<CpuSample, CollectionError> {
        let mut sys = self.lock()?;
        sys.refresh_cpu_usage();
        std::thread::sleep(self.cpu_interval);
        sys.refresh_cpu_usage();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CollectionError::MetricsUnavailable(
                "no CPU reported".to_string(),
            ));
        }
        let percent_per_core: Vec<f64> = cpus.iter().map(|c| f64::from(c.cpu_usage())).collect();
        let frequencies: Vec<u64> = cpus
            .iter()
            .map(sysinfo::Cpu::frequency)
            .filter(|&mhz| mhz > 0)
            .collect();
        let frequency_mhz = if frequencies.is_empty() {
            None
        } else {
            Some(frequencies.iter().sum::<u64>() / frequencies.len() as u64)
        };

        Ok(CpuSample {
            physical_cores: sys.physical_core_count(),
            logical_cores: cpus.len(),
            percent_total: avg_cpu_usage(&percent_per_core),
            percent_per_core,
            frequency_mhz,
        })
    }

    fn memory(&self) -> Result<MemorySample, CollectionError> {
        let mut sys = self.lock()?;
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(CollectionError::MetricsUnavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        let used = sys.used_memory();
        let swap_total = sys.total_swap();
        let swap_used = sys.used_swap();

        Ok(MemorySample {
            total_bytes: total,
            available_bytes: sys.available_memory(),
            used_bytes: used,
            percent_used: safe_percent(used, total),
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_used,
            swap_percent: safe_percent(swap_used, swap_total),
        })
    }

    fn partitions(&self) -> Result<Vec<ItemOutcome<PartitionSample>>, CollectionError> {
        let disks = Disks::new_with_refreshed_list();

        Ok(disks
            .list()
            .iter()
            .filter(|d| !is_pseudo_filesystem(&d.file_system().to_string_lossy()))
            .map(|disk| {
                let mount_point = disk.mount_point().to_string_lossy().to_string();

                if let Err(e) = std::fs::metadata(disk.mount_point()) {
                    let reason = if e.kind() == std::io::ErrorKind::PermissionDenied {
                        CollectionError::PermissionDenied(mount_point.clone()).to_string()
                    } else {
                        e.to_string()
                    };
                    return ItemOutcome::skipped(mount_point, reason);
                }
                let total = disk.total_space();
                if total == 0 {
                    return ItemOutcome::skipped(mount_point, "reported zero capacity");
                }
                let free = disk.available_space();
                let used = total.saturating_sub(free);

                ItemOutcome::Measured(PartitionSample {
                    device: disk.name().to_string_lossy().to_string(),
                    mount_point,
                    filesystem: disk.file_system().to_string_lossy().to_string(),
                    total_bytes: total,
                    used_bytes: used,
                    free_bytes: free,
                    percent_used: safe_percent(used, total).clamp(0.0, 100.0),
                })
            })
            .collect())
    }

    fn network(&self) -> Result<NetworkSample, CollectionError> {
        let networks = Networks::new_with_refreshed_list();

        let mut sample = NetworkSample {
            bytes_sent: 0,
            bytes_recv: 0,
            packets_sent: 0,
            packets_recv: 0,
            errors_in: 0,
            errors_out: 0,
            interface_count: 0,
        };
        for data in networks.list().values() {
            sample.bytes_sent = sample.bytes_sent.saturating_add(data.total_transmitted());
            sample.bytes_recv = sample.bytes_recv.saturating_add(data.total_received());
            sample.packets_sent = sample
                .packets_sent
                .saturating_add(data.total_packets_transmitted());
            sample.packets_recv = sample
                .packets_recv
                .saturating_add(data.total_packets_received());
            sample.errors_in = sample
                .errors_in
                .saturating_add(data.total_errors_on_received());
            sample.errors_out = sample
                .errors_out
                .saturating_add(data.total_errors_on_transmitted());
            sample.interface_count += 1;
        }

        if sample.interface_count == 0 {
            return Err(CollectionError::MetricsUnavailable(
                "no network interfaces found".to_string(),
            ));
        }
        Ok(sample)
    }

    fn processes(&self) -> Result<ProcessTable, CollectionError> {
        let mut sys = self.lock()?;
        sys.refresh_all();

        let total_memory = sys.total_memory();
        let entries = sys
            .processes()
            .values()
            .map(|proc_info| {
                let pid = proc_info.pid().as_u32();
                if process_vanished(pid, proc_info.status()) {
                    return ItemOutcome::skipped(format!("pid {pid}"), "process exited during scan");
                }
                ItemOutcome::Measured(ProcessSample {
                    pid,
                    name: proc_info.name().to_string_lossy().to_string(),
                    cpu_percent: f64::from(proc_info.cpu_usage()),
                    memory_percent: safe_percent(proc_info.memory(), total_memory),
                })
            })
            .collect();

        Ok(ProcessTable { entries })
    }
}

/// Whether a process listed by the last refresh is already gone.
///
/// Best effort: `refresh_all` drops most exited processes, so this only
/// catches ones that exit between the refresh and the read. On Linux the
/// `/proc/<pid>` entry is checked as well.
fn process_vanished(pid: u32, status: ProcessStatus) -> bool {
    if matches!(status, ProcessStatus::Dead) {
        return true;
    }
    cfg!(target_os = "linux") && !std::path::Path::new(&format!("/proc/{pid}")).exists()
}

const UNKNOWN: &str = "unknown";

impl PlatformInfoProvider for SysinfoProvider {
    fn platform_info(&self) -> SystemInfo {
        let processor = self
            .sys
            .lock()
            .ok()
            .and_then(|sys| sys.cpus().first().map(|cpu| cpu.brand().trim().to_string()))
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        SystemInfo {
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            platform_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            architecture: std::env::consts::ARCH.to_string(),
            processor,
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            runtime_version: format!("hostcheck {}", env!("CARGO_PKG_VERSION")),
        }
    }
}
