#![allow(clippy::expect_used)]

use hostcheck::application::services::HealthCheckService;
use hostcheck::domain::entities::{
    CpuSample, HealthReport, ItemOutcome, MemorySample, NetworkSample, PartitionSample,
    ProcessSample, ProcessTable, SubsystemDetail, SystemInfo,
};
use hostcheck::domain::health::{aggregate, classify_alert, AggregationError, SubsystemEvaluator};
use hostcheck::domain::ports::{CollectionError, MetricsProvider, PlatformInfoProvider};
use hostcheck::domain::value_objects::{StatusLevel, SubsystemKind, ThresholdSet, Thresholds};

// ---------------------------------------------------------------------------
// Scenario provider
// ---------------------------------------------------------------------------

const GIB: u64 = 1_073_741_824;

#[derive(Clone)]
struct Scenario {
    cpu: f64,
    memory: f64,
    /// `None` marks a partition whose mount point cannot be read.
    disks: Vec<Option<f64>>,
    fail_all: bool,
}

impl Scenario {
    fn new(cpu: f64, memory: f64, disks: &[f64]) -> Self {
        Self {
            cpu,
            memory,
            disks: disks.iter().copied().map(Some).collect(),
            fail_all: false,
        }
    }

    fn fail(&self, what: &str) -> Result<(), CollectionError> {
        if self.fail_all {
            Err(CollectionError::MetricsUnavailable(what.to_string()))
        } else {
            Ok(())
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn used_of(total: u64, percent: f64) -> u64 {
    (total as f64 * percent / 100.0) as u64
}

impl MetricsProvider for Scenario {
    fn cpu(&self) -> Result<CpuSample, CollectionError> {
        self.fail("cpu")?;
        Ok(CpuSample {
            physical_cores: Some(4),
            logical_cores: 8,
            percent_total: self.cpu,
            percent_per_core: vec![self.cpu; 8],
            frequency_mhz: Some(2_800),
        })
    }

    fn memory(&self) -> Result<MemorySample, CollectionError> {
        self.fail("memory")?;
        let total = 8 * GIB;
        let used = used_of(total, self.memory);
        Ok(MemorySample {
            total_bytes: total,
            available_bytes: total - used,
            used_bytes: used,
            percent_used: self.memory,
            swap_total_bytes: 0,
            swap_used_bytes: 0,
            swap_percent: 0.0,
        })
    }

    fn partitions(&self) -> Result<Vec<ItemOutcome<PartitionSample>>, CollectionError> {
        self.fail("partitions")?;
        Ok(self
            .disks
            .iter()
            .enumerate()
            .map(|(i, disk)| {
                let mount = format!("/mnt/disk{i}");
                match disk {
                    Some(percent) => {
                        let total = 100 * GIB;
                        let used = used_of(total, *percent);
                        ItemOutcome::Measured(PartitionSample {
                            device: format!("/dev/sd{i}"),
                            mount_point: mount,
                            filesystem: "ext4".into(),
                            total_bytes: total,
                            used_bytes: used,
                            free_bytes: total - used,
                            percent_used: *percent,
                        })
                    }
                    None => ItemOutcome::skipped(mount, "permission denied"),
                }
            })
            .collect())
    }

    fn network(&self) -> Result<NetworkSample, CollectionError> {
        self.fail("network")?;
        Ok(NetworkSample {
            bytes_sent: 1_000,
            bytes_recv: 2_000,
            packets_sent: 10,
            packets_recv: 20,
            errors_in: 0,
            errors_out: 0,
            interface_count: 1,
        })
    }

    fn processes(&self) -> Result<ProcessTable, CollectionError> {
        self.fail("processes")?;
        Ok(ProcessTable {
            entries: (1..=3)
                .map(|pid| {
                    ItemOutcome::Measured(ProcessSample {
                        pid,
                        name: format!("proc{pid}"),
                        cpu_percent: f64::from(pid),
                        memory_percent: 0.5,
                    })
                })
                .collect(),
        })
    }
}

struct TestHost;

impl PlatformInfoProvider for TestHost {
    fn platform_info(&self) -> SystemInfo {
        SystemInfo {
            hostname: "ci".into(),
            platform: "Linux".into(),
            platform_version: "test".into(),
            architecture: "x86_64".into(),
            processor: "virtual".into(),
            kernel_version: "6.1".into(),
            runtime_version: "hostcheck test".into(),
        }
    }
}

fn run(scenario: Scenario) -> Result<HealthReport, AggregationError> {
    run_with(scenario, SubsystemEvaluator::default())
}

fn run_with(
    scenario: Scenario,
    evaluator: SubsystemEvaluator,
) -> Result<HealthReport, AggregationError> {
    HealthCheckService::new(Box::new(scenario), Box::new(TestHost), evaluator).run_once()
}

fn status(report: &HealthReport, kind: SubsystemKind) -> Option<StatusLevel> {
    report.subsystem(kind).expect("subsystem present").status()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn all_healthy_host() {
    let report = run(Scenario::new(50.0, 50.0, &[40.0])).expect("report");

    for kind in SubsystemKind::ALL {
        assert_eq!(status(&report, kind), Some(StatusLevel::Healthy), "{kind}");
    }
    assert_eq!(report.overall(), StatusLevel::Healthy);
    assert_eq!(classify_alert(report.overall()).exit_code(), 0);
}

#[test]
fn warm_cpu_gives_warning() {
    let report = run(Scenario::new(70.0, 50.0, &[40.0])).expect("report");

    assert_eq!(status(&report, SubsystemKind::Cpu), Some(StatusLevel::Warning));
    assert_eq!(
        status(&report, SubsystemKind::Memory),
        Some(StatusLevel::Healthy)
    );
    assert_eq!(status(&report, SubsystemKind::Disk), Some(StatusLevel::Healthy));
    assert_eq!(report.overall(), StatusLevel::Warning);
}

#[test]
fn one_full_partition_makes_disk_critical() {
    let report = run(Scenario::new(20.0, 30.0, &[95.0, 10.0])).expect("report");

    let disk = report.subsystem(SubsystemKind::Disk).expect("disk");
    assert_eq!(disk.status(), Some(StatusLevel::Critical));
    let SubsystemDetail::Disk(partitions) = disk.detail() else {
        panic!("disk detail expected");
    };
    let statuses: Vec<StatusLevel> = partitions.iter().map(|p| p.status).collect();
    assert_eq!(statuses, vec![StatusLevel::Critical, StatusLevel::Healthy]);
    assert_eq!(report.overall(), StatusLevel::Critical);
}

#[test]
fn aggregating_nothing_is_an_error() {
    assert_eq!(aggregate(&[]), Err(AggregationError::NoSubsystems));
}

#[test]
fn every_provider_failing_produces_no_report() {
    let scenario = Scenario {
        fail_all: true,
        ..Scenario::new(0.0, 0.0, &[])
    };
    assert_eq!(run(scenario), Err(AggregationError::NothingMeasured(5)));
}

// ---------------------------------------------------------------------------
// Partial failure tolerance
// ---------------------------------------------------------------------------

#[test]
fn unreadable_partition_is_skipped_not_fatal() {
    let scenario = Scenario {
        disks: vec![Some(30.0), None, Some(45.0)],
        ..Scenario::new(10.0, 10.0, &[])
    };
    let report = run(scenario).expect("report");

    let disk = report.subsystem(SubsystemKind::Disk).expect("disk");
    let SubsystemDetail::Disk(partitions) = disk.detail() else {
        panic!("disk detail expected");
    };
    assert_eq!(partitions.len(), 2);
    assert_eq!(disk.skipped().len(), 1);
    assert_eq!(disk.skipped()[0].item, "/mnt/disk1");
    assert_eq!(disk.status(), Some(StatusLevel::Healthy));
}

#[test]
fn all_partitions_unreadable_leaves_disk_unknown() {
    let scenario = Scenario {
        disks: vec![None, None],
        ..Scenario::new(70.0, 10.0, &[])
    };
    let report = run(scenario).expect("report");

    let disk = report.subsystem(SubsystemKind::Disk).expect("disk");
    assert!(disk.is_empty());
    assert_eq!(disk.skipped().len(), 2);
    // An empty subsystem neither raises nor lowers the verdict.
    assert_eq!(report.overall(), StatusLevel::Warning);
}

#[test]
fn subsystems_keep_collection_order() {
    let report = run(Scenario::new(10.0, 10.0, &[10.0])).expect("report");
    let kinds: Vec<SubsystemKind> = report.subsystems().iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, SubsystemKind::ALL.to_vec());
}

#[test]
fn per_subsystem_thresholds_apply() {
    let thresholds = ThresholdSet {
        cpu: Thresholds::new(90.0, 95.0).expect("valid"),
        ..ThresholdSet::default()
    };
    let report = run_with(
        Scenario::new(85.0, 10.0, &[10.0]),
        SubsystemEvaluator::new(thresholds),
    )
    .expect("report");

    assert_eq!(status(&report, SubsystemKind::Cpu), Some(StatusLevel::Healthy));
    assert_eq!(report.overall(), StatusLevel::Healthy);
}

#[test]
fn top_processes_truncation_does_not_change_status() {
    let report = run_with(
        Scenario::new(10.0, 10.0, &[10.0]),
        SubsystemEvaluator::default().with_top_processes(1),
    )
    .expect("report");

    let processes = report.subsystem(SubsystemKind::Processes).expect("processes");
    let SubsystemDetail::Processes(summary) = processes.detail() else {
        panic!("process detail expected");
    };
    assert_eq!(summary.total_processes, 3);
    assert_eq!(summary.top_cpu.len(), 1);
    assert_eq!(summary.top_cpu[0].pid, 3);
    assert_eq!(processes.status(), Some(StatusLevel::Healthy));
}
