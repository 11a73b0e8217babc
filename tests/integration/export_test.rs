#![allow(clippy::expect_used)]

use chrono::{TimeZone, Utc};

use hostcheck::domain::entities::{
    CpuSample, DependencyCheck, DependencyStatus, HealthReport, ItemOutcome, MemorySample,
    PartitionSample, SystemInfo,
};
use hostcheck::domain::health::{ReportBuilder, SubsystemEvaluator};
use hostcheck::domain::ports::{CollectionError, ExportError, ReportSink};
use hostcheck::domain::value_objects::SubsystemKind;
use hostcheck::infrastructure::export::FileReportSink;
use hostcheck::presentation::cli::formatters::{render_structured, render_text};

const GIB: u64 = 1_073_741_824;

fn report() -> HealthReport {
    let evaluator = SubsystemEvaluator::default();
    let timestamp = Utc
        .with_ymd_and_hms(2025, 6, 30, 8, 15, 0)
        .single()
        .expect("valid timestamp");
    let system = SystemInfo {
        hostname: "db-02".into(),
        platform: "Linux".into(),
        platform_version: "Ubuntu 24.04".into(),
        architecture: "aarch64".into(),
        processor: "Neoverse-N1".into(),
        kernel_version: "6.8.0".into(),
        runtime_version: "hostcheck 0.1.0".into(),
    };

    ReportBuilder::new(timestamp, system)
        .subsystem(evaluator.evaluate_cpu(CpuSample {
            physical_cores: None,
            logical_cores: 2,
            percent_total: 33.333_333,
            percent_per_core: vec![30.0, 36.666_666],
            frequency_mhz: None,
        }))
        .subsystem(evaluator.evaluate_memory(MemorySample {
            total_bytes: 4 * GIB,
            available_bytes: GIB,
            used_bytes: 3 * GIB,
            percent_used: 75.0,
            swap_total_bytes: 0,
            swap_used_bytes: 0,
            swap_percent: 0.0,
        }))
        .subsystem(evaluator.evaluate_disk(vec![ItemOutcome::Measured(PartitionSample {
            device: "/dev/nvme0n1p2".into(),
            mount_point: "/".into(),
            filesystem: "ext4".into(),
            total_bytes: 50 * GIB,
            used_bytes: 10 * GIB,
            free_bytes: 40 * GIB,
            percent_used: 20.0,
        })]))
        .subsystem(evaluator.evaluate_unavailable(
            SubsystemKind::Network,
            &CollectionError::MetricsUnavailable("no network interfaces found".into()),
        ))
        .dependencies([DependencyCheck {
            name: "redis".into(),
            status: DependencyStatus::Failed("cannot connect to localhost:6379".into()),
        }])
        .build()
        .expect("report")
}

#[test]
fn structured_export_is_byte_identical_across_renders() {
    let report = report();
    for pretty in [true, false] {
        let first = render_structured(&report, pretty).expect("render");
        let second = render_structured(&report, pretty).expect("render");
        assert_eq!(first, second);
    }
}

#[test]
fn compact_export_matches_expected_document() {
    let bytes = render_structured(&report(), false).expect("render");
    let text = String::from_utf8(bytes).expect("utf-8");

    let expected = concat!(
        r#"{"timestamp":"2025-06-30T08:15:00Z","#,
        r#""system":{"hostname":"db-02","platform":"Linux","platform_version":"Ubuntu 24.04","#,
        r#""architecture":"aarch64","processor":"Neoverse-N1","kernel_version":"6.8.0","#,
        r#""runtime_version":"hostcheck 0.1.0"},"#,
        r#""cpu":{"cpu_count":null,"cpu_count_logical":2,"cpu_percent_total":33.33,"#,
        r#""cpu_percent_per_core":[30.0,36.67],"cpu_freq_mhz":null,"status":"HEALTHY"},"#,
        r#""memory":{"total_gb":4.0,"available_gb":1.0,"used_gb":3.0,"percent_used":75.0,"#,
        r#""swap_total_gb":0.0,"swap_used_gb":0.0,"swap_percent":0.0,"status":"WARNING"},"#,
        r#""disk":{"partitions":[{"device":"/dev/nvme0n1p2","mountpoint":"/","fstype":"ext4","#,
        r#""total_gb":50.0,"used_gb":10.0,"free_gb":40.0,"percent_used":20.0,"status":"HEALTHY"}],"#,
        r#""status":"HEALTHY"},"#,
        r#""network":{"status":"UNKNOWN","skipped":[{"item":"network","#,
        r#""reason":"failed to collect system metrics: no network interfaces found"}]},"#,
        r#""dependencies":[{"name":"redis","status":"FAILED","#,
        r#""message":"cannot connect to localhost:6379"}],"#,
        r#""overall_health":"WARNING"}"#,
        "\n"
    );
    assert_eq!(text, expected);
}

#[test]
fn export_writes_rendered_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("system_health_report.json");
    let bytes = render_structured(&report(), true).expect("render");

    FileReportSink.write(&path, &bytes).expect("export");

    let on_disk = std::fs::read(&path).expect("read back");
    assert_eq!(on_disk, bytes);
    let parsed: serde_json::Value = serde_json::from_slice(&on_disk).expect("valid json");
    assert_eq!(parsed["overall_health"], "WARNING");
}

#[test]
fn unwritable_destination_leaves_report_usable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no-such-dir").join("report.json");
    let report = report();
    let bytes = render_structured(&report, true).expect("render");

    let err = FileReportSink
        .write(&path, &bytes)
        .expect_err("missing parent directory");
    assert!(matches!(err, ExportError::Io { ref path, .. } if path.ends_with("report.json")));

    colored::control::set_override(false);
    let text = render_text(&report);
    assert!(text.contains("MEMORY - WARNING"));
    assert!(text.contains("NETWORK - UNKNOWN"));
    assert!(text.contains("OVERALL HEALTH: WARNING"));
    assert!(!path.exists());
}

#[test]
fn dependency_failure_does_not_affect_overall() {
    let report = report();
    assert_eq!(report.dependencies().len(), 1);
    assert_eq!(report.overall().as_str(), "WARNING");
}
