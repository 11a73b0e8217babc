use std::fmt::Write;

use super::status_fmt::{banner, colorize_status, section_header};
use super::units::{bytes_to_gb, bytes_to_mb, format_timestamp, round2};
use crate::domain::entities::{
    CpuSample, DependencyCheck, HealthReport, MemorySample, NetworkSample, PartitionEntry,
    ProcessSummary, SkipDiagnostic, SubsystemDetail, SubsystemReport,
};

/// Console rendering of a report.
///
/// Sections follow the report's own order (system, then each subsystem as
/// collected, then dependencies) and end with the overall verdict, the same
/// order as the structured export.
#[must_use]
pub fn render_text(report: &HealthReport) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &HealthReport) -> std::fmt::Result {
    out.push_str(&banner(&format!(
        "SYSTEM HEALTH REPORT - {}",
        format_timestamp(report.timestamp())
    )));

    out.push_str(&section_header("SYSTEM INFORMATION"));
    for (label, value) in report.system().entries() {
        writeln!(out, "  {label}: {value}")?;
    }

    for subsystem in report.subsystems() {
        write_subsystem(out, subsystem)?;
    }

    if !report.dependencies().is_empty() {
        write_dependencies(out, report.dependencies())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(
        out,
        "OVERALL HEALTH: {}",
        colorize_status(Some(report.overall()))
    )?;
    writeln!(out, "{}", "=".repeat(80))
}

fn write_subsystem(out: &mut String, report: &SubsystemReport) -> std::fmt::Result {
    out.push_str(&section_header(&format!(
        "{} - {}",
        report.kind(),
        colorize_status(report.status())
    )));

    match report.detail() {
        SubsystemDetail::Cpu(cpu) => write_cpu(out, cpu)?,
        SubsystemDetail::Memory(memory) => write_memory(out, memory)?,
        SubsystemDetail::Disk(partitions) => write_disk(out, partitions)?,
        SubsystemDetail::Network(network) => write_network(out, network)?,
        SubsystemDetail::Processes(summary) => write_processes(
            out,
            summary,
            report.sample_value("process_table_percent"),
        )?,
        SubsystemDetail::Unavailable => {}
    }
    write_skipped(out, report.skipped())
}

fn write_cpu(out: &mut String, cpu: &CpuSample) -> std::fmt::Result {
    match cpu.physical_cores {
        Some(cores) => writeln!(out, "  Physical Cores: {cores}")?,
        None => writeln!(out, "  Physical Cores: unknown")?,
    }
    writeln!(out, "  Logical Cores: {}", cpu.logical_cores)?;
    writeln!(out, "  Total Usage: {}%", round2(cpu.percent_total))?;
    let per_core: Vec<String> = cpu
        .percent_per_core
        .iter()
        .map(|pct| format!("{}%", round2(*pct)))
        .collect();
    writeln!(out, "  Per-Core Usage: {}", per_core.join(", "))?;
    match cpu.frequency_mhz {
        Some(mhz) => writeln!(out, "  Frequency: {mhz} MHz"),
        None => writeln!(out, "  Frequency: unknown"),
    }
}

fn write_memory(out: &mut String, memory: &MemorySample) -> std::fmt::Result {
    writeln!(out, "  Total: {} GB", bytes_to_gb(memory.total_bytes))?;
    writeln!(out, "  Available: {} GB", bytes_to_gb(memory.available_bytes))?;
    writeln!(out, "  Used: {} GB", bytes_to_gb(memory.used_bytes))?;
    writeln!(out, "  Usage: {}%", round2(memory.percent_used))?;
    writeln!(out, "  Swap Total: {} GB", bytes_to_gb(memory.swap_total_bytes))?;
    writeln!(out, "  Swap Used: {} GB", bytes_to_gb(memory.swap_used_bytes))?;
    writeln!(out, "  Swap Usage: {}%", round2(memory.swap_percent))
}

fn write_disk(out: &mut String, partitions: &[PartitionEntry]) -> std::fmt::Result {
    for entry in partitions {
        let p = &entry.partition;
        writeln!(
            out,
            "  Mount Point: {} - {}",
            p.mount_point,
            colorize_status(Some(entry.status))
        )?;
        writeln!(out, "    Device: {} | Filesystem: {}", p.device, p.filesystem)?;
        writeln!(
            out,
            "    Total: {} GB | Used: {} GB | Free: {} GB | Usage: {}%",
            bytes_to_gb(p.total_bytes),
            bytes_to_gb(p.used_bytes),
            bytes_to_gb(p.free_bytes),
            round2(p.percent_used)
        )?;
    }
    Ok(())
}

fn write_network(out: &mut String, network: &NetworkSample) -> std::fmt::Result {
    writeln!(out, "  Data Sent: {} MB", bytes_to_mb(network.bytes_sent))?;
    writeln!(out, "  Data Received: {} MB", bytes_to_mb(network.bytes_recv))?;
    writeln!(out, "  Packets Sent: {}", network.packets_sent)?;
    writeln!(out, "  Packets Received: {}", network.packets_recv)?;
    writeln!(out, "  Errors In: {}", network.errors_in)?;
    writeln!(out, "  Errors Out: {}", network.errors_out)?;
    writeln!(out, "  Interfaces: {}", network.interface_count)?;
    writeln!(out, "  Error Rate: {}%", round2(network.error_percent()))
}

fn write_processes(
    out: &mut String,
    summary: &ProcessSummary,
    table_percent: Option<f64>,
) -> std::fmt::Result {
    writeln!(out, "  Total Processes: {}", summary.total_processes)?;
    match table_percent {
        Some(pct) => writeln!(out, "  Process Table Usage: {}%", round2(pct))?,
        None => writeln!(out, "  Process Table Usage: unknown")?,
    }
    if !summary.top_cpu.is_empty() {
        writeln!(out, "  Top CPU Consumers:")?;
    }
    for proc_info in &summary.top_cpu {
        writeln!(
            out,
            "    PID: {} | Name: {} | CPU: {}% | MEM: {}%",
            proc_info.pid,
            proc_info.name,
            round2(proc_info.cpu_percent),
            round2(proc_info.memory_percent)
        )?;
    }
    Ok(())
}

fn write_skipped(out: &mut String, skipped: &[SkipDiagnostic]) -> std::fmt::Result {
    for diagnostic in skipped {
        writeln!(out, "  Skipped {diagnostic}")?;
    }
    Ok(())
}

fn write_dependencies(out: &mut String, checks: &[DependencyCheck]) -> std::fmt::Result {
    out.push_str(&section_header("DEPENDENCIES"));
    for check in checks {
        writeln!(out, "  {}: {}", check.name, check.status)?;
    }
    Ok(())
}
