use thiserror::Error;

use crate::domain::entities::{
    CpuSample, ItemOutcome, MemorySample, NetworkSample, PartitionSample, ProcessTable, SystemInfo,
};

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("failed to collect system metrics: {0}")]
    MetricsUnavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

/// Source of raw per-subsystem samples.
///
/// Every call is independent: one failing subsystem does not prevent the
/// others from being sampled. Multi-item subsystems report unreadable items
/// as [`ItemOutcome::Skipped`] rather than failing the whole call.
pub trait MetricsProvider: Send + Sync {
    /// Sample CPU utilisation. Blocks for the provider's fixed sampling interval.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if CPU statistics are unavailable.
    fn cpu(&self) -> Result<CpuSample, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if memory statistics are unavailable.
    fn memory(&self) -> Result<MemorySample, CollectionError>;

    /// One outcome per mounted partition.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if the partition list itself cannot be read.
    fn partitions(&self) -> Result<Vec<ItemOutcome<PartitionSample>>, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if network counters are unavailable.
    fn network(&self) -> Result<NetworkSample, CollectionError>;

    /// # Errors
    ///
    /// Returns `CollectionError` if the process table cannot be listed.
    fn processes(&self) -> Result<ProcessTable, CollectionError>;
}

/// Describes the host. One implementation per target operating system,
/// chosen at build time.
pub trait PlatformInfoProvider: Send + Sync {
    fn platform_info(&self) -> SystemInfo;
}
