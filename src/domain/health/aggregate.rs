use thiserror::Error;

use crate::domain::entities::SubsystemReport;
use crate::domain::value_objects::StatusLevel;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {
    #[error("no subsystem reports to aggregate")]
    NoSubsystems,
    #[error("none of the {0} subsystem reports contained a measurement")]
    NothingMeasured(usize),
}

/// Worst-case reduction over the reports that measured something.
///
/// Empty reports are neutral: they neither raise nor lower the verdict.
///
/// # Errors
///
/// Returns `AggregationError::NoSubsystems` for an empty slice and
/// `AggregationError::NothingMeasured` when every report is empty.
pub fn aggregate(reports: &[SubsystemReport]) -> Result<StatusLevel, AggregationError> {
    if reports.is_empty() {
        return Err(AggregationError::NoSubsystems);
    }
    reports
        .iter()
        .filter_map(SubsystemReport::status)
        .max()
        .ok_or(AggregationError::NothingMeasured(reports.len()))
}
