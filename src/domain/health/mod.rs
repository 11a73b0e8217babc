//! Classification and aggregation pipeline: raw samples in, one immutable
//! [`HealthReport`](crate::domain::entities::HealthReport) out. Pure, no I/O.

pub mod aggregate;
pub mod alert;
pub mod builder;
pub mod classify;
pub mod evaluator;

pub use aggregate::{aggregate, AggregationError};
pub use alert::{classify_alert, Alert};
pub use builder::{build_report, ReportBuilder};
pub use classify::classify;
pub use evaluator::{SubsystemEvaluator, DEFAULT_PROCESS_LIMIT, DEFAULT_TOP_PROCESSES};
