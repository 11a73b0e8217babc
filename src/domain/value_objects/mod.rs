pub mod status;
pub mod subsystem;
pub mod thresholds;
pub mod unit;

pub use status::StatusLevel;
pub use subsystem::SubsystemKind;
pub use thresholds::{ConfigurationError, ThresholdSet, Thresholds};
pub use unit::Unit;
