use crate::domain::value_objects::Unit;

/// A named numeric measurement, e.g. `cpu_percent_total` or
/// `disk_percent_used:/home`.
///
/// Inside a [`SubsystemReport`](super::SubsystemReport) every percent-unit
/// sample is a classification input; byte and count samples are informational.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    name: String,
    value: f64,
    unit: Unit,
}

impl MetricSample {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
        }
    }

    #[must_use]
    pub fn percent(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value, Unit::Percent)
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bytes(name: impl Into<String>, value: u64) -> Self {
        Self::new(name, value as f64, Unit::Bytes)
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn count(name: impl Into<String>, value: u64) -> Self {
        Self::new(name, value as f64, Unit::Count)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub fn is_percent(&self) -> bool {
        self.unit == Unit::Percent
    }
}
