use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::subsystem::SubsystemKind;

const DEFAULT_WARNING: f64 = 60.0;
const DEFAULT_CRITICAL: f64 = 80.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("threshold {name} must be within [0, 100], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("warning cutoff ({warning}) must be below critical cutoff ({critical})")]
    InvalidOrdering { warning: f64, critical: f64 },
}

/// Warning/critical percent cutoffs for one subsystem kind.
///
/// Only constructible through [`Thresholds::new`], so every value satisfies
/// `0 <= warning < critical <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    warning: f64,
    critical: f64,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns `ConfigurationError` if either cutoff is outside `[0, 100]`
    /// (or not a number) or if `warning >= critical`.
    pub fn new(warning: f64, critical: f64) -> Result<Self, ConfigurationError> {
        check_range("warning", warning)?;
        check_range("critical", critical)?;
        if warning >= critical {
            return Err(ConfigurationError::InvalidOrdering { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    #[must_use]
    pub const fn warning(&self) -> f64 {
        self.warning
    }

    #[must_use]
    pub const fn critical(&self) -> f64 {
        self.critical
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: DEFAULT_WARNING,
            critical: DEFAULT_CRITICAL,
        }
    }
}

fn check_range(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::OutOfRange { name, value })
    }
}

/// Unvalidated form used while deserializing; missing cutoffs take the defaults.
#[derive(Deserialize)]
struct RawThresholds {
    #[serde(default = "default_warning")]
    warning: f64,
    #[serde(default = "default_critical")]
    critical: f64,
}

const fn default_warning() -> f64 {
    DEFAULT_WARNING
}

const fn default_critical() -> f64 {
    DEFAULT_CRITICAL
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = ConfigurationError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.warning, raw.critical)
    }
}

/// Per-subsystem thresholds. Every kind defaults to 60/80 and can be
/// overridden independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    #[serde(default)]
    pub cpu: Thresholds,
    #[serde(default)]
    pub memory: Thresholds,
    #[serde(default)]
    pub disk: Thresholds,
    #[serde(default)]
    pub network: Thresholds,
    #[serde(default)]
    pub processes: Thresholds,
}

impl ThresholdSet {
    #[must_use]
    pub const fn for_kind(&self, kind: SubsystemKind) -> &Thresholds {
        match kind {
            SubsystemKind::Cpu => &self.cpu,
            SubsystemKind::Memory => &self.memory,
            SubsystemKind::Disk => &self.disk,
            SubsystemKind::Network => &self.network,
            SubsystemKind::Processes => &self.processes,
        }
    }
}
