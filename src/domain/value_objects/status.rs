use serde::{Deserialize, Serialize};

/// Severity tier assigned to a subsystem or to a whole report.
///
/// Variants are declared in ascending severity so the derived `Ord` gives
/// `Healthy < Warning < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLevel {
    Healthy,
    Warning,
    Critical,
}

impl StatusLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Label for a status that may be missing because nothing was measured.
    #[must_use]
    pub const fn label(status: Option<Self>) -> &'static str {
        match status {
            Some(level) => level.as_str(),
            None => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
