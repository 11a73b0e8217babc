use crate::domain::value_objects::StatusLevel;

/// User-facing verdict line derived from the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub level: StatusLevel,
    pub tag: &'static str,
    pub message: &'static str,
}

impl Alert {
    /// Process exit code a caller may use for this verdict.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self.level {
            StatusLevel::Healthy => 0,
            StatusLevel::Warning => 1,
            StatusLevel::Critical => 2,
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag, self.message)
    }
}

/// Pure mapping from overall status to alert text. Never exits the process.
#[must_use]
pub const fn classify_alert(overall: StatusLevel) -> Alert {
    match overall {
        StatusLevel::Critical => Alert {
            level: overall,
            tag: "[ALERT]",
            message: "System is in CRITICAL state! Immediate attention required.",
        },
        StatusLevel::Warning => Alert {
            level: overall,
            tag: "[WARNING]",
            message: "System resources are running high. Monitor closely.",
        },
        StatusLevel::Healthy => Alert {
            level: overall,
            tag: "[OK]",
            message: "System is healthy.",
        },
    }
}
