/// Outcome of one optional dependency reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Connected,
    Failed(String),
    Skipped(String),
}

impl DependencyStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "CONNECTED",
            Self::Failed(_) => "FAILED",
            Self::Skipped(_) => "SKIPPED",
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Connected => None,
            Self::Failed(msg) | Self::Skipped(msg) => Some(msg),
        }
    }
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{} ({msg})", self.as_str()),
            None => f.write_str(self.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCheck {
    pub name: String,
    pub status: DependencyStatus,
}
