/// One monitored resource domain. Declaration order is the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemKind {
    Cpu,
    Memory,
    Disk,
    Network,
    Processes,
}

impl SubsystemKind {
    /// All kinds in collection order.
    pub const ALL: [Self; 5] = [
        Self::Cpu,
        Self::Memory,
        Self::Disk,
        Self::Network,
        Self::Processes,
    ];

    /// Key used for this subsystem's block in the structured export.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Network => "network",
            Self::Processes => "processes",
        }
    }
}

impl std::fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU"),
            Self::Memory => write!(f, "MEMORY"),
            Self::Disk => write!(f, "DISK"),
            Self::Network => write!(f, "NETWORK"),
            Self::Processes => write!(f, "PROCESSES"),
        }
    }
}
