/// Unit tag carried by every [`MetricSample`](crate::domain::entities::MetricSample).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Percent,
    Bytes,
    Count,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent => write!(f, "%"),
            Self::Bytes => write!(f, "B"),
            Self::Count => write!(f, "count"),
        }
    }
}
