pub mod probe;
pub mod provider;
pub mod sink;

pub use probe::DependencyProbe;
pub use provider::{CollectionError, MetricsProvider, PlatformInfoProvider};
pub use sink::{ExportError, ReportSink};
