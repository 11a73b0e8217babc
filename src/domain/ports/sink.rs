use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for a fully rendered structured report.
pub trait ReportSink: Send + Sync {
    /// Write the complete byte payload to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the destination is not writable.
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ExportError>;
}
