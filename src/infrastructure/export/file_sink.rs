use std::path::Path;

use crate::domain::ports::sink::{ExportError, ReportSink};

/// Writes the rendered report to the local filesystem in a single call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReportSink;

impl ReportSink for FileReportSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        std::fs::write(path, bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "report written");
        Ok(())
    }
}
