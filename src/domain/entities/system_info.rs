/// Static description of the host, rendered first in every report.
/// Field order is the export order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub platform_version: String,
    pub architecture: String,
    pub processor: String,
    pub kernel_version: String,
    pub runtime_version: String,
}

impl SystemInfo {
    /// Label/value pairs in export order, for the console report.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("Hostname", self.hostname.as_str()),
            ("Platform", self.platform.as_str()),
            ("Platform Version", self.platform_version.as_str()),
            ("Architecture", self.architecture.as_str()),
            ("Processor", self.processor.as_str()),
            ("Kernel Version", self.kernel_version.as_str()),
            ("Runtime Version", self.runtime_version.as_str()),
        ]
    }
}
