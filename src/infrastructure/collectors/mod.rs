mod disk_filter;
pub mod sysinfo_provider;

pub use sysinfo_provider::SysinfoProvider;
