pub mod collectors;
pub mod export;
pub mod probes;
