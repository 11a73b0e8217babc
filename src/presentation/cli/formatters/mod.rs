pub mod alert_fmt;
pub mod status_fmt;
pub mod structured_fmt;
pub mod text_fmt;
pub mod units;

pub use alert_fmt::format_alert;
pub use structured_fmt::render_structured;
pub use text_fmt::render_text;
