use colored::Colorize;

use crate::domain::health::Alert;
use crate::domain::value_objects::StatusLevel;

/// Final verdict line, tag coloured by level.
#[must_use]
pub fn format_alert(alert: &Alert) -> String {
    let tag = match alert.level {
        StatusLevel::Critical => alert.tag.red().bold(),
        StatusLevel::Warning => alert.tag.yellow().bold(),
        StatusLevel::Healthy => alert.tag.green().bold(),
    };
    format!("{tag} {}", alert.message)
}
