use colored::{ColoredString, Colorize};

use crate::domain::value_objects::StatusLevel;

/// Status label coloured by severity; a missing status renders dimmed `UNKNOWN`.
#[must_use]
pub fn colorize_status(status: Option<StatusLevel>) -> ColoredString {
    let text = StatusLevel::label(status);
    match status {
        Some(StatusLevel::Critical) => text.red().bold(),
        Some(StatusLevel::Warning) => text.yellow().bold(),
        Some(StatusLevel::Healthy) => text.green(),
        None => text.dimmed(),
    }
}

#[must_use]
pub fn section_header(title: &str) -> String {
    let rule = "-".repeat(80);
    format!("\n{rule}\n{}\n{rule}\n", title.bold())
}

#[must_use]
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(80);
    format!("{rule}\n{}\n{rule}\n", title.bold().cyan())
}
