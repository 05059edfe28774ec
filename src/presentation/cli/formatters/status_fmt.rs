use colored::{ColoredString, Colorize};

use super::alert_fmt::sanitize_terminal;
use crate::application::config::NotificationConfig;
use crate::domain::rules::DashboardStats;
use crate::domain::value_objects::Severity;

#[must_use]
pub fn colorize_count(value: usize, alarming: bool) -> ColoredString {
    let text = value.to_string();
    if value == 0 {
        text.green()
    } else if alarming {
        text.red().bold()
    } else {
        text.yellow()
    }
}

#[must_use]
pub fn section_header(title: &str) -> String {
    let display_width = title.chars().count();
    format!("{}\n{}", title.bold().cyan(), "─".repeat(display_width).cyan())
}

pub fn print_section_header(title: &str) {
    println!("{}", section_header(title));
}

/// The four headline counters on one line.
#[must_use]
pub fn format_stats(stats: &DashboardStats) -> String {
    format!(
        "{} {}   {} {}   {} {}   {} {}",
        "Active:".bold(),
        colorize_count(stats.active, false),
        "Critical:".bold(),
        colorize_count(stats.critical_active, true),
        "Avg response:".bold(),
        stats.avg_response_label().cyan(),
        "Zones online:".bold(),
        stats.zones_online_label().cyan()
    )
}

/// Per-severity channel and sound flag.
#[must_use]
pub fn format_notification_settings(settings: &NotificationConfig) -> String {
    let mut lines = vec![section_header("Notifications")];
    for severity in Severity::ALL {
        let sound = if settings.rings_for(severity) {
            "sound on".green()
        } else {
            "sound off".dimmed()
        };
        lines.push(format!(
            "  {:<9} {:<24} {sound}",
            severity.as_str(),
            sanitize_terminal(settings.channels.get(severity))
        ));
    }
    lines.push(format!(
        "  {:<9} {}",
        "Default",
        sanitize_terminal(&settings.default_channel)
    ));
    lines.join("\n")
}
