use colored::Colorize;

use super::alert_fmt::sanitize_terminal;
use super::status_fmt::section_header;
use crate::domain::entities::Report;

/// Renders a report: headline summary, event count, then every non-empty section.
#[must_use]
pub fn format_report(report: &Report, range_label: &str) -> String {
    let mut lines = vec![
        section_header(&format!("Alert report · {range_label}")),
        sanitize_terminal(&report.summary).bold().to_string(),
        format!(
            "{} {}",
            "Events analyzed:".dimmed(),
            report.total_events_analyzed
        ),
    ];
    for (title, text) in report.sections() {
        lines.push(String::new());
        lines.push(title.cyan().bold().to_string());
        for line in sanitize_terminal(text).lines() {
            lines.push(format!("  {line}"));
        }
    }
    lines.join("\n")
}
