use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::domain::entities::Alert;
use crate::domain::rules::relative_time_label;
use crate::domain::value_objects::{AlertStatus, Severity};

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
///
/// Agent-supplied text ends up here, so nothing it contains may drive the terminal.
#[must_use]
pub fn sanitize_terminal(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '\x1b' && *c != '\x07')
        .collect()
}

#[must_use]
pub fn severity_badge(severity: Severity) -> String {
    let label = format!(" {} ", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => format!("{}", label.on_red().white().bold()),
        Severity::High => format!("{}", label.on_yellow().black().bold()),
        Severity::Medium => format!("{}", label.on_bright_yellow().black()),
        Severity::Low => format!("{}", label.on_blue().white()),
    }
}

#[must_use]
pub fn status_badge(status: AlertStatus) -> String {
    let label = format!("[{status}]");
    match status {
        AlertStatus::New => format!("{}", label.red().bold()),
        AlertStatus::Acknowledged => format!("{}", label.yellow()),
        AlertStatus::Resolved => format!("{}", label.green()),
    }
}

/// One alert as a block of lines: headline, message, action and lifecycle details.
#[must_use]
pub fn format_alert(alert: &Alert, now: DateTime<Utc>) -> String {
    let mut lines = vec![format!(
        "{} {} {} {} {}",
        severity_badge(alert.severity),
        alert.severity.emoji(),
        sanitize_terminal(&alert.distress_type).bold(),
        status_badge(alert.status),
        alert.id.dimmed()
    )];
    lines.push(format!(
        "  {} · {} · confidence {:.0}%",
        sanitize_terminal(&alert.zone).cyan(),
        relative_time_label(alert.timestamp, now),
        alert.confidence_score * 100.0
    ));
    if !alert.alert_message.is_empty() {
        lines.push(format!("  {}", sanitize_terminal(&alert.alert_message)));
    }
    if !alert.recommended_action.is_empty() {
        lines.push(format!(
            "  → {}",
            sanitize_terminal(&alert.recommended_action).italic()
        ));
    }
    if let Some(responder) = &alert.responder {
        lines.push(format!("  responder: {}", sanitize_terminal(responder)));
    }
    if let Some(notes) = &alert.resolution_notes {
        lines.push(format!("  notes: {}", sanitize_terminal(notes).dimmed()));
    }
    if let Some(minutes) = alert.response_time {
        lines.push(format!("  response time: {minutes}m"));
    }
    lines.join("\n")
}

/// The alert feed, blank line separated. Empty feed gets a friendly notice.
#[must_use]
pub fn format_alert_feed(alerts: &[Alert], now: DateTime<Utc>) -> String {
    if alerts.is_empty() {
        return format!("{}", "No alerts. All zones quiet.".green().bold());
    }
    alerts
        .iter()
        .map(|a| format_alert(a, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}
