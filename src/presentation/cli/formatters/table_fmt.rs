use colored::Colorize;

use super::alert_fmt::sanitize_terminal;
use crate::domain::entities::{Alert, Zone};
use crate::domain::value_objects::{AlertStatus, ZoneStatus};

fn clip(text: &str, width: usize) -> String {
    sanitize_terminal(text).chars().take(width).collect()
}

/// Formats alert history as an aligned table, in the order given.
#[must_use]
pub fn format_history_table(alerts: &[Alert]) -> String {
    let header = format!(
        "{:<14} {:<17} {:<9} {:<16} {:<17} {:<13} {:>5} {:<18}",
        "ID", "TIME", "SEVERITY", "TYPE", "ZONE", "STATUS", "RESP", "RESPONDER"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];
    for a in alerts {
        let response = a
            .response_time
            .map_or_else(|| "--".to_string(), |m| format!("{m}m"));
        let row = format!(
            "{:<14} {:<17} {:<9} {:<16} {:<17} {:<13} {:>5} {:<18}",
            clip(&a.id, 13),
            a.timestamp.format("%Y-%m-%d %H:%M"),
            a.severity,
            clip(&a.distress_type, 15),
            clip(&a.zone, 16),
            a.status,
            response,
            clip(a.responder.as_deref().unwrap_or("-"), 17),
        );
        if a.status == AlertStatus::New {
            rows.push(row.bold().to_string());
        } else {
            rows.push(row);
        }
    }
    rows.join("\n")
}

/// Formats zones with their computed status.
#[must_use]
pub fn format_zone_status_table(zones: &[(Zone, ZoneStatus)]) -> String {
    let header = format!(
        "{:<20} {:<28} {:>6} {:<9}",
        "ZONE", "DESCRIPTION", "SENS", "STATUS"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];
    for (zone, status) in zones {
        let row = format!(
            "{:<20} {:<28} {:>6.2} {:<9}",
            clip(&zone.name, 19),
            clip(&zone.description, 27),
            zone.sensitivity,
            status.to_string().to_uppercase()
        );
        rows.push(match status {
            ZoneStatus::Critical => row.red().bold().to_string(),
            ZoneStatus::Recent => row.yellow().to_string(),
            ZoneStatus::Clear => row,
        });
    }
    rows.join("\n")
}

/// Formats the zone registry, inactive zones included.
#[must_use]
pub fn format_zone_registry(zones: &[Zone]) -> String {
    let header = format!(
        "{:<36} {:<20} {:<28} {:>6} {:<8}",
        "ID", "ZONE", "DESCRIPTION", "SENS", "ACTIVE"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];
    for zone in zones {
        let row = format!(
            "{:<36} {:<20} {:<28} {:>6.2} {:<8}",
            clip(&zone.id, 35),
            clip(&zone.name, 19),
            clip(&zone.description, 27),
            zone.sensitivity,
            if zone.active { "yes" } else { "no" }
        );
        if zone.active {
            rows.push(row);
        } else {
            rows.push(row.dimmed().to_string());
        }
    }
    rows.join("\n")
}
