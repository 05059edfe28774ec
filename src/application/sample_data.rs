use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::entities::{Alert, Zone};
use crate::domain::value_objects::{AlertStatus, NotificationStatus, Severity};

struct SampleAlert {
    id: &'static str,
    distress_type: &'static str,
    severity: Severity,
    zone: &'static str,
    minutes_ago: i64,
    confidence: f64,
    action: &'static str,
    message: &'static str,
    status: AlertStatus,
    responder: Option<&'static str>,
    notes: Option<&'static str>,
    response_time: Option<u32>,
}

const SAMPLE_ALERTS: [SampleAlert; 7] = [
    SampleAlert {
        id: "sa-1",
        distress_type: "Medical Distress",
        severity: Severity::Critical,
        zone: "ICU Ward",
        minutes_ago: 5,
        confidence: 0.94,
        action: "Immediate medical response required",
        message: "Medical distress detected in ICU Ward",
        status: AlertStatus::New,
        responder: None,
        notes: None,
        response_time: None,
    },
    SampleAlert {
        id: "sa-2",
        distress_type: "Scream",
        severity: Severity::High,
        zone: "Room 204",
        minutes_ago: 15,
        confidence: 0.87,
        action: "Send nearest available staff",
        message: "Scream detected in Room 204",
        status: AlertStatus::Acknowledged,
        responder: Some("Nurse Johnson"),
        notes: None,
        response_time: None,
    },
    SampleAlert {
        id: "sa-3",
        distress_type: "Glass Break",
        severity: Severity::Medium,
        zone: "Hallway B",
        minutes_ago: 45,
        confidence: 0.72,
        action: "Investigate and secure area",
        message: "Glass breaking sound detected in Hallway B",
        status: AlertStatus::Resolved,
        responder: Some("Security Team"),
        notes: Some("Dropped equipment, area cleared"),
        response_time: Some(3),
    },
    SampleAlert {
        id: "sa-4",
        distress_type: "Aggression",
        severity: Severity::High,
        zone: "Emergency Bay",
        minutes_ago: 30,
        confidence: 0.89,
        action: "Security and de-escalation team to Emergency Bay",
        message: "Aggressive behavior detected in Emergency Bay",
        status: AlertStatus::Acknowledged,
        responder: Some("Security Lead Martinez"),
        notes: None,
        response_time: None,
    },
    SampleAlert {
        id: "sa-5",
        distress_type: "Medical Distress",
        severity: Severity::Critical,
        zone: "Room 112",
        minutes_ago: 60,
        confidence: 0.96,
        action: "Code Blue - immediate response",
        message: "Severe medical distress detected in Room 112",
        status: AlertStatus::Resolved,
        responder: Some("Dr. Chen"),
        notes: Some("Patient stabilized, transferred to ICU"),
        response_time: Some(2),
    },
    SampleAlert {
        id: "sa-6",
        distress_type: "Scream",
        severity: Severity::Medium,
        zone: "Lobby",
        minutes_ago: 90,
        confidence: 0.65,
        action: "Check lobby area for disturbance",
        message: "Possible scream detected in Lobby",
        status: AlertStatus::Resolved,
        responder: Some("Front Desk Staff"),
        notes: Some("Child crying, parent calmed situation"),
        response_time: Some(5),
    },
    SampleAlert {
        id: "sa-7",
        distress_type: "Glass Break",
        severity: Severity::Low,
        zone: "Hallway B",
        minutes_ago: 120,
        confidence: 0.52,
        action: "Monitor zone, low confidence event",
        message: "Possible glass break sound in Hallway B",
        status: AlertStatus::Resolved,
        responder: Some("Maintenance"),
        notes: Some("False positive - cart collision"),
        response_time: Some(8),
    },
];

const SAMPLE_ZONES: [(&str, &str, f64); 6] = [
    ("Room 204", "Patient Room - Floor 2", 0.7),
    ("Hallway B", "Main Corridor - Floor 1", 0.8),
    ("Lobby", "Main Entrance", 0.6),
    ("ICU Ward", "Intensive Care Unit", 0.9),
    ("Emergency Bay", "Emergency Department", 0.85),
    ("Room 112", "Patient Room - Floor 1", 0.7),
];

/// Demonstration alerts, most recent first, timestamped relative to `reference`.
#[must_use]
pub fn sample_alerts(reference: DateTime<Utc>) -> Vec<Alert> {
    SAMPLE_ALERTS
        .iter()
        .map(|s| Alert {
            id: s.id.to_string(),
            distress_type: s.distress_type.to_string(),
            severity: s.severity,
            zone: s.zone.to_string(),
            timestamp: reference - TimeDelta::minutes(s.minutes_ago),
            confidence_score: s.confidence,
            recommended_action: s.action.to_string(),
            alert_message: s.message.to_string(),
            notification_status: NotificationStatus::Sent,
            status: s.status,
            responder: s.responder.map(str::to_string),
            resolution_notes: s.notes.map(str::to_string),
            response_time: s.response_time,
        })
        .collect()
}

/// The facility's initial zones, all active.
#[must_use]
pub fn sample_zones() -> Vec<Zone> {
    SAMPLE_ZONES
        .iter()
        .map(|(name, description, sensitivity)| Zone::new(name, description, *sensitivity))
        .collect()
}
