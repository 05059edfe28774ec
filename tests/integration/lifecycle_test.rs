#![allow(clippy::expect_used)]

use chrono::{DateTime, TimeDelta, Utc};

use wardwatch::domain::entities::{Alert, Report, Zone};
use wardwatch::domain::rules::history::selector;
use wardwatch::domain::rules::{HistoryCriteria, ZoneStatusResolver, display_order, filter_history};
use wardwatch::domain::value_objects::{
    AlertStatus, NotificationStatus, ResponseTimePolicy, Severity, ZoneStatus,
};
use wardwatch::infrastructure::persistence::{AlertStore, LifecycleSettings, StoreError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn at(hhmm: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&format!("2026-02-25T{hhmm}:00Z"))
        .expect("valid time")
        .with_timezone(&Utc)
}

fn alert(id: &str, zone: &str, severity: Severity, status: AlertStatus, ts: DateTime<Utc>) -> Alert {
    let responder = (status != AlertStatus::New).then(|| "Nurse Johnson".to_string());
    let resolved = status == AlertStatus::Resolved;
    Alert {
        id: id.into(),
        distress_type: "Scream".into(),
        severity,
        zone: zone.into(),
        timestamp: ts,
        confidence_score: 0.8,
        recommended_action: "Send nearest available staff".into(),
        alert_message: format!("Scream detected in {zone}"),
        notification_status: NotificationStatus::Sent,
        status,
        responder,
        resolution_notes: resolved.then(|| "Handled".to_string()),
        response_time: resolved.then_some(3),
    }
}

fn store_with(alerts: Vec<Alert>) -> AlertStore {
    let store = AlertStore::new(LifecycleSettings::default());
    for a in alerts.into_iter().rev() {
        store.append(a).expect("append");
    }
    store
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn status_never_moves_backward() {
    let store = store_with(vec![alert("a", "Lobby", Severity::Low, AlertStatus::New, at("10:00"))]);

    store.resolve("a", "", "Dr. Chen", at("10:04")).expect("resolve");
    let err = store.acknowledge("a", "Nurse Johnson").expect_err("must fail");
    assert!(matches!(err, StoreError::InvalidTransition(_)));
    let err = store.resolve("a", "again", "Dr. Chen", at("10:09")).expect_err("must fail");
    assert!(matches!(err, StoreError::InvalidTransition(_)));

    let a = store.get("a").expect("get").expect("present");
    assert_eq!(a.status, AlertStatus::Resolved);
    assert_eq!(a.responder.as_deref(), Some("Dr. Chen"));
    assert_eq!(a.response_time, Some(4));
}

#[test]
fn acknowledge_then_resolve_keeps_first_responder() {
    let store = store_with(vec![alert("a", "Lobby", Severity::High, AlertStatus::New, at("10:00"))]);
    let acked = store.acknowledge("a", "Nurse Johnson").expect("ack");
    assert_eq!(acked.status, AlertStatus::Acknowledged);
    let resolved = store.resolve("a", "Patient calm", "Dr. Chen", at("10:30")).expect("resolve");
    assert_eq!(resolved.responder.as_deref(), Some("Nurse Johnson"));
    assert_eq!(resolved.resolution_notes.as_deref(), Some("Patient calm"));
}

#[test]
fn resolve_notes_default_only_when_blank() {
    let store = store_with(vec![
        alert("a", "Lobby", Severity::Low, AlertStatus::New, at("10:00")),
        alert("b", "Lobby", Severity::Low, AlertStatus::New, at("10:00")),
    ]);
    let a = store.resolve("a", "  ", "Operator", at("10:01")).expect("resolve");
    assert_eq!(a.resolution_notes.as_deref(), Some("Resolved"));
    let b = store.resolve("b", "cart collision", "Operator", at("10:01")).expect("resolve");
    assert_eq!(b.resolution_notes.as_deref(), Some("cart collision"));
}

#[test]
fn fixed_response_time_policy_ignores_elapsed_time() {
    let store = AlertStore::new(LifecycleSettings {
        response_time: ResponseTimePolicy::Fixed(4),
        default_notes: "Resolved".into(),
    });
    store
        .append(alert("a", "Lobby", Severity::Low, AlertStatus::New, at("08:00")))
        .expect("append");
    let a = store.resolve("a", "", "Operator", at("10:00")).expect("resolve");
    assert_eq!(a.response_time, Some(4));
}

#[test]
fn unknown_id_is_not_found() {
    let store = store_with(Vec::new());
    assert!(matches!(
        store.acknowledge("missing", "x"),
        Err(StoreError::NotFound(id)) if id == "missing"
    ));
}

// ---------------------------------------------------------------------------
// Zone status
// ---------------------------------------------------------------------------

#[test]
fn adding_critical_alert_escalates_recent_zone() {
    let zone = Zone::new("Hallway B", "Main Corridor - Floor 1", 0.8);
    let resolver = ZoneStatusResolver::default();
    let now = at("10:00");
    let mut alerts = vec![alert("a", "Hallway B", Severity::Low, AlertStatus::New, at("09:50"))];
    assert_eq!(resolver.resolve(&zone, &alerts, now), ZoneStatus::Recent);

    alerts.push(alert("b", "Hallway B", Severity::Critical, AlertStatus::New, at("09:55")));
    assert_eq!(resolver.resolve(&zone, &alerts, now), ZoneStatus::Critical);
}

#[test]
fn newest_resolution_decides_regardless_of_list_order() {
    let zone = Zone::new("Lobby", "Main Entrance", 0.6);
    let resolver = ZoneStatusResolver::default();
    // Old resolution listed first, fresh one last.
    let alerts = vec![
        alert("old", "Lobby", Severity::Medium, AlertStatus::Resolved, at("07:00")),
        alert("fresh", "Lobby", Severity::Medium, AlertStatus::Resolved, at("09:30")),
    ];
    assert_eq!(resolver.resolve(&zone, &alerts, at("10:00")), ZoneStatus::Recent);
    assert_eq!(resolver.resolve(&zone, &alerts, at("10:31")), ZoneStatus::Clear);
}

#[test]
fn alerts_for_removed_zone_remain_in_store() {
    let store = store_with(vec![alert("a", "Old Wing", Severity::Low, AlertStatus::New, at("10:00"))]);
    let listed = store.list_all().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].zone, "Old Wing");
}

// ---------------------------------------------------------------------------
// History and ordering
// ---------------------------------------------------------------------------

#[test]
fn wildcard_criteria_return_every_alert() {
    let alerts = vec![
        alert("a", "Lobby", Severity::Low, AlertStatus::New, at("10:00")),
        alert("b", "ICU Ward", Severity::Critical, AlertStatus::Resolved, at("09:00")),
    ];
    let criteria = HistoryCriteria {
        zone: selector(Some("all")),
        distress_type: selector(Some("ALL")),
        severity: None,
        search: "   ".into(),
    };
    assert!(criteria.is_wildcard());
    let ids: Vec<&str> = filter_history(&alerts, &criteria)
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn search_is_case_insensitive_over_responder_and_notes() {
    let alerts = vec![
        alert("a", "Lobby", Severity::Low, AlertStatus::Resolved, at("10:00")),
        alert("b", "Lobby", Severity::Low, AlertStatus::New, at("10:00")),
    ];
    let by_notes = HistoryCriteria {
        search: "HANDLED".into(),
        ..HistoryCriteria::default()
    };
    assert_eq!(filter_history(&alerts, &by_notes).len(), 1);
    let by_responder = HistoryCriteria {
        search: "johnson".into(),
        ..HistoryCriteria::default()
    };
    assert_eq!(filter_history(&alerts, &by_responder)[0].id, "a");
}

#[test]
fn status_dominates_severity_dominates_recency() {
    let alerts = vec![
        alert("A", "Lobby", Severity::Low, AlertStatus::New, at("10:00")),
        alert("B", "Lobby", Severity::Critical, AlertStatus::New, at("09:00")),
        alert("C", "Lobby", Severity::Critical, AlertStatus::Resolved, at("11:00")),
    ];
    let order: Vec<&str> = display_order(&alerts).into_iter().map(|a| a.id.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);
}

#[test]
fn equal_status_and_severity_sort_newest_first() {
    let alerts = vec![
        alert("older", "Lobby", Severity::High, AlertStatus::Acknowledged, at("09:00")),
        alert("newer", "Lobby", Severity::High, AlertStatus::Acknowledged, at("09:00") + TimeDelta::minutes(1)),
    ];
    assert_eq!(display_order(&alerts)[0].id, "newer");
}

// ---------------------------------------------------------------------------
// Report export round trip
// ---------------------------------------------------------------------------

#[test]
fn exported_report_parses_back_identically() {
    let report = Report {
        summary: "Seven events, one critical still open.".into(),
        total_events_analyzed: 7,
        date_range: "Last 7 days".into(),
        type_distribution: "Scream: 2, Glass Break: 2".into(),
        severity_distribution: "Critical: 2".into(),
        zone_analysis: "Hallway B most active".into(),
        avg_response_time: "4.5m".into(),
        trends: "Stable".into(),
        recommendations: "Review \"Hallway B\" cameras\nand carts".into(),
    };
    let json = report.to_pretty_json().expect("serialize");
    assert_eq!(Report::from_json(&json).expect("parse"), report);
}
