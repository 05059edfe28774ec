#![allow(clippy::expect_used)]
// Classification and report gateways over the HTTP agent transport, against wiremock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wardwatch::domain::entities::SoundEvent;
use wardwatch::domain::ports::{AgentTransport, TransportError};
use wardwatch::domain::value_objects::{AlertStatus, NotificationStatus, Severity};
use wardwatch::infrastructure::ai::http::HttpAgentTransport;
use wardwatch::infrastructure::ai::{
    ClassificationError, ClassificationGateway, ReportError, ReportGateway,
};

// ── Helpers ─────────────────────────────────────────────────────────

const CLASSIFIER: &str = "distress-classifier";
const SUMMARIZER: &str = "alert-summarizer";

async fn setup() -> (MockServer, Arc<dyn AgentTransport>) {
    let server = MockServer::start().await;
    let transport = HttpAgentTransport::new(
        &server.uri(),
        Some("test-key".into()),
        Some(Duration::from_secs(5)),
    )
    .expect("client");
    (server, Arc::new(transport))
}

async fn mount(server: &MockServer, agent: &str, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("/agents/{agent}/invoke")))
        .respond_with(template)
        .mount(server)
        .await;
}

fn event() -> SoundEvent {
    SoundEvent {
        sound_type: "Scream".into(),
        confidence_score: 0.85,
        zone: "Room 204".into(),
        timestamp: DateTime::parse_from_rfc3339("2026-02-25T10:00:00Z")
            .expect("parse")
            .with_timezone(&Utc),
        notification_channel: "#emergency-alerts".into(),
    }
}

// ── Classification ──────────────────────────────────────────────────

#[tokio::test]
async fn structured_reply_becomes_alert() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": {
                "result": {
                    "distress_type": "Scream",
                    "severity": "High",
                    "zone": "Room 204",
                    "confidence_score": 0.91,
                    "recommended_action": "Send nearest available staff",
                    "alert_message": "Scream detected in Room 204",
                    "notification_status": "sent"
                }
            }
        })),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let alert = gateway.classify(&event()).await.expect("classify");
    assert_eq!(alert.severity, Severity::High);
    assert_eq!(alert.status, AlertStatus::New);
    assert_eq!(alert.notification_status, NotificationStatus::Sent);
    assert!((alert.confidence_score - 0.91).abs() < f64::EPSILON);
    assert!(alert.responder.is_none());
}

#[tokio::test]
async fn extreme_severity_in_string_payload_is_coerced_to_medium() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "{\"severity\":\"Extreme\"}"
        })),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let alert = gateway.classify(&event()).await.expect("classify");
    assert_eq!(alert.severity, Severity::Medium);
    assert_eq!(alert.zone, "Room 204");
    assert!((alert.confidence_score - 0.85).abs() < f64::EPSILON);
    assert_eq!(alert.notification_status, NotificationStatus::Unknown);
}

#[tokio::test]
async fn prose_reply_degrades_to_message() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "Likely a scream, send staff."
        })),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let alert = gateway.classify(&event()).await.expect("classify");
    assert_eq!(alert.alert_message, "Likely a scream, send staff.");
    assert_eq!(alert.severity, Severity::Medium);
}

#[tokio::test]
async fn request_carries_event_and_bearer_token() {
    let (server, transport) = setup().await;
    Mock::given(method("POST"))
        .and(path(format!("/agents/{CLASSIFIER}/invoke")))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "response": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    gateway.classify(&event()).await.expect("classify");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    let message: Value =
        serde_json::from_str(body["message"].as_str().expect("message string")).expect("inner");
    assert_eq!(message["sound_type"], "Scream");
    assert_eq!(message["notification_channel"], "#emergency-alerts");
    assert_eq!(message["zone"], "Room 204");
}

#[tokio::test]
async fn remote_failure_carries_agent_message() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200)
            .set_body_json(json!({"success": false, "error": "model overloaded"})),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let err = gateway.classify(&event()).await.expect_err("must fail");
    assert_eq!(err, ClassificationError::Remote("model overloaded".into()));
}

#[tokio::test]
async fn non_json_body_is_parse_failure() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let err = gateway.classify(&event()).await.expect_err("must fail");
    assert!(matches!(err, ClassificationError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_without_envelope_is_unavailable() {
    let (server, transport) = setup().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
    )
    .await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let err = gateway.classify(&event()).await.expect_err("must fail");
    assert!(
        matches!(
            err,
            ClassificationError::Transport(TransportError::Unavailable(_))
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn empty_body_is_no_response() {
    let (server, transport) = setup().await;
    mount(&server, CLASSIFIER, ResponseTemplate::new(200)).await;

    let gateway = ClassificationGateway::new(transport, CLASSIFIER);
    let err = gateway.classify(&event()).await.expect_err("must fail");
    assert_eq!(
        err,
        ClassificationError::Transport(TransportError::NoResponse)
    );
}

#[tokio::test]
async fn slow_agent_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        CLASSIFIER,
        ResponseTemplate::new(200)
            .set_body_json(json!({"success": true, "response": {}}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let transport =
        HttpAgentTransport::new(&server.uri(), None, Some(Duration::from_millis(200)))
            .expect("client");

    let gateway = ClassificationGateway::new(Arc::new(transport), CLASSIFIER);
    let err = gateway.classify(&event()).await.expect_err("must fail");
    assert_eq!(err, ClassificationError::Transport(TransportError::Timeout));
}

// ── Reports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_summary_is_incomplete() {
    let (server, transport) = setup().await;
    mount(
        &server,
        SUMMARIZER,
        ResponseTemplate::new(200)
            .set_body_json(json!({"success": true, "response": {"summary": ""}})),
    )
    .await;

    let gateway = ReportGateway::new(transport, SUMMARIZER);
    let err = gateway.summarize(&[], "Last 7 days").await.expect_err("must fail");
    assert_eq!(err, ReportError::Incomplete);
}

#[tokio::test]
async fn double_encoded_summary_is_decoded() {
    let (server, transport) = setup().await;
    let inner = json!({"summary": "Quiet week.", "total_events_analyzed": 0}).to_string();
    mount(
        &server,
        SUMMARIZER,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": serde_json::to_string(&inner).expect("encode twice")
        })),
    )
    .await;

    let gateway = ReportGateway::new(transport, SUMMARIZER);
    let report = gateway.summarize(&[], "Last 7 days").await.expect("report");
    assert_eq!(report.summary, "Quiet week.");
    assert_eq!(report.total_events_analyzed, 0);
}

#[tokio::test]
async fn report_remote_failure_falls_back_to_generic_message() {
    let (server, transport) = setup().await;
    mount(
        &server,
        SUMMARIZER,
        ResponseTemplate::new(200).set_body_json(json!({"success": false})),
    )
    .await;

    let gateway = ReportGateway::new(transport, SUMMARIZER);
    let err = gateway.summarize(&[], "Last 7 days").await.expect_err("must fail");
    assert_eq!(err, ReportError::Remote("Agent returned an error.".into()));
}
