use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::payload::LoosePayload;
use crate::domain::entities::{Alert, SoundEvent};
use crate::domain::ports::{AgentTransport, TransportError};
use crate::domain::value_objects::{AlertStatus, NotificationStatus, Severity};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error(transparent)]
    Transport(TransportError),
    #[error("{0}")]
    Remote(String),
    #[error("failed to parse agent response: {0}")]
    Parse(String),
}

impl From<TransportError> for ClassificationError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Malformed(msg) => Self::Parse(msg),
            other => Self::Transport(other),
        }
    }
}

const NOTIFICATION_STATUS_KEYS: &[&str] = &[
    "notification_status",
    "notificationStatus",
    "slack_status",
    "slackStatus",
];

/// Turns a candidate sound event into a normalized `Alert` via the classifier agent.
pub struct ClassificationGateway {
    transport: Arc<dyn AgentTransport>,
    agent_id: String,
}

impl ClassificationGateway {
    #[must_use]
    pub fn new(transport: Arc<dyn AgentTransport>, agent_id: impl Into<String>) -> Self {
        Self {
            transport,
            agent_id: agent_id.into(),
        }
    }

    /// The returned alert is always `New` with a fresh id; it is not stored here.
    pub async fn classify(&self, event: &SoundEvent) -> Result<Alert, ClassificationError> {
        let message = serde_json::to_string(event)
            .map_err(|e| ClassificationError::Parse(format!("cannot encode request: {e}")))?;
        debug!(agent = %self.agent_id, bytes = message.len(), "sending classification request");

        let reply = self.transport.invoke(&self.agent_id, &message).await?;
        if !reply.success {
            let msg = reply.failure_message();
            warn!(agent = %self.agent_id, error = %msg, "classifier reported failure");
            return Err(ClassificationError::Remote(msg));
        }

        let payload = LoosePayload::decode(reply.response.as_ref(), "text");
        let alert = normalize(&payload, event);
        info!(
            distress_type = %alert.distress_type,
            severity = %alert.severity,
            zone = %alert.zone,
            "event classified"
        );
        Ok(alert)
    }
}

/// Second decode stage: loose payload plus the submitted event → typed alert.
fn normalize(payload: &LoosePayload, event: &SoundEvent) -> Alert {
    let timestamp = payload
        .text(&["timestamp"])
        .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
        .map_or(event.timestamp, |t| t.with_timezone(&Utc));

    Alert {
        id: Alert::generate_id(),
        distress_type: payload
            .text(&["distress_type", "distressType"])
            .unwrap_or_else(|| "Unknown".to_string()),
        severity: Severity::from_label_or_default(payload.text(&["severity"]).as_deref()),
        zone: payload
            .text(&["zone"])
            .unwrap_or_else(|| event.zone.clone()),
        timestamp,
        confidence_score: payload
            .number("confidence_score")
            .unwrap_or(event.confidence_score)
            .clamp(0.0, 1.0),
        recommended_action: payload
            .text(&["recommended_action", "recommendedAction"])
            .unwrap_or_default(),
        alert_message: payload
            .text(&["alert_message", "alertMessage", "text"])
            .unwrap_or_default(),
        notification_status: NotificationStatus::from_label(
            payload.text(NOTIFICATION_STATUS_KEYS).as_deref(),
        ),
        status: AlertStatus::New,
        responder: None,
        resolution_notes: None,
        response_time: None,
    }
}
