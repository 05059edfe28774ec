use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{AlertStatus, NotificationStatus, Severity};

/// Prefix carried by the ids of seeded demonstration alerts.
pub const SAMPLE_ID_PREFIX: &str = "sa-";

/// A detected or classified distress event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub distress_type: String,
    pub severity: Severity,
    /// Zone name. Not checked against the registry; survives zone deletion.
    pub zone: String,
    pub timestamp: DateTime<Utc>,
    pub confidence_score: f64,
    pub recommended_action: String,
    pub alert_message: String,
    pub notification_status: NotificationStatus,
    pub status: AlertStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    /// Minutes from detection to resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u32>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move alert from {from} to {to}")]
pub struct TransitionError {
    pub from: AlertStatus,
    pub to: AlertStatus,
}

impl Alert {
    #[must_use]
    pub fn generate_id() -> String {
        format!("alert-{}", uuid::Uuid::new_v4().simple())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != AlertStatus::Resolved
    }

    #[must_use]
    pub fn is_sample(&self) -> bool {
        self.id.starts_with(SAMPLE_ID_PREFIX)
    }

    /// Lowercased text matched by the free-text history search.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.distress_type,
            self.zone,
            self.responder.as_deref().unwrap_or_default(),
            self.resolution_notes.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    /// New → Acknowledged, recording who took the alert.
    pub fn acknowledge(&mut self, responder: &str) -> Result<(), TransitionError> {
        self.transition(AlertStatus::Acknowledged)?;
        self.responder = Some(responder.to_string());
        Ok(())
    }

    /// New or Acknowledged → Resolved. An earlier responder is kept.
    pub fn resolve(
        &mut self,
        responder: &str,
        notes: String,
        response_time: u32,
    ) -> Result<(), TransitionError> {
        self.transition(AlertStatus::Resolved)?;
        if self.responder.is_none() {
            self.responder = Some(responder.to_string());
        }
        self.resolution_notes = Some(notes);
        self.response_time = Some(response_time);
        Ok(())
    }

    fn transition(&mut self, to: AlertStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(to) {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
