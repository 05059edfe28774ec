use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate audio event submitted for classification.
///
/// Field names are the wire names of the classification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub sound_type: String,
    pub confidence_score: f64,
    pub zone: String,
    pub timestamp: DateTime<Utc>,
    pub notification_channel: String,
}

/// Distress categories the classifier is known to emit. Others are still accepted.
pub const KNOWN_DISTRESS_TYPES: [&str; 4] = ["Scream", "Glass Break", "Aggression", "Medical Distress"];
