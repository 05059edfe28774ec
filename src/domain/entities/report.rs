use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::alert::Alert;
use crate::domain::value_objects::{AlertStatus, Severity};

/// Analytical summary produced by the summarizer over a filtered alert set.
///
/// Ephemeral: replaced wholesale by the next generation and never persisted.
/// Exported verbatim as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub summary: String,
    pub total_events_analyzed: u64,
    pub date_range: String,
    pub type_distribution: String,
    pub severity_distribution: String,
    pub zone_analysis: String,
    pub avg_response_time: String,
    pub trends: String,
    pub recommendations: String,
}

impl Report {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Non-empty sections in display order, summary excluded.
    #[must_use]
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        [
            ("Date range", self.date_range.as_str()),
            ("Type distribution", self.type_distribution.as_str()),
            ("Severity distribution", self.severity_distribution.as_str()),
            ("Zone analysis", self.zone_analysis.as_str()),
            ("Average response time", self.avg_response_time.as_str()),
            ("Trends", self.trends.as_str()),
            ("Recommendations", self.recommendations.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
    }
}

/// Reduced alert row sent to the summarizer. Carries no internal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAlert {
    pub distress_type: String,
    pub severity: Severity,
    pub zone: String,
    pub timestamp: DateTime<Utc>,
    pub confidence_score: f64,
    pub status: AlertStatus,
    pub response_time: Option<u32>,
    pub responder: String,
    pub resolution_notes: String,
}

impl From<&Alert> for ReportAlert {
    fn from(alert: &Alert) -> Self {
        Self {
            distress_type: alert.distress_type.clone(),
            severity: alert.severity,
            zone: alert.zone.clone(),
            timestamp: alert.timestamp,
            confidence_score: alert.confidence_score,
            status: alert.status,
            response_time: alert.response_time,
            responder: alert.responder.clone().unwrap_or_default(),
            resolution_notes: alert.resolution_notes.clone().unwrap_or_default(),
        }
    }
}
