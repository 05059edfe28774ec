use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::payload::LoosePayload;
use crate::domain::entities::{Alert, Report, ReportAlert};
use crate::domain::ports::{AgentTransport, TransportError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error(transparent)]
    Transport(TransportError),
    #[error("{0}")]
    Remote(String),
    #[error("failed to parse agent response: {0}")]
    Parse(String),
    #[error("Failed to generate report. The agent returned an incomplete response.")]
    Incomplete,
}

impl From<TransportError> for ReportError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Malformed(msg) => Self::Parse(msg),
            other => Self::Transport(other),
        }
    }
}

/// Body sent to the summarizer agent.
#[derive(Debug, Serialize)]
pub struct SummaryRequest {
    pub alerts: Vec<ReportAlert>,
    pub date_range_label: String,
    pub total_count: usize,
}

impl SummaryRequest {
    #[must_use]
    pub fn new(batch: &[&Alert], range_label: &str) -> Self {
        Self {
            alerts: batch.iter().map(|a| ReportAlert::from(*a)).collect(),
            date_range_label: range_label.to_string(),
            total_count: batch.len(),
        }
    }
}

pub struct ReportGateway {
    transport: Arc<dyn AgentTransport>,
    agent_id: String,
}

impl ReportGateway {
    #[must_use]
    pub fn new(transport: Arc<dyn AgentTransport>, agent_id: impl Into<String>) -> Self {
        Self {
            transport,
            agent_id: agent_id.into(),
        }
    }

    /// Summarizes `batch`. A reply without summary text is `Incomplete`,
    /// even when the call itself succeeded.
    pub async fn summarize(&self, batch: &[&Alert], range_label: &str) -> Result<Report, ReportError> {
        let request = SummaryRequest::new(batch, range_label);
        let message = serde_json::to_string(&request)
            .map_err(|e| ReportError::Parse(format!("cannot encode request: {e}")))?;
        debug!(agent = %self.agent_id, alerts = batch.len(), bytes = message.len(), "sending summary request");

        let reply = self.transport.invoke(&self.agent_id, &message).await?;
        if !reply.success {
            let msg = reply.failure_message();
            warn!(agent = %self.agent_id, error = %msg, "summarizer reported failure");
            return Err(ReportError::Remote(msg));
        }

        let payload = LoosePayload::decode(reply.response.as_ref(), "summary");
        let report = normalize(&payload, batch.len()).ok_or_else(|| {
            warn!(agent = %self.agent_id, "summarizer returned no summary");
            ReportError::Incomplete
        })?;
        info!(total = report.total_events_analyzed, "report generated");
        Ok(report)
    }
}

/// Second decode stage. `None` when the summary is missing or blank.
fn normalize(payload: &LoosePayload, batch_size: usize) -> Option<Report> {
    let summary = payload
        .text(&["summary"])
        .filter(|s| !s.trim().is_empty())?;
    let field = |key: &str| payload.text(&[key]).unwrap_or_default();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_events_analyzed = payload
        .number("total_events_analyzed")
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(batch_size as u64, |n| n as u64);

    Some(Report {
        summary,
        total_events_analyzed,
        date_range: field("date_range"),
        type_distribution: field("type_distribution"),
        severity_distribution: field("severity_distribution"),
        zone_analysis: field("zone_analysis"),
        avg_response_time: field("avg_response_time"),
        trends: field("trends"),
        recommendations: field("recommendations"),
    })
}
