use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("no response received from agent")]
    NoResponse,
    #[error("agent service unavailable: {0}")]
    Unavailable(String),
    #[error("agent call timed out")]
    Timeout,
    #[error("undecodable agent reply: {0}")]
    Malformed(String),
}

/// Result wrapper returned by the external agent for every call.
///
/// `response` is free-form: an object, a JSON-encoded string, or plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AgentReply {
    #[must_use]
    pub fn ok(response: Value) -> Self {
        Self {
            success: true,
            response: Some(response),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.to_string()),
        }
    }

    /// Message to show for a reply with `success == false`:
    /// `error`, else `response.message`, else a generic text.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| {
                self.response
                    .as_ref()
                    .and_then(|r| r.get("message"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.trim().is_empty())
            })
            .unwrap_or("Agent returned an error.")
            .to_string()
    }
}

/// The external classification/summarization agent.
///
/// `agent_id` is an opaque routing key; `message` is the serialized request.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn invoke(&self, agent_id: &str, message: &str) -> Result<AgentReply, TransportError>;
}
