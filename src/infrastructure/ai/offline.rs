use async_trait::async_trait;

use crate::domain::ports::{AgentReply, AgentTransport, TransportError};

/// Agent used when no service is configured. Every call fails as unavailable,
/// so classification and reports report an error while the rest of the
/// session keeps working.
pub struct OfflineAgent;

impl OfflineAgent {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for OfflineAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentTransport for OfflineAgent {
    async fn invoke(&self, _agent_id: &str, _message: &str) -> Result<AgentReply, TransportError> {
        Err(TransportError::Unavailable(
            "no agent service configured (provider = \"offline\")".into(),
        ))
    }
}
