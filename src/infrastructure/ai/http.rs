use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{AgentReply, AgentTransport, TransportError};

/// Maximum reply body accepted from the agent service (4 MB).
const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Agent service reached over HTTP.
///
/// Each call is `POST {base_url}/agents/{agent_id}/invoke` with `{"message": ...}`;
/// the body of the answer is the `{success, response, error}` envelope.
pub struct HttpAgentTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAgentTransport {
    /// Without `timeout`, no local deadline is applied and the service's own
    /// failure signalling is relied upon.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            TransportError::Unavailable(format!("cannot create HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self, agent_id: &str) -> String {
        format!("{}/agents/{agent_id}/invoke", self.base_url)
    }
}

fn map_request_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl AgentTransport for HttpAgentTransport {
    async fn invoke(&self, agent_id: &str, message: &str) -> Result<AgentReply, TransportError> {
        let mut request = self
            .client
            .post(self.endpoint(agent_id))
            .json(&json!({ "message": message }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| map_request_error(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| map_request_error(&e))?;
        debug!(agent = agent_id, %status, bytes = body.len(), "agent replied");

        if body.len() > MAX_RESPONSE_BYTES {
            return Err(TransportError::Malformed(format!(
                "response too large: {} bytes",
                body.len()
            )));
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(if status.is_success() {
                TransportError::NoResponse
            } else {
                TransportError::Unavailable(format!("HTTP {status}"))
            });
        }

        match serde_json::from_slice::<AgentReply>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => {
                warn!(agent = agent_id, %status, "agent service error without envelope");
                Err(TransportError::Unavailable(format!("HTTP {status}")))
            }
            Err(e) => Err(TransportError::Malformed(e.to_string())),
        }
    }
}
