pub mod classification;
pub mod http;
pub mod offline;
pub mod payload;
pub mod summary;

use std::sync::Arc;
use std::time::Duration;

use crate::application::config::AgentConfig;
use crate::domain::ports::AgentTransport;

use self::http::HttpAgentTransport;
use self::offline::OfflineAgent;

pub use classification::{ClassificationError, ClassificationGateway};
pub use summary::{ReportError, ReportGateway};

/// Create the agent transport selected by configuration.
///
/// Returns [`OfflineAgent`] when the provider is `offline`, unknown, or the
/// HTTP client cannot be built.
#[must_use]
pub fn create_agent_transport(config: &AgentConfig) -> Arc<dyn AgentTransport> {
    match config.provider.trim() {
        "http" => match HttpAgentTransport::new(
            &config.base_url,
            config.api_key.clone(),
            config.timeout_secs.map(Duration::from_secs),
        ) {
            Ok(transport) => Arc::new(transport),
            Err(e) => {
                tracing::warn!(error = %e, "HTTP agent unavailable, falling back to offline");
                Arc::new(OfflineAgent::new())
            }
        },
        "offline" => Arc::new(OfflineAgent::new()),
        _ => {
            tracing::warn!(
                provider = %config.provider,
                "unknown agent provider, falling back to offline"
            );
            Arc::new(OfflineAgent::new())
        }
    }
}
