pub mod agent;
pub mod clock;

pub use agent::{AgentReply, AgentTransport, TransportError};
pub use clock::Clock;
