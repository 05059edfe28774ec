pub mod in_flight;
pub mod session;

pub use in_flight::{ActionKind, InFlight, InFlightGuard};
pub use session::{Classified, ClassifyRequest, Session, SessionError};
