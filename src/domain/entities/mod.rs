pub mod alert;
pub mod event;
pub mod report;
pub mod zone;

pub use alert::{Alert, TransitionError};
pub use event::SoundEvent;
pub use report::{Report, ReportAlert};
pub use zone::Zone;
