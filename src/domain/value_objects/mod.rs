pub mod alert_status;
pub mod notification_status;
pub mod response_time;
pub mod severity;
pub mod zone_status;

pub use alert_status::AlertStatus;
pub use notification_status::NotificationStatus;
pub use response_time::ResponseTimePolicy;
pub use severity::{Severity, SeverityMap};
pub use zone_status::ZoneStatus;
