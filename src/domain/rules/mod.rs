pub mod history;
pub mod stats;
pub mod zone_status;

pub use history::{HistoryCriteria, display_order, filter_history};
pub use stats::{DashboardStats, relative_time_label};
pub use zone_status::ZoneStatusResolver;
