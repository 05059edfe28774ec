use chrono::{DateTime, Utc};

/// Source of "now" for status derivation and resolution timing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
