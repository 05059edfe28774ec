use serde::{Deserialize, Serialize};

/// Sensitivity given to zones created without an explicit value.
pub const DEFAULT_SENSITIVITY: f64 = 0.7;

/// A monitored physical area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    /// Display key referenced by `Alert::zone`
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Detection threshold tuning in [0, 1], consumed by the classifier
    pub sensitivity: f64,
}

impl Zone {
    /// Builds an active zone with a fresh id. Sensitivity is clamped to [0, 1].
    #[must_use]
    pub fn new(name: &str, description: &str, sensitivity: f64) -> Self {
        Self {
            id: format!("z-{}", uuid::Uuid::new_v4().simple()),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            active: true,
            sensitivity: clamp_sensitivity(sensitivity),
        }
    }
}

/// NaN maps to the default rather than propagating.
#[must_use]
pub fn clamp_sensitivity(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_SENSITIVITY
    } else {
        value.clamp(0.0, 1.0)
    }
}
