use serde::{Deserialize, Serialize};

/// Outcome of the downstream notification reported by the classifier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
    #[default]
    Unknown,
}

impl NotificationStatus {
    /// Lenient mapping for classifier output. Case-insensitive; anything else is `Unknown`.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("sent") => Self::Sent,
            Some("failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
