use serde::{Deserialize, Serialize};

/// Risk level shown for a zone on the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Clear,
    Recent,
    Critical,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Recent => write!(f, "recent"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
