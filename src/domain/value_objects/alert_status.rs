use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an alert. Moves forward only: New → Acknowledged → Resolved,
/// or New → Resolved directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AlertStatus {
    #[default]
    New,
    Acknowledged,
    Resolved,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Acknowledged => write!(f, "Acknowledged"),
            Self::Resolved => write!(f, "Resolved"),
        }
    }
}

impl AlertStatus {
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Acknowledged | Self::Resolved) | (Self::Acknowledged, Self::Resolved)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Position in the dashboard ordering.
    #[must_use]
    pub const fn display_rank(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Acknowledged => 1,
            Self::Resolved => 2,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown alert status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for AlertStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Acknowledged" => Ok(Self::Acknowledged),
            "Resolved" => Ok(Self::Resolved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
