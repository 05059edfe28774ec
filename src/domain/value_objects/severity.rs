use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity level of a distress alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Position in the dashboard ordering, most urgent first.
    #[must_use]
    pub const fn display_rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Maps a label coming from an untrusted source onto the closed set.
    /// Anything outside of it becomes `Medium`.
    #[must_use]
    pub fn from_label_or_default(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.parse().ok())
            .unwrap_or(Self::Medium)
    }

    /// Whether an active alert of this severity escalates its zone to critical.
    #[must_use]
    pub const fn escalates_zone(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }

    #[must_use]
    pub const fn emoji(&self) -> &str {
        match self {
            Self::Low => "🔵",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown severity '{0}' (expected Critical, High, Medium or Low)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Exact match on the canonical labels; no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critical" => Ok(Self::Critical),
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// One value per severity level, used for per-severity settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityMap<T> {
    pub critical: T,
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> SeverityMap<T> {
    #[must_use]
    pub const fn get(&self, severity: Severity) -> &T {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }

    pub fn get_mut(&mut self, severity: Severity) -> &mut T {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        }
    }
}
