use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How `response_time` is stamped when an alert is resolved.
///
/// In TOML this is either the string `"elapsed"` or a whole number of minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy", into = "RawPolicy")]
pub enum ResponseTimePolicy {
    /// Minutes between detection and resolution, floored, never negative.
    #[default]
    Elapsed,
    /// The same number of minutes for every resolution.
    Fixed(u32),
}

impl ResponseTimePolicy {
    #[must_use]
    pub fn minutes(self, detected_at: DateTime<Utc>, resolved_at: DateTime<Utc>) -> u32 {
        match self {
            Self::Fixed(minutes) => minutes,
            Self::Elapsed => {
                let elapsed = (resolved_at - detected_at).num_minutes().max(0);
                u32::try_from(elapsed).unwrap_or(u32::MAX)
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPolicy {
    Minutes(u32),
    Keyword(String),
}

impl TryFrom<RawPolicy> for ResponseTimePolicy {
    type Error = String;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        match raw {
            RawPolicy::Minutes(m) => Ok(Self::Fixed(m)),
            RawPolicy::Keyword(k) if k.eq_ignore_ascii_case("elapsed") => Ok(Self::Elapsed),
            RawPolicy::Keyword(k) => Err(format!(
                "invalid response_time policy '{k}': expected \"elapsed\" or a number of minutes"
            )),
        }
    }
}

impl From<ResponseTimePolicy> for RawPolicy {
    fn from(policy: ResponseTimePolicy) -> Self {
        match policy {
            ResponseTimePolicy::Elapsed => Self::Keyword("elapsed".into()),
            ResponseTimePolicy::Fixed(m) => Self::Minutes(m),
        }
    }
}
