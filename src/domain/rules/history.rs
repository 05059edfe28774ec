use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Alert;
use crate::domain::value_objects::Severity;

/// Wildcard token accepted wherever a criterion can be left open.
pub const WILDCARD: &str = "all";

/// History filter criteria. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryCriteria {
    pub zone: Option<String>,
    pub distress_type: Option<String>,
    pub severity: Option<Severity>,
    /// Case-insensitive substring over type, zone, responder and notes
    pub search: String,
}

impl HistoryCriteria {
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.zone.is_none()
            && self.distress_type.is_none()
            && self.severity.is_none()
            && self.search.trim().is_empty()
    }

    #[must_use]
    pub fn matches(&self, alert: &Alert) -> bool {
        if self.zone.as_ref().is_some_and(|z| *z != alert.zone) {
            return false;
        }
        if self
            .distress_type
            .as_ref()
            .is_some_and(|t| *t != alert.distress_type)
        {
            return false;
        }
        if self.severity.is_some_and(|s| s != alert.severity) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || alert.searchable_text().contains(&needle)
    }
}

/// Turns a user-supplied selector into a criterion; `"all"` (any case) or blank is open.
#[must_use]
pub fn selector(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(WILDCARD))
        .map(str::to_string)
}

/// Alerts matching `criteria`, keeping their relative input order.
#[must_use]
pub fn filter_history<'a>(alerts: &'a [Alert], criteria: &HistoryCriteria) -> Vec<&'a Alert> {
    alerts.iter().filter(|a| criteria.matches(a)).collect()
}

/// Dashboard ordering: status (New, Acknowledged, Resolved), then severity
/// (Critical first), then newest first. Stable for full ties.
#[must_use]
pub fn display_order(alerts: &[Alert]) -> Vec<&Alert> {
    let mut sorted: Vec<&Alert> = alerts.iter().collect();
    sorted.sort_by_key(|a| {
        (
            a.status.display_rank(),
            a.severity.display_rank(),
            Reverse(a.timestamp),
        )
    });
    sorted
}
