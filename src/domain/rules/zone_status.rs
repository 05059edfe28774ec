use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::entities::{Alert, Zone};
use crate::domain::value_objects::{AlertStatus, ZoneStatus};

pub const DEFAULT_LOOKBACK_MINUTES: i64 = 60;

/// Derives a zone's risk level from the alert list.
///
/// Escalation is monotone: an active High or Critical alert always makes the
/// zone critical, any other active alert makes it recent, and a resolution
/// only stops counting once it is older than the lookback window.
#[derive(Debug, Clone, Copy)]
pub struct ZoneStatusResolver {
    lookback: TimeDelta,
}

impl Default for ZoneStatusResolver {
    fn default() -> Self {
        Self::new(TimeDelta::minutes(DEFAULT_LOOKBACK_MINUTES))
    }
}

impl ZoneStatusResolver {
    #[must_use]
    pub const fn new(lookback: TimeDelta) -> Self {
        Self { lookback }
    }

    #[must_use]
    pub fn with_lookback_minutes(minutes: u32) -> Self {
        Self::new(TimeDelta::minutes(i64::from(minutes)))
    }

    #[must_use]
    pub fn resolve<'a, I>(&self, zone: &Zone, alerts: I, now: DateTime<Utc>) -> ZoneStatus
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        let mut any_active = false;
        let mut latest_resolved: Option<DateTime<Utc>> = None;

        for alert in alerts.into_iter().filter(|a| a.zone == zone.name) {
            if alert.status == AlertStatus::Resolved {
                // True maximum, independent of list order.
                latest_resolved =
                    Some(latest_resolved.map_or(alert.timestamp, |t| t.max(alert.timestamp)));
            } else if alert.severity.escalates_zone() {
                return ZoneStatus::Critical;
            } else {
                any_active = true;
            }
        }

        if any_active {
            return ZoneStatus::Recent;
        }
        match latest_resolved {
            Some(ts) if now - ts < self.lookback => ZoneStatus::Recent,
            _ => ZoneStatus::Clear,
        }
    }
}
