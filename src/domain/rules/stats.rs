use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Alert, Zone};
use crate::domain::value_objects::Severity;

/// Headline counters shown above the alert feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub active: usize,
    pub critical_active: usize,
    /// Mean over alerts carrying a response time; `None` when there are none
    pub avg_response_minutes: Option<f64>,
    pub zones_online: usize,
    pub zones_total: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute<'a, I>(alerts: I, zones: &[Zone]) -> Self
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        let mut active = 0;
        let mut critical_active = 0;
        let mut response_sum = 0_u64;
        let mut responded = 0_u32;

        for alert in alerts {
            if alert.is_active() {
                active += 1;
                if alert.severity == Severity::Critical {
                    critical_active += 1;
                }
            }
            if let Some(minutes) = alert.response_time {
                response_sum += u64::from(minutes);
                responded += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_response_minutes =
            (responded > 0).then(|| response_sum as f64 / f64::from(responded));

        Self {
            active,
            critical_active,
            avg_response_minutes,
            zones_online: zones.iter().filter(|z| z.active).count(),
            zones_total: zones.len(),
        }
    }

    #[must_use]
    pub fn avg_response_label(&self) -> String {
        self.avg_response_minutes
            .map_or_else(|| "--".to_string(), |m| format!("{m:.1}m"))
    }

    #[must_use]
    pub fn zones_online_label(&self) -> String {
        format!("{}/{}", self.zones_online, self.zones_total)
    }
}

/// Coarse "time ago" label for feed rows. Future instants read as "Just now".
#[must_use]
pub fn relative_time_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
