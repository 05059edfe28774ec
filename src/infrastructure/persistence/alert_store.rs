use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::info;

use super::StoreError;
use crate::domain::entities::Alert;
use crate::domain::value_objects::ResponseTimePolicy;

/// Policy applied when alerts are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    pub response_time: ResponseTimePolicy,
    /// Stored as the resolution notes when none are given
    pub default_notes: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            response_time: ResponseTimePolicy::default(),
            default_notes: "Resolved".into(),
        }
    }
}

/// Canonical, most-recent-first list of alerts for one session.
///
/// Every mutation goes through a lifecycle transition on `Alert`.
pub struct AlertStore {
    alerts: Mutex<Vec<Alert>>,
    settings: LifecycleSettings,
}

impl AlertStore {
    #[must_use]
    pub const fn new(settings: LifecycleSettings) -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Alert>>, StoreError> {
        self.alerts.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Inserts at the head. Ids are unique by construction; a clash is a bug.
    pub fn append(&self, alert: Alert) -> Result<(), StoreError> {
        let mut alerts = self.lock()?;
        debug_assert!(
            alerts.iter().all(|a| a.id != alert.id),
            "duplicate alert id {}",
            alert.id
        );
        info!(id = %alert.id, severity = %alert.severity, zone = %alert.zone, "alert appended");
        alerts.insert(0, alert);
        Ok(())
    }

    /// New → Acknowledged. Returns the updated alert.
    pub fn acknowledge(&self, id: &str, responder: &str) -> Result<Alert, StoreError> {
        let mut alerts = self.lock()?;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        alert.acknowledge(responder)?;
        info!(id, responder, "alert acknowledged");
        Ok(alert.clone())
    }

    /// New or Acknowledged → Resolved. Blank notes are replaced by the
    /// configured default; the response time follows the lifecycle policy.
    pub fn resolve(
        &self,
        id: &str,
        notes: &str,
        responder: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<Alert, StoreError> {
        let notes = if notes.trim().is_empty() {
            self.settings.default_notes.clone()
        } else {
            notes.to_string()
        };
        let mut alerts = self.lock()?;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let minutes = self
            .settings
            .response_time
            .minutes(alert.timestamp, resolved_at);
        alert.resolve(responder, notes, minutes)?;
        info!(id, response_time = minutes, "alert resolved");
        Ok(alert.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<Alert>, StoreError> {
        Ok(self.lock()?.iter().find(|a| a.id == id).cloned())
    }

    /// Full ordered sequence, nothing hidden.
    pub fn list_all(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self.lock()?.clone())
    }

    /// Runs `f` over the list without cloning it.
    pub fn with_alerts<R>(&self, f: impl FnOnce(&[Alert]) -> R) -> Result<R, StoreError> {
        let alerts = self.lock()?;
        Ok(f(alerts.as_slice()))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new(LifecycleSettings::default())
    }
}
