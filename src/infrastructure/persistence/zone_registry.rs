use std::sync::{Mutex, MutexGuard};

use tracing::info;

use super::StoreError;
use crate::domain::entities::Zone;
use crate::domain::entities::zone::clamp_sensitivity;

/// Monitored zones for one session, in insertion order.
pub struct ZoneRegistry {
    zones: Mutex<Vec<Zone>>,
    unique_names: bool,
}

impl ZoneRegistry {
    /// With `unique_names`, names are compared trimmed and case-insensitively.
    #[must_use]
    pub const fn new(unique_names: bool) -> Self {
        Self {
            zones: Mutex::new(Vec::new()),
            unique_names,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Zone>>, StoreError> {
        self.zones.lock().map_err(|_| StoreError::LockPoisoned)
    }

    pub fn add(&self, name: &str, description: &str, sensitivity: f64) -> Result<Zone, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidZoneName);
        }
        let mut zones = self.lock()?;
        if self.unique_names && zones.iter().any(|z| z.name.eq_ignore_ascii_case(name)) {
            return Err(StoreError::DuplicateZoneName(name.to_string()));
        }
        let zone = Zone::new(name, description, sensitivity);
        info!(id = %zone.id, name = %zone.name, "zone added");
        zones.push(zone.clone());
        Ok(zone)
    }

    /// Places an already-built zone, keeping its id. Used by the sample seed.
    pub fn insert(&self, zone: Zone) -> Result<(), StoreError> {
        let mut zones = self.lock()?;
        if self.unique_names
            && zones
                .iter()
                .any(|z| z.name.eq_ignore_ascii_case(&zone.name))
        {
            return Err(StoreError::DuplicateZoneName(zone.name));
        }
        zones.push(zone);
        Ok(())
    }

    /// Historical alerts keep their zone name; nothing cascades.
    pub fn remove(&self, id: &str) -> Result<Zone, StoreError> {
        let mut zones = self.lock()?;
        let index = zones
            .iter()
            .position(|z| z.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let zone = zones.remove(index);
        info!(id, name = %zone.name, "zone removed");
        Ok(zone)
    }

    pub fn toggle_active(&self, id: &str) -> Result<Zone, StoreError> {
        self.update(id, |zone| zone.active = !zone.active)
    }

    pub fn update_sensitivity(&self, id: &str, value: f64) -> Result<Zone, StoreError> {
        self.update(id, |zone| zone.sensitivity = clamp_sensitivity(value))
    }

    fn update(&self, id: &str, apply: impl FnOnce(&mut Zone)) -> Result<Zone, StoreError> {
        let mut zones = self.lock()?;
        let zone = zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        apply(zone);
        info!(id, active = zone.active, sensitivity = zone.sensitivity, "zone updated");
        Ok(zone.clone())
    }

    pub fn list_all(&self) -> Result<Vec<Zone>, StoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn active_zones(&self) -> Result<Vec<Zone>, StoreError> {
        Ok(self.lock()?.iter().filter(|z| z.active).cloned().collect())
    }

    /// Looks a zone up by id, or by exact name when no id matches.
    pub fn find(&self, key: &str) -> Result<Option<Zone>, StoreError> {
        let zones = self.lock()?;
        Ok(zones
            .iter()
            .find(|z| z.id == key)
            .or_else(|| zones.iter().find(|z| z.name == key))
            .cloned())
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}
