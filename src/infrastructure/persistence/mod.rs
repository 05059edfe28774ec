pub mod alert_store;
pub mod zone_registry;

use thiserror::Error;

use crate::domain::entities::TransitionError;

pub use alert_store::{AlertStore, LifecycleSettings};
pub use zone_registry::ZoneRegistry;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("a zone named '{0}' already exists")]
    DuplicateZoneName(String),
    #[error("zone name must not be empty")]
    InvalidZoneName,
    #[error("store lock poisoned")]
    LockPoisoned,
}
