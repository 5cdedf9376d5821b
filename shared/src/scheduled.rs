//! Scheduled Catalog Changes
//!
//! An admin can stage a full replacement catalog with an `apply_at`
//! timestamp; the server applies it once the time has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;

/// Pending catalog replacement, persisted until applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledChange {
    pub id: Uuid,
    /// Manufacturer slug the change applies to
    pub manufacturer: String,
    /// Point in time after which the change is applied
    pub apply_at: DateTime<Utc>,
    /// Replacement document
    pub catalog: Catalog,
    pub created_at: DateTime<Utc>,
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledChangeCreate {
    pub manufacturer: String,
    pub apply_at: DateTime<Utc>,
    pub catalog: Catalog,
}

impl ScheduledChange {
    pub fn from_create(payload: ScheduledChangeCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            manufacturer: payload.manufacturer,
            apply_at: payload.apply_at,
            catalog: payload.catalog,
            created_at: Utc::now(),
        }
    }

    /// Whether the change is due at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.apply_at <= now
    }
}
