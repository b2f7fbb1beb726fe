//! Provisional zone ("bootstrap") model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// A time-boxed provisional zone used for initial data collection.
///
/// At most one exists per account. The tour is cleared when the time-to-live
/// elapses or on explicit user request; the polygon persists until redrawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionalZone {
    pub owner_id: String,
    pub ring: Vec<LatLon>,
    /// May be cleared independently of the polygon.
    pub tour: Option<Vec<LatLon>>,
    /// Anchors the time-to-live; refreshed on every re-sync.
    pub synced_at: DateTime<Utc>,
}
