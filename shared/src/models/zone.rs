//! Zone model - a named scanning boundary owned by one account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// A user-owned named polygon used as a scanning boundary.
///
/// The ring is ordered and closed (first vertex repeated last). Validity
/// (at least 3 distinct vertices, non-zero area) is enforced by the engine
/// before a zone is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub owner_id: String,
    /// Unique per owner.
    pub name: String,
    pub ring: Vec<LatLon>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    pub ring: Vec<LatLon>,
}

/// Partial update: either field may be omitted to keep the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub ring: Option<Vec<LatLon>>,
}
