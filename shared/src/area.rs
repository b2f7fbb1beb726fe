//! Wire format of the external scanning service's area registry
//!
//! The registry offers no upsert-by-name: callers list, delete the match if
//! one exists, then create. These types mirror its JSON exactly.

use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// One entry of the area list endpoint. The registry returns more fields;
/// only id and name matter for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSummary {
    pub id: i64,
    pub name: String,
}

/// Envelope of `GET /areas/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaListResponse {
    pub data: Vec<AreaSummary>,
}

/// Body of `POST /areas/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaPayload {
    pub enabled: bool,
    /// Boundary ring, closed, as lat/lon pairs.
    pub geofence: Vec<LatLon>,
    pub pokemon_mode: PokemonMode,
    pub enable_quests: bool,
    pub quest_mode: QuestMode,
    pub name: String,
}

/// Scan-mode parameters carried on every created area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonMode {
    pub workers: u32,
    pub enable_scout: bool,
    pub invasion: bool,
    pub route: Vec<LatLon>,
}

/// Quest-mode parameters: operating hours window plus the same route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestMode {
    /// `[start_hour, end_hour]`
    pub hours: [u8; 2],
    pub route: Vec<LatLon>,
}
