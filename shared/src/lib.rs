//! Shared types for the patrol engine
//!
//! Coordinate and bounding-box primitives, the external area registry's wire
//! format, and the domain models that cross the engine/storage boundary.

pub mod area;
pub mod geo;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use area::{AreaListResponse, AreaPayload, AreaSummary, PokemonMode, QuestMode};
pub use geo::{BoundingBox, LatLon};
pub use models::{ProvisionalZone, SamplePoint, SyncAction, Zone, ZoneCreate, ZoneUpdate};
