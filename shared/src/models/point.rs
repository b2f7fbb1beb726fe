//! Historical sample point

use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// An observed location from the read-only historical dataset.
///
/// The point source already filters to the rolling retention window, so no
/// last-seen timestamp travels with the point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

impl SamplePoint {
    pub fn coord(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}
