//! Nearest-neighbor tour construction
//!
//! Orders selected centers into a single open tour. Deliberately heuristic:
//! no backtracking or 2-opt passes, so sequencing stays O(n²) and
//! deterministic for a given center order.

use serde::Serialize;

use shared::{LatLon, SamplePoint};

use crate::geo::haversine_m;

/// An ordered visiting sequence over selected sampling positions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tour {
    pub waypoints: Vec<SamplePoint>,
    /// Sum of consecutive great-circle distances, in meters.
    pub length_m: f64,
}

impl Tour {
    pub fn to_ring(&self) -> Vec<LatLon> {
        self.waypoints.iter().map(|p| p.coord()).collect()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Order centers by repeated nearest-neighbor choice.
///
/// The tour starts at the planner's first selection. Each step appends the
/// unvisited center closest to the current tail; strict less-than keeps the
/// earliest remaining center on distance ties.
pub fn sequence(centers: &[SamplePoint]) -> Tour {
    let mut remaining: Vec<SamplePoint> = centers.to_vec();
    if remaining.is_empty() {
        return Tour::default();
    }

    let mut waypoints = vec![remaining.remove(0)];
    let mut length_m = 0.0;

    while !remaining.is_empty() {
        let tail = waypoints[waypoints.len() - 1];
        let mut nearest_idx = 0;
        let mut nearest_dist = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let d = haversine_m(tail.coord(), candidate.coord());
            if d < nearest_dist {
                nearest_dist = d;
                nearest_idx = i;
            }
        }
        waypoints.push(remaining.remove(nearest_idx));
        length_m += nearest_dist;
    }

    Tour {
        waypoints,
        length_m,
    }
}
