//! Bounding-box point grid, masked by a polygon
//!
//! Provisional zones have no historical points to plan from, so their tour is
//! a regular grid at one disc diameter of spacing.

use geo::{BoundingRect, Contains, Point, Polygon};

use shared::LatLon;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Generate grid positions inside the polygon, spaced `spacing_m` apart.
///
/// The grid is aligned to the polygon's bounding box, walking south to north
/// and west to east, so output order is deterministic for a given polygon.
/// Longitude steps are widened by the cosine of the box's center latitude to
/// keep spacing roughly uniform on the ground.
pub fn point_grid(polygon: &Polygon<f64>, spacing_m: f64) -> Vec<LatLon> {
    if spacing_m <= 0.0 {
        return Vec::new();
    }
    let Some(rect) = polygon.bounding_rect() else {
        return Vec::new();
    };

    let lat_step = spacing_m / METERS_PER_DEGREE;
    let center_lat = (rect.min().y + rect.max().y) * 0.5;
    let lon_scale = center_lat.to_radians().cos().max(1e-6);
    let lon_step = spacing_m / (METERS_PER_DEGREE * lon_scale);

    let mut positions = Vec::new();
    let mut lat = rect.min().y;
    while lat <= rect.max().y {
        let mut lon = rect.min().x;
        while lon <= rect.max().x {
            if polygon.contains(&Point::new(lon, lat)) {
                positions.push(LatLon::new(lat, lon));
            }
            lon += lon_step;
        }
        lat += lat_step;
    }
    positions
}
