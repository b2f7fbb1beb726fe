//! Geometry primitives
//!
//! Thin layer over the `geo` crate plus the great-circle math the planner
//! needs. All polygons use the crate's (x = lon, y = lat) convention; the
//! engine's own wire types stay in lat/lon order.

pub mod grid;

use geo::{Area, BoundingRect, ChamberlainDuquetteArea, Contains, ConvexHull};
use geo::{LineString, MultiPoint, Point, Polygon};

use shared::{BoundingBox, LatLon, SamplePoint};

use crate::utils::{AppError, AppResult};

pub use grid::point_grid;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters (haversine).
pub fn haversine_m(a: LatLon, b: LatLon) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat * 0.5).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon * 0.5).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Build a polygon from a submitted ring, validating it in the process.
///
/// Accepts open or closed rings. Rejects rings with fewer than 3 distinct
/// vertices or a degenerate (zero-area) shape.
pub fn ring_to_polygon(ring: &[LatLon]) -> AppResult<Polygon<f64>> {
    let mut coords: Vec<(f64, f64)> = ring.iter().map(|c| (c.lon, c.lat)).collect();
    // Drop the explicit closing vertex if present; LineString closes itself.
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }

    let mut distinct = coords.clone();
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    distinct.dedup();
    if distinct.len() < 3 {
        return Err(AppError::validation(
            "zone polygon needs at least 3 distinct vertices",
        ));
    }

    let polygon = Polygon::new(LineString::from(coords), vec![]);
    if polygon.unsigned_area() == 0.0 {
        return Err(AppError::validation("zone polygon encloses no area"));
    }
    Ok(polygon)
}

/// Closed lat/lon ring of a polygon's exterior.
pub fn polygon_to_ring(polygon: &Polygon<f64>) -> Vec<LatLon> {
    polygon
        .exterior()
        .coords()
        .map(|c| LatLon::new(c.y, c.x))
        .collect()
}

/// Bounding box of a polygon, as the point-source query shape.
pub fn bounding_box(polygon: &Polygon<f64>) -> AppResult<BoundingBox> {
    let rect = polygon
        .bounding_rect()
        .ok_or_else(|| AppError::validation("zone polygon has no extent"))?;
    Ok(BoundingBox {
        north: rect.max().y,
        south: rect.min().y,
        east: rect.max().x,
        west: rect.min().x,
    })
}

/// Exact point-in-polygon refinement after the bounding-box query.
pub fn points_inside(polygon: &Polygon<f64>, points: Vec<SamplePoint>) -> Vec<SamplePoint> {
    points
        .into_iter()
        .filter(|p| polygon.contains(&Point::new(p.lon, p.lat)))
        .collect()
}

/// Perimeter of the convex hull of a point set, in meters.
///
/// Returns `None` when no proper hull exists (fewer than 3 points, or all
/// points collinear); callers fall back to a pairwise-distance estimate.
pub fn hull_perimeter_m(points: &[LatLon]) -> Option<f64> {
    if points.len() < 3 {
        return None;
    }
    let multi: MultiPoint<f64> = points
        .iter()
        .map(|c| Point::new(c.lon, c.lat))
        .collect::<Vec<_>>()
        .into();
    let hull = multi.convex_hull();
    if hull.unsigned_area() == 0.0 {
        return None;
    }

    let ring = polygon_to_ring(&hull);
    let perimeter = ring
        .windows(2)
        .map(|pair| haversine_m(pair[0], pair[1]))
        .sum();
    Some(perimeter)
}

/// Largest pairwise great-circle distance of a point set, in meters.
pub fn max_pairwise_m(points: &[LatLon]) -> f64 {
    let mut max = 0.0_f64;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = haversine_m(points[i], points[j]);
            if d > max {
                max = d;
            }
        }
    }
    max
}

/// Spherical surface area of a polygon in square kilometers.
pub fn area_km2(polygon: &Polygon<f64>) -> f64 {
    polygon.chamberlain_duquette_unsigned_area() / 1_000_000.0
}
