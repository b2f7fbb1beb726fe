//! Constraint validation around a planning pass
//!
//! Every rejection carries the counts the operator needs to redraw a smaller
//! zone instead of guessing at an opaque failure.

use shared::{LatLon, SamplePoint};

use crate::core::Config;
use crate::geo::{hull_perimeter_m, max_pairwise_m};
use crate::planner::{coverage, sequence, Tour};
use crate::utils::AppError;

/// Why a plan was rejected. Checks run in declaration order and
/// short-circuit at the first failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    #[error("no sampling positions available inside the zone; collect bootstrap data first")]
    NoCoverageSource,

    #[error("too many points ({count}), the maximum is {max}")]
    TooManyPoints { count: usize, max: usize },

    #[error("estimated tour length {:.2} km exceeds the {:.2} km limit", .estimated_m / 1000.0, .max_m / 1000.0)]
    TourTooLong { estimated_m: f64, max_m: f64 },

    #[error("position cap of {cap} reached with {covered} of {total} points covered")]
    PositionCapReached {
        covered: usize,
        total: usize,
        cap: usize,
    },

    #[error("{uncovered} of {total} points are not covered by any sampling position")]
    UncoveredPoints { uncovered: usize, total: usize },
}

impl From<ConstraintError> for AppError {
    fn from(e: ConstraintError) -> Self {
        AppError::BusinessRule(e.to_string())
    }
}

/// Cheap tour-length estimate used before the expensive cover pass.
///
/// Convex-hull perimeter when a proper hull exists; twice the maximum
/// pairwise distance for degenerate or collinear sets.
pub fn estimate_tour_length_m(points: &[LatLon]) -> f64 {
    if points.len() <= 1 {
        return 0.0;
    }
    hull_perimeter_m(points).unwrap_or_else(|| 2.0 * max_pairwise_m(points))
}

/// Pre-planning checks: coverage source, point ceiling, length estimate.
pub fn check_input(points: &[SamplePoint], config: &Config) -> Result<(), ConstraintError> {
    if points.is_empty() {
        return Err(ConstraintError::NoCoverageSource);
    }
    // Point ceiling comes before the estimate: the estimate itself is
    // quadratic in the degenerate fallback.
    if points.len() > config.max_sample_points {
        return Err(ConstraintError::TooManyPoints {
            count: points.len(),
            max: config.max_sample_points,
        });
    }
    let coords: Vec<LatLon> = points.iter().map(|p| p.coord()).collect();
    let estimated_m = estimate_tour_length_m(&coords);
    if estimated_m > config.max_tour_length_m {
        return Err(ConstraintError::TourTooLong {
            estimated_m,
            max_m: config.max_tour_length_m,
        });
    }
    Ok(())
}

/// Post-planning checks: the plan must cover every point within the cap.
pub fn check_plan(
    plan: &coverage::CoveragePlan,
    total: usize,
    config: &Config,
) -> Result<(), ConstraintError> {
    if plan.discs.len() >= config.max_positions && !plan.uncovered.is_empty() {
        return Err(ConstraintError::PositionCapReached {
            covered: total - plan.uncovered.len(),
            total,
            cap: config.max_positions,
        });
    }
    if !plan.uncovered.is_empty() {
        return Err(ConstraintError::UncoveredPoints {
            uncovered: plan.uncovered.len(),
            total,
        });
    }
    Ok(())
}

/// Full planning pipeline: validate, cover, validate, sequence.
///
/// Only a fully covering plan inside every ceiling produces a tour.
pub fn build_route(points: &[SamplePoint], config: &Config) -> Result<Tour, ConstraintError> {
    check_input(points, config)?;
    let plan = coverage::plan(points, config.scan_radius_m, config.max_positions);
    check_plan(&plan, points.len(), config)?;
    Ok(sequence::sequence(&plan.centers()))
}
