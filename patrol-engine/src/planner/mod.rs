//! Route planning
//!
//! Turns the eligible points of a zone into a bounded patrol tour:
//! constraint pre-checks, greedy disc cover, post-checks, then
//! nearest-neighbor sequencing.

pub mod constraints;
pub mod coverage;
pub mod sequence;

pub use constraints::{build_route, estimate_tour_length_m, ConstraintError};
pub use coverage::{plan, CoverageDisc, CoveragePlan};
pub use sequence::{sequence, Tour};
