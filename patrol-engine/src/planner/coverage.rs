//! Greedy disc cover over a point set
//!
//! Candidate centers are the input points themselves. Each round picks the
//! candidate whose disc covers the most still-uncovered points, first-seen
//! order breaking ties, until everything is covered or the center cap is hit.
//! O(n²) per round; the point-count ceiling keeps n small enough for that.

use serde::Serialize;

use shared::SamplePoint;

use crate::geo::haversine_m;

/// One selected sampling position and the points its disc covers.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageDisc {
    pub center: SamplePoint,
    pub covered: Vec<SamplePoint>,
}

/// Result of a planning pass. Derived and ephemeral, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoveragePlan {
    /// Selected centers in selection order.
    pub discs: Vec<CoverageDisc>,
    /// Points no disc covers because the cap cut the pass short.
    pub uncovered: Vec<SamplePoint>,
}

impl CoveragePlan {
    pub fn centers(&self) -> Vec<SamplePoint> {
        self.discs.iter().map(|d| d.center).collect()
    }

    pub fn covered_count(&self) -> usize {
        self.discs.iter().map(|d| d.covered.len()).sum()
    }
}

/// Select disc centers covering every point, subject to the center cap.
///
/// Empty input yields an empty plan. A candidate always covers at least
/// itself, so each round makes progress; the zero-gain guard only matters for
/// pathological coordinates (NaN) and keeps the loop terminating regardless.
pub fn plan(points: &[SamplePoint], radius_m: f64, max_centers: usize) -> CoveragePlan {
    let mut covered = vec![false; points.len()];
    let mut discs: Vec<CoverageDisc> = Vec::new();

    while discs.len() < max_centers {
        let mut best: Option<(usize, Vec<usize>)> = None;
        for (i, candidate) in points.iter().enumerate() {
            if covered[i] {
                continue;
            }
            let gain: Vec<usize> = points
                .iter()
                .enumerate()
                .filter(|(j, p)| {
                    !covered[*j] && haversine_m(candidate.coord(), p.coord()) <= radius_m
                })
                .map(|(j, _)| j)
                .collect();
            // Strict greater-than: the first candidate seen wins ties.
            if best.as_ref().is_none_or(|(_, b)| gain.len() > b.len()) {
                best = Some((i, gain));
            }
        }

        match best {
            Some((i, gain)) if !gain.is_empty() => {
                for &j in &gain {
                    covered[j] = true;
                }
                discs.push(CoverageDisc {
                    center: points[i],
                    covered: gain.into_iter().map(|j| points[j]).collect(),
                });
            }
            _ => break,
        }
    }

    let uncovered = points
        .iter()
        .enumerate()
        .filter(|(j, _)| !covered[*j])
        .map(|(_, p)| *p)
        .collect();

    CoveragePlan { discs, uncovered }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(id: i64, lat: f64, lon: f64) -> SamplePoint {
        SamplePoint { id, lat, lon }
    }

    /// Five points inside a single disc radius collapse to one center.
    #[test]
    fn test_tight_cluster_needs_one_center() {
        let points = vec![
            pt(1, 48.7758, 9.1829),
            pt(2, 48.7760, 9.1831),
            pt(3, 48.7756, 9.1827),
            pt(4, 48.7759, 9.1827),
            pt(5, 48.7757, 9.1831),
        ];
        let plan = plan(&points, 70.0, 200);
        assert_eq!(plan.discs.len(), 1);
        assert!(plan.uncovered.is_empty());
        assert_eq!(plan.discs[0].covered.len(), 5);
    }

    /// Three points farther than a disc diameter apart need three centers.
    #[test]
    fn test_spread_points_need_one_center_each() {
        let points = vec![
            pt(1, 48.0, 9.0),
            pt(2, 48.002, 9.0),
            pt(3, 48.004, 9.0),
        ];
        let plan = plan(&points, 70.0, 200);
        assert_eq!(plan.discs.len(), 3);
        assert!(plan.uncovered.is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_plan() {
        let plan = plan(&[], 70.0, 200);
        assert!(plan.discs.is_empty());
        assert!(plan.uncovered.is_empty());
    }

    #[test]
    fn test_single_point_covers_itself() {
        let plan = plan(&[pt(7, 48.0, 9.0)], 70.0, 200);
        assert_eq!(plan.discs.len(), 1);
        assert_eq!(plan.discs[0].center.id, 7);
        assert!(plan.uncovered.is_empty());
    }

    #[test]
    fn test_cap_leaves_uncovered_remainder() {
        let points = vec![
            pt(1, 48.0, 9.0),
            pt(2, 48.002, 9.0),
            pt(3, 48.004, 9.0),
        ];
        let plan = plan(&points, 70.0, 1);
        assert_eq!(plan.discs.len(), 1);
        assert_eq!(plan.uncovered.len(), 2);
    }

    /// Every covered point is inside its center's disc, and covered plus
    /// uncovered partition the input.
    #[test]
    fn test_partition_invariant() {
        let points: Vec<SamplePoint> = (0..40)
            .map(|i| pt(i, 48.0 + (i as f64) * 0.0004, 9.0 + ((i % 5) as f64) * 0.0006))
            .collect();
        let radius = 70.0;
        let plan = plan(&points, radius, 200);

        let mut seen = 0;
        for disc in &plan.discs {
            for covered in &disc.covered {
                assert!(
                    crate::geo::haversine_m(disc.center.coord(), covered.coord()) <= radius
                );
                seen += 1;
            }
        }
        assert_eq!(seen + plan.uncovered.len(), points.len());
    }

    /// Same input, same selection: tie-break is first-seen, not random.
    #[test]
    fn test_deterministic_selection() {
        let points: Vec<SamplePoint> = (0..25)
            .map(|i| pt(i, 48.0 + ((i * 7 % 13) as f64) * 0.0005, 9.0 + ((i * 3 % 11) as f64) * 0.0005))
            .collect();
        let a = plan(&points, 70.0, 200);
        let b = plan(&points, 70.0, 200);
        let ids = |p: &CoveragePlan| p.discs.iter().map(|d| d.center.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }
}
