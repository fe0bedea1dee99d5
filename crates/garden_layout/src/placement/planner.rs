//! Center-biased randomized planner with an exhaustive fallback scan.
use std::f32::consts::TAU;

use rand::RngCore;
use tracing::debug;

use crate::catalog::FootprintSpec;
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::GridCell;
use crate::placement::{rand01, scan_first_free, Found, PlacementStrategy, SearchPhase};

pub const DEFAULT_ATTEMPT_FACTOR: usize = 2;

/// Samples anchor cells around the grid center, falling back to a full scan.
///
/// Each sample draws a radius uniformly from `[0, center)` and an angle from `[0, 2π)`, so
/// cells near the center are hit more often and the garden grows outward in an organic
/// cluster. Up to `attempt_factor × size²` samples are drawn before the scan takes over,
/// which keeps the search complete: `None` means no free anchor exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterBiasedPlanner {
    pub attempt_factor: usize,
}

impl Default for CenterBiasedPlanner {
    fn default() -> Self {
        Self {
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
        }
    }
}

impl CenterBiasedPlanner {
    pub fn new(attempt_factor: usize) -> Self {
        Self { attempt_factor }
    }

    /// Randomized sample budget for a grid of side `size`.
    pub fn attempt_budget(&self, size: usize) -> usize {
        self.attempt_factor.saturating_mul(size.saturating_mul(size))
    }

    fn sample(&self, center: usize, rng: &mut dyn RngCore) -> (i64, i64) {
        let radius = rand01(rng) * center as f32;
        let angle = rand01(rng) * TAU;
        let col = center as i64 + round_half_up(angle.cos() * radius);
        let row = center as i64 + round_half_up(angle.sin() * radius);
        (col, row)
    }
}

impl PlacementStrategy for CenterBiasedPlanner {
    fn find(
        &self,
        grid: &OccupancyGrid,
        footprint: &FootprintSpec,
        rng: &mut dyn RngCore,
    ) -> Option<Found> {
        let size = grid.size();
        let center = size / 2;
        let budget = self.attempt_budget(size);

        for attempt in 0..budget {
            let (col, row) = self.sample(center, rng);
            if col < 0 || row < 0 {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            if col < size && row < size && grid.is_area_free(col, row, footprint) {
                return Some(Found {
                    cell: GridCell::new(col, row),
                    phase: SearchPhase::Random {
                        attempts: attempt + 1,
                    },
                });
            }
        }

        debug!(
            "Randomized placement exhausted {} attempts on a {}x{} grid; scanning.",
            budget, size, size
        );
        scan_first_free(grid, footprint).map(|cell| Found {
            cell,
            phase: SearchPhase::Scan,
        })
    }
}

/// Rounds to the nearest integer, with halves rounded towards positive infinity.
#[inline]
fn round_half_up(v: f32) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::placement::test_rng::FixedRng;

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.51), -1);
        assert_eq!(round_half_up(2.49), 2);
    }

    #[test]
    fn zero_radius_lands_on_center() {
        let grid = OccupancyGrid::new(6);
        let planner = CenterBiasedPlanner::default();
        let mut rng = FixedRng { value: 0 };
        let found = planner
            .find(&grid, &FootprintSpec::new(1, 1), &mut rng)
            .unwrap();
        assert_eq!(found.cell, GridCell::new(3, 3));
        assert_eq!(found.phase, SearchPhase::Random { attempts: 1 });
    }

    #[test]
    fn falls_back_to_scan_when_sampling_keeps_missing() {
        let mut grid = OccupancyGrid::new(6);
        grid.set(GridCell::new(3, 3), true);
        let planner = CenterBiasedPlanner::default();
        // A constant RNG samples the occupied center forever.
        let mut rng = FixedRng { value: 0 };
        let found = planner
            .find(&grid, &FootprintSpec::new(1, 1), &mut rng)
            .unwrap();
        assert_eq!(found.cell, GridCell::new(0, 0));
        assert_eq!(found.phase, SearchPhase::Scan);
    }

    #[test]
    fn zero_attempt_factor_goes_straight_to_scan() {
        let grid = OccupancyGrid::new(4);
        let planner = CenterBiasedPlanner::new(0);
        let mut rng = StdRng::seed_from_u64(9);
        let found = planner
            .find(&grid, &FootprintSpec::new(1, 1), &mut rng)
            .unwrap();
        assert_eq!(found.phase, SearchPhase::Scan);
        assert_eq!(found.cell, GridCell::new(0, 0));
    }

    #[test]
    fn finds_the_only_free_cell() {
        let mut grid = OccupancyGrid::new(5);
        for row in 0..5 {
            for col in 0..5 {
                if (col, row) != (4, 1) {
                    grid.set(GridCell::new(col, row), true);
                }
            }
        }
        let planner = CenterBiasedPlanner::default();
        let mut rng = StdRng::seed_from_u64(3);
        let found = planner
            .find(&grid, &FootprintSpec::new(1, 1), &mut rng)
            .unwrap();
        assert_eq!(found.cell, GridCell::new(4, 1));
    }

    #[test]
    fn none_when_nothing_fits() {
        let grid = OccupancyGrid::new(4);
        let planner = CenterBiasedPlanner::default();
        let mut rng = StdRng::seed_from_u64(1);
        let tree = FootprintSpec::new(3, 3).with_spacing(1);
        assert!(planner.find(&grid, &tree, &mut rng).is_none());
    }

    #[test]
    fn found_cells_are_always_free() {
        let planner = CenterBiasedPlanner::default();
        let bush = FootprintSpec::new(2, 2).with_spacing(1);
        for seed in 0..32 {
            let mut grid = OccupancyGrid::new(12);
            let mut rng = StdRng::seed_from_u64(seed);
            while let Some(found) = planner.find(&grid, &bush, &mut rng) {
                assert!(grid.is_area_free(found.cell.col, found.cell.row, &bush));
                grid.occupy(found.cell, &bush);
            }
            // Every 2x2 bush keeps a ring free, so a 12x12 grid cannot be saturated.
            assert!(!grid.is_full());
            assert_eq!(grid.occupied_count() % 4, 0);
        }
    }

    #[test]
    fn same_seed_same_cells() {
        let planner = CenterBiasedPlanner::default();
        let unit = FootprintSpec::new(1, 1);
        let run = |seed| {
            let mut grid = OccupancyGrid::new(10);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut cells = Vec::new();
            for _ in 0..20 {
                let found = planner.find(&grid, &unit, &mut rng).unwrap();
                grid.occupy(found.cell, &unit);
                cells.push(found.cell);
            }
            cells
        };
        assert_eq!(run(77), run(77));
    }
}
