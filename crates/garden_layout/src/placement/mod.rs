//! Placement strategies for choosing a free anchor cell for a footprint.
//!
//! This module defines the [`PlacementStrategy`] trait used by
//! [`crate::garden::GardenState`] and the default [`CenterBiasedPlanner`]. Randomness is always
//! injected by the caller, so a seeded RNG reproduces the exact same cell choices.
use rand::RngCore;

use crate::catalog::FootprintSpec;
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::GridCell;

pub mod planner;

pub use planner::CenterBiasedPlanner;

/// How a placement candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Randomized sampling succeeded after `attempts` samples.
    Random { attempts: usize },
    /// Randomized sampling exhausted its budget; the exhaustive scan found the cell.
    Scan,
}

/// A free anchor cell together with the phase that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    pub cell: GridCell,
    pub phase: SearchPhase,
}

/// Trait for anchor-cell search.
///
/// Implementations must only return cells for which
/// [`OccupancyGrid::is_area_free`] holds, and should return `None` only when no such cell
/// exists.
pub trait PlacementStrategy: Send + Sync {
    fn find(
        &self,
        grid: &OccupancyGrid,
        footprint: &FootprintSpec,
        rng: &mut dyn RngCore,
    ) -> Option<Found>;
}

/// First free anchor cell, scanning columns in order and rows within each column.
pub fn scan_first_free(grid: &OccupancyGrid, footprint: &FootprintSpec) -> Option<GridCell> {
    let size = grid.size();
    (0..size)
        .flat_map(|col| (0..size).map(move |row| GridCell::new(col, row)))
        .find(|cell| grid.is_area_free(cell.col, cell.row, footprint))
}

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits of a word so every value is exactly representable and never rounds
/// up to `1.0`.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// RNG returning the same word forever.
    pub struct FixedRng {
        pub value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }
}
