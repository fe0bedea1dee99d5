//! Discrete garden grid: cell addressing, occupancy, sizing and growth.
//!
//! The grid is square and grows on demand. [`policy::GridSizePolicy`] decides how large it must
//! be for a batch, [`expand::expand`] grows it while recentering the existing occupancy, and
//! [`occupancy::OccupancyGrid`] answers the availability queries used by placement.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::FootprintSpec;

pub mod expand;
pub mod occupancy;
pub mod policy;

/// Zero-based (col, row) position within the garden grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
}

impl GridCell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Returns this cell shifted by `offset` along both axes.
    pub const fn shifted(self, offset: usize) -> Self {
        Self {
            col: self.col + offset,
            row: self.row + offset,
        }
    }

    /// Cells covered by a footprint anchored at this cell, in row-major order.
    pub fn footprint_cells(self, footprint: &FootprintSpec) -> impl Iterator<Item = GridCell> {
        let (col, row) = (self.col, self.row);
        let (width, height) = (footprint.width, footprint.height);
        (row..row + height).flat_map(move |r| (col..col + width).map(move |c| GridCell::new(c, r)))
    }
}

impl From<(usize, usize)> for GridCell {
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}
