//! Boolean occupancy matrix backing the garden.
use crate::catalog::FootprintSpec;
use crate::error::{Error, Result};
use crate::grid::GridCell;

/// Square matrix of occupied flags, stored row-major.
///
/// The side length is fixed at construction. Growing the garden builds a new grid through
/// [`crate::grid::expand::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: usize,
    cells: Vec<bool>,
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new(1)
    }
}

impl OccupancyGrid {
    /// Creates an empty grid of side `size`.
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 1, "grid size must be >= 1");
        let size = size.max(1);
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Creates an empty grid, returning an error for a zero side length or a cell count that
    /// overflows or cannot be allocated.
    pub fn try_new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("grid size must be >= 1".into()));
        }
        let too_large = || Error::GridTooLarge { size };
        let count = size.checked_mul(size).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(count).map_err(|_| too_large())?;
        cells.resize(count, false);
        Ok(Self { size, cells })
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.size && row < self.size).then(|| row * self.size + col)
    }

    /// Occupancy of a single cell, `None` when outside the grid.
    pub fn get(&self, cell: GridCell) -> Option<bool> {
        self.index(cell.col, cell.row).map(|i| self.cells[i])
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.get(cell).unwrap_or(false)
    }

    /// Checks whether `footprint` fits at `(col, row)` with its spacing ring free.
    ///
    /// The checked rectangle spans `(col - spacing, row - spacing)` to
    /// `(col + width + spacing - 1, row + height + spacing - 1)`. Any part of it outside the
    /// grid makes the area unavailable.
    pub fn is_area_free(&self, col: usize, row: usize, footprint: &FootprintSpec) -> bool {
        let spacing = footprint.spacing;
        let (Some(min_col), Some(min_row)) = (col.checked_sub(spacing), row.checked_sub(spacing))
        else {
            return false;
        };
        let max_col = col + footprint.width + spacing;
        let max_row = row + footprint.height + spacing;
        if max_col > self.size || max_row > self.size {
            return false;
        }

        (min_row..max_row).all(|r| {
            let start = r * self.size;
            !self.cells[start + min_col..start + max_col]
                .iter()
                .any(|&occupied| occupied)
        })
    }

    /// Marks the `width × height` rectangle anchored at `cell` as occupied.
    ///
    /// Spacing cells are not marked. Cells outside the grid are ignored.
    pub fn occupy(&mut self, cell: GridCell, footprint: &FootprintSpec) {
        debug_assert!(
            cell.col + footprint.width <= self.size && cell.row + footprint.height <= self.size,
            "footprint at {cell:?} exceeds grid of size {}",
            self.size
        );
        for c in cell.footprint_cells(footprint) {
            if let Some(i) = self.index(c.col, c.row) {
                self.cells[i] = true;
            }
        }
    }

    /// Marks a single cell as occupied, returning `false` when it lies outside the grid.
    pub fn set(&mut self, cell: GridCell, occupied: bool) -> bool {
        match self.index(cell.col, cell.row) {
            Some(i) => {
                self.cells[i] = occupied;
                true
            }
            None => false,
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &occupied)| occupied)
            .map(|(i, _)| GridCell::new(i % self.size, i / self.size))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    /// Raw row-major occupancy flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}
