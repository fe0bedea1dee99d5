//! Grid growth with recentering.
use crate::error::Result;
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::GridCell;

/// Offset applied to every old cell when a grid of side `old_size` grows to `new_size`.
pub fn recenter_offset(old_size: usize, new_size: usize) -> usize {
    new_size.saturating_sub(old_size) / 2
}

/// Builds a grid of side `new_size` holding the occupancy of `grid`, recentered.
///
/// Old cell `(c, r)` maps to `(c + offset, r + offset)` with
/// `offset = floor((new_size - old_size) / 2)`. Shrinking is not supported: a `new_size`
/// not larger than the current size returns an unchanged copy.
///
/// Fails with [`crate::error::Error::GridTooLarge`] when the new grid cannot be allocated.
pub fn expand(grid: &OccupancyGrid, new_size: usize) -> Result<OccupancyGrid> {
    let old_size = grid.size();
    if new_size <= old_size {
        return Ok(grid.clone());
    }

    let offset = recenter_offset(old_size, new_size);
    let mut out = OccupancyGrid::try_new(new_size)?;
    for cell in grid.occupied_cells() {
        out.set(cell.shifted(offset), true);
    }
    Ok(out)
}

/// Where `cell` of the old grid ends up after growing from `old_size` to `new_size`.
pub fn recenter_cell(cell: GridCell, old_size: usize, new_size: usize) -> GridCell {
    cell.shifted(recenter_offset(old_size, new_size))
}
