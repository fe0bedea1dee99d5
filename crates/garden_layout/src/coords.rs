//! Mapping between grid cells and world-space positions.
//!
//! The cell at index `floor(size / 2)` on both axes maps to the world origin. One cell spans
//! `tile_size × world_spacing_factor` world units, so types with a larger spacing factor are
//! spread further apart even though they occupy the same number of cells.
use glam::Vec2;

use crate::catalog::FootprintSpec;
use crate::grid::GridCell;

pub const DEFAULT_TILE_SIZE: f32 = 2.0;

/// Converts grid cells to world (x, z) positions and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub tile_size: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl CoordinateMapper {
    pub fn new(tile_size: f32) -> Self {
        debug_assert!(tile_size > 0.0, "tile_size must be > 0");
        Self { tile_size }
    }

    /// Grid index mapped to the world origin.
    pub fn center_offset(grid_size: usize) -> usize {
        grid_size / 2
    }

    /// World units spanned by one cell of `footprint`.
    pub fn cell_extent(&self, footprint: &FootprintSpec) -> f32 {
        self.tile_size * footprint.world_spacing_factor
    }

    /// World (x, z) of `cell` on a grid of side `grid_size`.
    pub fn to_world(&self, cell: GridCell, grid_size: usize, footprint: &FootprintSpec) -> Vec2 {
        let center = Self::center_offset(grid_size) as f32;
        let extent = self.cell_extent(footprint);
        Vec2::new(
            (cell.col as f32 - center) * extent,
            (cell.row as f32 - center) * extent,
        )
    }

    /// Nearest grid cell of a world (x, z) position, `None` when it falls outside the grid.
    pub fn to_grid(&self, position: Vec2, grid_size: usize, footprint: &FootprintSpec) -> Option<GridCell> {
        let extent = self.cell_extent(footprint);
        if extent <= 0.0 || !position.is_finite() {
            return None;
        }
        let center = Self::center_offset(grid_size) as f32;
        let col = (position.x / extent + center).round();
        let row = (position.y / extent + center).round();
        let limit = grid_size as f32;
        if col < 0.0 || row < 0.0 || col >= limit || row >= limit {
            return None;
        }
        Some(GridCell::new(col as usize, row as usize))
    }
}
