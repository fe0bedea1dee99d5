//! Configuration for a [`crate::garden::GardenState`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::DEFAULT_TILE_SIZE;
use crate::error::{Error, Result};
use crate::grid::policy::GridSizePolicy;
use crate::placement::planner::DEFAULT_ATTEMPT_FACTOR;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GardenConfig {
    /// World size of one grid tile before the per-type spacing factor.
    pub tile_size: f32,
    /// Policy deciding when and how far the grid grows.
    pub size_policy: GridSizePolicy,
    /// Randomized samples per grid cell before the planner falls back to a scan.
    pub attempt_factor: usize,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            size_policy: GridSizePolicy::default(),
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
        }
    }
}

impl GardenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tile size.
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Sets the grid size policy.
    pub fn with_size_policy(mut self, size_policy: GridSizePolicy) -> Self {
        self.size_policy = size_policy;
        self
    }

    /// Sets the randomized attempt factor.
    pub fn with_attempt_factor(mut self, attempt_factor: usize) -> Self {
        self.attempt_factor = attempt_factor;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(Error::InvalidConfig(
                "tile_size must be finite and > 0".into(),
            ));
        }
        self.size_policy.validate()
    }
}
