//! Garden state: the grid, the placed items, and the `add`/`reset` command API.
//!
//! [`GardenState`] composes the rest of the crate. An `add` request is validated, the grid is
//! grown by [`GridSizePolicy`](crate::grid::policy::GridSizePolicy) and
//! [`expand`](crate::grid::expand::expand) when needed, and each item is then anchored by the
//! configured [`PlacementStrategy`] and mapped to world space by [`CoordinateMapper`].
//!
//! Items are immutable once placed. When the grid grows, its existing occupancy is recentered
//! but stored item positions are not rewritten: every item keeps the grid and world
//! coordinates it was placed with. [`GardenState::current_cells`] translates an item's
//! footprint into the coordinates of the current grid.
use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::models::{CategoryMap, ModelInfo, ModelRegistry};
use crate::catalog::{FootprintCatalog, FootprintSpec, ItemTypeId};
use crate::coords::CoordinateMapper;
use crate::error::{Error, Result};
use crate::grid::expand::{expand, recenter_offset};
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::GridCell;
use crate::placement::{rand01, CenterBiasedPlanner, PlacementStrategy, SearchPhase};

pub mod config;
pub mod events;
pub mod shared;

use config::GardenConfig;
use events::{EventSink, GardenEvent, GardenEventKind};

/// An item anchored on the garden grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedItem {
    pub item_type: ItemTypeId,
    /// Anchor cell in the coordinates of the grid the item was placed on.
    pub grid_position: GridCell,
    /// World position; `y` is the model's elevation.
    pub world_position: Vec3,
    /// Rotation around the vertical axis in radians.
    pub rotation_y: f32,
    pub scale: f32,
    pub y_offset: f32,
    pub model_reference: String,
    /// Footprint the item was placed with.
    pub footprint: FootprintSpec,
    /// Grid side at placement time.
    pub grid_size: usize,
    /// Cumulative recentering shift of the grid at placement time.
    pub grid_shift: usize,
}

impl PlacedItem {
    /// Cells covered by the item, in placement-time grid coordinates.
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridCell> {
        self.grid_position.footprint_cells(&self.footprint)
    }

    /// World (x, z) position on the ground plane.
    pub fn world_xz(&self) -> Vec2 {
        Vec2::new(self.world_position.x, self.world_position.z)
    }

    /// World position as a `mint` vector for renderers built on other math libraries.
    pub fn world_position_mint(&self) -> mint::Vector3<f32> {
        self.world_position.into()
    }
}

/// Grid growth performed by an `add` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridExpansion {
    pub old_size: usize,
    pub new_size: usize,
    pub offset: usize,
}

/// Outcome of an `add` call.
///
/// A request that could not be fully satisfied is still a success: the items placed before
/// the grid ran out of room are kept, and `placed_count() < requested` signals the shortfall.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementResult {
    pub item_type: ItemTypeId,
    /// Items placed by this call, in placement order.
    pub placed: Vec<PlacedItem>,
    pub requested: usize,
    /// Grid side after the call.
    pub grid_size: usize,
    pub expansion: Option<GridExpansion>,
}

impl PlacementResult {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.requested
    }

    /// True when the grid ran out of room before every requested item was placed.
    pub fn is_exhausted(&self) -> bool {
        !self.is_complete()
    }

    /// Number of requested items that were not placed.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.placed.len())
    }

    /// User-facing warning for a partially satisfied request.
    pub fn warning(&self) -> Option<String> {
        self.is_exhausted().then(|| {
            format!(
                "only {} of {} {} items were placed; the garden is full",
                self.placed_count(),
                self.requested,
                self.item_type
            )
        })
    }
}

/// Garden layout state owned by a single caller.
///
/// All mutation goes through [`GardenState::add`] and [`GardenState::reset`]. Randomness is
/// passed into every call, so a seeded RNG reproduces the exact layout.
pub struct GardenState {
    config: GardenConfig,
    catalog: FootprintCatalog,
    mapper: CoordinateMapper,
    strategy: Box<dyn PlacementStrategy>,
    grid: OccupancyGrid,
    items: Vec<PlacedItem>,
    grid_shift: usize,
}

impl std::fmt::Debug for GardenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GardenState")
            .field("config", &self.config)
            .field("grid_size", &self.grid.size())
            .field("items", &self.items.len())
            .field("grid_shift", &self.grid_shift)
            .finish_non_exhaustive()
    }
}

impl GardenState {
    /// Creates an empty garden with the default configuration.
    pub fn new(catalog: FootprintCatalog) -> Self {
        let config = GardenConfig::default();
        debug_assert!(catalog.validate().is_ok(), "catalog contains invalid footprints");
        Self::build(catalog, config)
    }

    /// Creates an empty garden, validating the catalog and configuration.
    pub fn try_new(catalog: FootprintCatalog, config: GardenConfig) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self::build(catalog, config))
    }

    fn build(catalog: FootprintCatalog, config: GardenConfig) -> Self {
        Self {
            mapper: CoordinateMapper::new(config.tile_size),
            strategy: Box::new(CenterBiasedPlanner::new(config.attempt_factor)),
            config,
            catalog,
            grid: OccupancyGrid::new(1),
            items: Vec::new(),
            grid_shift: 0,
        }
    }

    /// Replaces the placement strategy.
    pub fn with_strategy<S: PlacementStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FootprintCatalog {
        &self.catalog
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// Cumulative recentering shift since the last reset.
    pub fn grid_shift(&self) -> usize {
        self.grid_shift
    }

    /// Placed items in placement order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_by_type(&self, item_type: &str) -> usize {
        self.items
            .iter()
            .filter(|item| item.item_type == item_type)
            .count()
    }

    /// Number of placed items per type.
    pub fn type_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.item_type.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn total_flowers(&self) -> usize {
        self.count_by_type("flower")
    }

    /// Number of occupied cells in the current grid.
    pub fn occupied_cells(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Cells covered by `item` in the coordinates of the current grid.
    pub fn current_cells<'a>(&self, item: &'a PlacedItem) -> impl Iterator<Item = GridCell> + 'a {
        let shift = self.grid_shift.saturating_sub(item.grid_shift);
        item.occupied_cells().map(move |cell| cell.shifted(shift))
    }

    /// Places `quantity` items of `item_type`.
    pub fn add<R: RngCore>(
        &mut self,
        item_type: &str,
        quantity: usize,
        model: &ModelInfo,
        rng: &mut R,
    ) -> Result<PlacementResult> {
        self.add_with_events(item_type, quantity, model, rng, &mut ())
    }

    /// Places `quantity` items of `item_type`, reporting progress to `sink`.
    ///
    /// Fails without touching the garden when `quantity` is zero, the type is not in the
    /// catalog, or the grid needed for the batch cannot be built. Otherwise grows the grid if
    /// the policy asks for it and places items one by one until all are placed or no free
    /// anchor remains.
    pub fn add_with_events<R: RngCore>(
        &mut self,
        item_type: &str,
        quantity: usize,
        model: &ModelInfo,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<PlacementResult> {
        if quantity == 0 {
            return Err(Error::InvalidQuantity { quantity });
        }
        let footprint = self.catalog.lookup(item_type)?;
        let total_items = self
            .items
            .len()
            .checked_add(quantity)
            .ok_or(Error::TooManyItems {
                requested: quantity,
            })?;
        let growth = self.plan_growth(total_items, &footprint)?;

        if sink.wants(GardenEventKind::AddStarted) {
            sink.send(GardenEvent::AddStarted {
                item_type: item_type.to_owned(),
                requested: quantity,
                grid_size: self.grid.size(),
            });
        }

        let expansion = growth.map(|(grid, expansion)| self.apply_growth(grid, expansion, sink));

        let mut placed = Vec::with_capacity(quantity.min(self.grid.cell_count()));
        for _ in 0..quantity {
            let Some(found) = self.strategy.find(&self.grid, &footprint, &mut *rng) else {
                warn!(
                    "Only {} of {} '{}' items placed; no free cell on the {}x{} grid.",
                    placed.len(),
                    quantity,
                    item_type,
                    self.grid.size(),
                    self.grid.size()
                );
                if sink.wants(GardenEventKind::PlacementExhausted) {
                    sink.send(GardenEvent::PlacementExhausted {
                        item_type: item_type.to_owned(),
                        requested: quantity,
                        placed: placed.len(),
                    });
                }
                break;
            };

            if found.phase == SearchPhase::Scan && sink.wants(GardenEventKind::FallbackScanUsed) {
                sink.send(GardenEvent::FallbackScanUsed {
                    item_type: item_type.to_owned(),
                    cell: found.cell,
                });
            }

            self.grid.occupy(found.cell, &footprint);
            let xz = self.mapper.to_world(found.cell, self.grid.size(), &footprint);
            let item = PlacedItem {
                item_type: item_type.to_owned(),
                grid_position: found.cell,
                world_position: Vec3::new(xz.x, model.y_offset, xz.y),
                rotation_y: rand01(&mut *rng) * TAU,
                scale: model.scale,
                y_offset: model.y_offset,
                model_reference: model.reference.clone(),
                footprint,
                grid_size: self.grid.size(),
                grid_shift: self.grid_shift,
            };
            debug!(
                "Placed '{}' at ({}, {}) -> world ({:.2}, {:.2}).",
                item_type, found.cell.col, found.cell.row, xz.x, xz.y
            );

            self.items.push(item.clone());
            if sink.wants(GardenEventKind::ItemPlaced) {
                sink.send(GardenEvent::ItemPlaced {
                    index: self.items.len() - 1,
                    item: item.clone(),
                });
            }
            placed.push(item);
        }

        let result = PlacementResult {
            item_type: item_type.to_owned(),
            placed,
            requested: quantity,
            grid_size: self.grid.size(),
            expansion,
        };
        if sink.wants(GardenEventKind::AddFinished) {
            sink.send(GardenEvent::AddFinished {
                result: result.clone(),
            });
        }
        Ok(result)
    }

    /// Grid needed for `total_items` items of `footprint`, built without touching the garden.
    fn plan_growth(
        &self,
        total_items: usize,
        footprint: &FootprintSpec,
    ) -> Result<Option<(OccupancyGrid, GridExpansion)>> {
        let old_size = self.grid.size();
        let required = self
            .config
            .size_policy
            .required_size(total_items, footprint);
        if required <= old_size {
            return Ok(None);
        }

        let grid = expand(&self.grid, required)?;
        let expansion = GridExpansion {
            old_size,
            new_size: required,
            offset: recenter_offset(old_size, required),
        };
        Ok(Some((grid, expansion)))
    }

    fn apply_growth(
        &mut self,
        grid: OccupancyGrid,
        expansion: GridExpansion,
        sink: &mut dyn EventSink,
    ) -> GridExpansion {
        self.grid = grid;
        self.grid_shift += expansion.offset;
        info!(
            "Garden grid grew from {}x{} to {}x{} (offset {}).",
            expansion.old_size,
            expansion.old_size,
            expansion.new_size,
            expansion.new_size,
            expansion.offset
        );
        if sink.wants(GardenEventKind::GridExpanded) {
            sink.send(GardenEvent::GridExpanded {
                old_size: expansion.old_size,
                new_size: expansion.new_size,
                offset: expansion.offset,
            });
        }
        expansion
    }

    /// Resolves a classifier category and its model, then places `quantity` items.
    pub fn add_category<R: RngCore>(
        &mut self,
        category: &str,
        quantity: usize,
        categories: &CategoryMap,
        models: &ModelRegistry,
        rng: &mut R,
    ) -> Result<PlacementResult> {
        if quantity == 0 {
            return Err(Error::InvalidQuantity { quantity });
        }
        let item_type = categories.resolve(category)?.to_owned();
        let model = models.lookup(&item_type)?.clone();
        self.add(&item_type, quantity, &model, rng)
    }

    /// Clears the garden back to an empty 1x1 grid.
    pub fn reset(&mut self) {
        self.reset_with_events(&mut ());
    }

    pub fn reset_with_events(&mut self, sink: &mut dyn EventSink) {
        let previous_items = self.items.len();
        self.grid = OccupancyGrid::new(1);
        self.items = Vec::new();
        self.grid_shift = 0;
        info!("Garden reset ({} items removed).", previous_items);
        if sink.wants(GardenEventKind::Reset) {
            sink.send(GardenEvent::Reset { previous_items });
        }
    }
}
