#![forbid(unsafe_code)]
//! garden_layout: Grid-based placement of garden items with on-demand grid growth.
//!
//! Modules:
//! - catalog: footprints per item type, model metadata, and category mapping
//! - grid: occupancy matrix, sizing policy, and recentering expansion
//! - placement: center-biased randomized anchor search with an exhaustive fallback
//! - coords: grid cell to world position mapping
//! - garden: state, `add`/`reset` commands, events, and a thread-safe handle
//!
//! For examples, see the README and the `garden_layout_examples` crate.
pub mod catalog;
pub mod coords;
pub mod error;
pub mod garden;
pub mod grid;
pub mod placement;

/// Convenient re-exports for common types. Import with `use garden_layout::prelude::*;`.
pub mod prelude {
    pub use crate::catalog::models::{CategoryMap, ModelInfo, ModelRegistry};
    pub use crate::catalog::{FootprintCatalog, FootprintSpec, ItemTypeId};
    pub use crate::coords::CoordinateMapper;
    pub use crate::error::{Error, Result};
    pub use crate::garden::config::GardenConfig;
    pub use crate::garden::events::{
        EventSink, FnSink, GardenEvent, GardenEventKind, MultiSink, VecSink,
    };
    pub use crate::garden::shared::{GardenSnapshot, SharedGarden};
    pub use crate::garden::{GardenState, GridExpansion, PlacedItem, PlacementResult};
    pub use crate::grid::occupancy::OccupancyGrid;
    pub use crate::grid::policy::GridSizePolicy;
    pub use crate::grid::GridCell;
    pub use crate::placement::{CenterBiasedPlanner, Found, PlacementStrategy, SearchPhase};
}
