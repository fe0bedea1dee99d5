//! Item types and their grid footprints.
//!
//! A [`FootprintCatalog`] is the single source of truth for how much of the garden grid an
//! item type consumes and how far apart its instances are spread in world space. It is
//! populated once at startup, either in code, from [`FootprintCatalog::garden_defaults`],
//! or (with the `ron` feature) from RON text.
//!
//! The [`models`] submodule holds the collaborator tables that feed `add` requests:
//! render model information per type and the classifier category mapping.
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod models;

pub type ItemTypeId = String;

/// Grid footprint of one item type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FootprintSpec {
    /// Occupied cells along the column axis.
    pub width: usize,
    /// Occupied cells along the row axis.
    pub height: usize,
    /// Free cells required around the footprint at placement time.
    pub spacing: usize,
    /// Multiplier applied to the tile size when mapping cells to world space.
    pub world_spacing_factor: f32,
    /// Optional override of the multiplier used by the grid size policy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_factor: Option<f32>,
}

impl Default for FootprintSpec {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            spacing: 0,
            world_spacing_factor: 1.0,
            area_factor: None,
        }
    }
}

impl FootprintSpec {
    /// Creates a footprint of `width` × `height` cells with no spacing and unit world factor.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1, "footprint must be at least 1x1");
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Sets the placement-time spacing in cells.
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the world spacing factor.
    pub fn with_world_spacing_factor(mut self, factor: f32) -> Self {
        self.world_spacing_factor = factor;
        self
    }

    /// Sets the factor used by the grid size policy instead of the world spacing factor.
    pub fn with_area_factor(mut self, factor: f32) -> Self {
        self.area_factor = Some(factor);
        self
    }

    /// Number of cells occupied by one item.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Multiplier used when estimating the grid area a batch of items needs.
    pub fn packing_factor(&self) -> f32 {
        self.area_factor.unwrap_or(self.world_spacing_factor)
    }

    /// Validates the footprint, returning an error if any dimension or factor is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "footprint must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.world_spacing_factor.is_finite() || self.world_spacing_factor <= 0.0 {
            return Err(Error::InvalidConfig(
                "world_spacing_factor must be finite and > 0".into(),
            ));
        }
        if let Some(factor) = self.area_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(Error::InvalidConfig(
                    "area_factor must be finite and > 0".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Lookup table from item type to [`FootprintSpec`].
#[derive(Debug, Clone, Default)]
pub struct FootprintCatalog {
    specs: HashMap<ItemTypeId, FootprintSpec>,
}

impl FootprintCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// The plant table used by the garden: small 1x1 plants, 2x2 bushes and 3x3 trees.
    ///
    /// Flowers pack tightly (no spacing, area factor 1.0, world factor 1.2); every other
    /// type keeps one free cell around it and spreads by 1.5 in world space.
    pub fn garden_defaults() -> Self {
        let spaced = |w, h| {
            FootprintSpec::new(w, h)
                .with_spacing(1)
                .with_world_spacing_factor(1.5)
        };
        Self::new()
            .with(
                "flower",
                FootprintSpec::new(1, 1)
                    .with_world_spacing_factor(1.2)
                    .with_area_factor(1.0),
            )
            .with("mushroom", spaced(1, 1))
            .with("fern", spaced(1, 1))
            .with("bush", spaced(2, 2))
            .with("pinetree", spaced(3, 3))
            .with("roundtree", spaced(3, 3))
    }

    /// Adds or replaces the footprint of `item_type`.
    pub fn with(mut self, item_type: impl Into<ItemTypeId>, spec: FootprintSpec) -> Self {
        self.specs.insert(item_type.into(), spec);
        self
    }

    /// Registers a validated footprint, rejecting a type that is already present.
    pub fn try_insert(&mut self, item_type: impl Into<ItemTypeId>, spec: FootprintSpec) -> Result<()> {
        let item_type = item_type.into();
        spec.validate()?;
        if self.specs.contains_key(&item_type) {
            return Err(Error::DuplicateItemType { item_type });
        }
        self.specs.insert(item_type, spec);
        Ok(())
    }

    /// Resolves the footprint of `item_type`.
    pub fn lookup(&self, item_type: &str) -> Result<FootprintSpec> {
        self.specs
            .get(item_type)
            .copied()
            .ok_or_else(|| Error::unknown(item_type))
    }

    pub fn contains(&self, item_type: &str) -> bool {
        self.specs.contains_key(item_type)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Registered item types in sorted order.
    pub fn item_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Validates every registered footprint.
    pub fn validate(&self) -> Result<()> {
        for (item_type, spec) in &self.specs {
            spec.validate().map_err(|e| match e {
                Error::InvalidConfig(msg) => Error::InvalidConfig(format!("{item_type}: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }

    /// Parses a catalog from RON text: a list of `(item_type: "...", footprint: (...))` entries.
    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let defs: Vec<FootprintDef> = ron::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        let mut catalog = Self::new();
        for def in defs {
            catalog.try_insert(def.item_type, def.footprint)?;
        }
        Ok(catalog)
    }
}

/// One catalog entry as written in configuration files.
#[cfg(feature = "ron")]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FootprintDef {
    item_type: ItemTypeId,
    footprint: FootprintSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garden_defaults_cover_all_plant_types() {
        let catalog = FootprintCatalog::garden_defaults();
        assert_eq!(
            catalog.item_types(),
            vec!["bush", "fern", "flower", "mushroom", "pinetree", "roundtree"]
        );
        catalog.validate().expect("defaults are valid");

        let flower = catalog.lookup("flower").unwrap();
        assert_eq!((flower.width, flower.height, flower.spacing), (1, 1, 0));
        assert_eq!(flower.world_spacing_factor, 1.2);
        assert_eq!(flower.packing_factor(), 1.0);

        let tree = catalog.lookup("roundtree").unwrap();
        assert_eq!(tree.area(), 9);
        assert_eq!(tree.spacing, 1);
        assert_eq!(tree.packing_factor(), 1.5);
    }

    #[test]
    fn lookup_of_unregistered_type_fails() {
        let catalog = FootprintCatalog::garden_defaults();
        let err = catalog.lookup("not-a-real-type").unwrap_err();
        assert_eq!(err, Error::unknown("not-a-real-type"));
    }

    #[test]
    fn try_insert_rejects_duplicates_and_invalid_specs() {
        let mut catalog = FootprintCatalog::new();
        catalog.try_insert("hedge", FootprintSpec::new(4, 1)).unwrap();
        assert!(matches!(
            catalog.try_insert("hedge", FootprintSpec::new(1, 1)),
            Err(Error::DuplicateItemType { .. })
        ));

        let zero_wide = FootprintSpec {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            catalog.try_insert("ghost", zero_wide),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn validate_rejects_non_positive_factors() {
        let spec = FootprintSpec::new(1, 1).with_world_spacing_factor(0.0);
        assert!(spec.validate().is_err());
        let spec = FootprintSpec::new(1, 1).with_area_factor(f32::NAN);
        assert!(spec.validate().is_err());
    }

    #[cfg(feature = "ron")]
    #[test]
    fn parses_catalog_from_ron() {
        let text = r#"[
            (item_type: "tulip", footprint: (width: 1, height: 1, spacing: 0, world_spacing_factor: 1.2)),
            (item_type: "oak", footprint: (width: 3, height: 3, spacing: 1, world_spacing_factor: 1.5, area_factor: Some(2.0))),
        ]"#;
        let catalog = FootprintCatalog::from_ron_str(text).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("oak").unwrap().packing_factor(), 2.0);
        assert_eq!(catalog.lookup("tulip").unwrap().area_factor, None);
    }

    #[cfg(feature = "ron")]
    #[test]
    fn ron_catalog_rejects_duplicate_types() {
        let text = r#"[
            (item_type: "tulip", footprint: (width: 1, height: 1, spacing: 0, world_spacing_factor: 1.2)),
            (item_type: "tulip", footprint: (width: 2, height: 2, spacing: 0, world_spacing_factor: 1.2)),
        ]"#;
        assert!(matches!(
            FootprintCatalog::from_ron_str(text),
            Err(Error::DuplicateItemType { .. })
        ));
    }
}
