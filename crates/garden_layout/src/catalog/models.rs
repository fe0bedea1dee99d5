//! Render model information and classifier category mapping.
//!
//! Neither table influences packing. [`ModelRegistry`] supplies the [`ModelInfo`] that is
//! copied into every placed item, and [`CategoryMap`] reduces the free-form category
//! returned by the photo classifier to one of the catalog's item types.
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::ItemTypeId;
use crate::error::{Error, Result};

/// Render model reference and visual transform for one item type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelInfo {
    /// Path or asset reference of the model.
    pub reference: String,
    /// Uniform scale applied by the renderer.
    pub scale: f32,
    /// Elevation of the model above the ground plane.
    pub y_offset: f32,
}

impl ModelInfo {
    pub fn new(reference: impl Into<String>, scale: f32, y_offset: f32) -> Self {
        Self {
            reference: reference.into(),
            scale,
            y_offset,
        }
    }
}

/// Lookup table from item type to [`ModelInfo`].
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<ItemTypeId, ModelInfo>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Models for the default garden catalog.
    pub fn garden_defaults() -> Self {
        Self::new()
            .with("flower", ModelInfo::new("plants/flower.glb", 1.0, 1.0))
            .with("bush", ModelInfo::new("plants/bush.glb", 15.0, 1.0))
            .with("fern", ModelInfo::new("plants/fern.glb", 0.8, 0.7))
            .with("mushroom", ModelInfo::new("plants/mushroom.glb", 0.08, 0.4))
            .with("pinetree", ModelInfo::new("plants/pinetree.glb", 3.5, 6.0))
            .with("roundtree", ModelInfo::new("plants/roundtree.glb", 4.5, 6.0))
    }

    pub fn with(mut self, item_type: impl Into<ItemTypeId>, info: ModelInfo) -> Self {
        self.models.insert(item_type.into(), info);
        self
    }

    /// Registers a model, rejecting a type that is already present.
    pub fn try_insert(&mut self, item_type: impl Into<ItemTypeId>, info: ModelInfo) -> Result<()> {
        let item_type = item_type.into();
        if self.models.contains_key(&item_type) {
            return Err(Error::DuplicateItemType { item_type });
        }
        self.models.insert(item_type, info);
        Ok(())
    }

    pub fn lookup(&self, item_type: &str) -> Result<&ModelInfo> {
        self.models
            .get(item_type)
            .ok_or_else(|| Error::unknown(item_type))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Parses a registry from RON text: a list of `(item_type: "...", model: (...))` entries.
    #[cfg(feature = "ron")]
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let defs: Vec<ModelDef> = ron::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        let mut registry = Self::new();
        for def in defs {
            registry.try_insert(def.item_type, def.model)?;
        }
        Ok(registry)
    }
}

#[cfg(feature = "ron")]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelDef {
    item_type: ItemTypeId,
    model: ModelInfo,
}

/// Maps classifier categories to item types.
///
/// Categories are matched after trimming and lowercasing. There is no implicit default:
/// an unmapped category fails with [`Error::UnknownItemType`] unless a fallback was set
/// with [`CategoryMap::with_fallback`].
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: HashMap<String, ItemTypeId>,
    fallback: Option<ItemTypeId>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: None,
        }
    }

    /// Categories understood by the garden's classifier prompt.
    pub fn garden_defaults() -> Self {
        Self::new()
            .with("tree", "pinetree")
            .with("flower", "flower")
            .with("bush", "bush")
            .with("fern", "fern")
    }

    pub fn with(mut self, category: &str, item_type: impl Into<ItemTypeId>) -> Self {
        self.entries.insert(normalize(category), item_type.into());
        self
    }

    /// Item type used for categories without an explicit mapping.
    pub fn with_fallback(mut self, item_type: impl Into<ItemTypeId>) -> Self {
        self.fallback = Some(item_type.into());
        self
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Resolves a classifier category to an item type.
    pub fn resolve(&self, category: &str) -> Result<&str> {
        self.entries
            .get(&normalize(category))
            .or(self.fallback.as_ref())
            .map(String::as_str)
            .ok_or_else(|| Error::unknown(category.trim()))
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FootprintCatalog;

    #[test]
    fn every_default_model_has_a_footprint() {
        let catalog = FootprintCatalog::garden_defaults();
        let models = ModelRegistry::garden_defaults();
        assert_eq!(models.len(), catalog.len());
        for item_type in catalog.item_types() {
            assert!(models.lookup(item_type).is_ok(), "missing model for {item_type}");
        }
    }

    #[test]
    fn model_lookup_reports_unknown_type() {
        let models = ModelRegistry::garden_defaults();
        assert_eq!(models.lookup("flower").unwrap().scale, 1.0);
        assert!(matches!(
            models.lookup("cactus"),
            Err(Error::UnknownItemType { .. })
        ));
    }

    #[test]
    fn category_resolution_is_case_insensitive() {
        let map = CategoryMap::garden_defaults();
        assert_eq!(map.resolve("Tree").unwrap(), "pinetree");
        assert_eq!(map.resolve("  FLOWER ").unwrap(), "flower");
    }

    #[test]
    fn unmapped_category_fails_without_fallback() {
        let map = CategoryMap::garden_defaults();
        let err = map.resolve(" Succulent ").unwrap_err();
        assert_eq!(err, Error::unknown("Succulent"));

        let map = map.with_fallback("flower");
        assert_eq!(map.fallback(), Some("flower"));
        assert_eq!(map.resolve("Succulent").unwrap(), "flower");
    }

    #[cfg(feature = "ron")]
    #[test]
    fn parses_registry_from_ron() {
        let text = r#"[
            (item_type: "tulip", model: (reference: "plants/tulip.glb", scale: 0.5, y_offset: 0.25)),
        ]"#;
        let registry = ModelRegistry::from_ron_str(text).unwrap();
        assert_eq!(
            registry.lookup("tulip").unwrap(),
            &ModelInfo::new("plants/tulip.glb", 0.5, 0.25)
        );
        assert!(matches!(
            ModelRegistry::from_ron_str("not ron"),
            Err(Error::Parse(_))
        ));
    }
}
