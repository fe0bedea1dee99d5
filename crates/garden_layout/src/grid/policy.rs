//! Grid sizing policy.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::FootprintSpec;
use crate::error::{Error, Result};

/// Computes how large the grid must be to hold a number of items.
///
/// ```text
/// area = count × width × height × packing_factor
/// size = max(ceil(sqrt(area)) + fixed_margin, minimum_size)
/// ```
///
/// The margin and minimum leave slack for the randomized planner; they are tuning values,
/// not a packing guarantee. An optional `maximum_size` caps growth for bounded gardens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSizePolicy {
    pub fixed_margin: usize,
    pub minimum_size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub maximum_size: Option<usize>,
}

impl Default for GridSizePolicy {
    fn default() -> Self {
        Self {
            fixed_margin: 4,
            minimum_size: 6,
            maximum_size: None,
        }
    }
}

impl GridSizePolicy {
    pub fn new(fixed_margin: usize, minimum_size: usize) -> Self {
        Self {
            fixed_margin,
            minimum_size,
            maximum_size: None,
        }
    }

    /// Caps the computed size.
    pub fn with_maximum_size(mut self, maximum_size: usize) -> Self {
        self.maximum_size = Some(maximum_size);
        self
    }

    /// Validates the policy, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_size == 0 {
            return Err(Error::InvalidConfig("minimum_size must be >= 1".into()));
        }
        if let Some(max) = self.maximum_size {
            if max < self.minimum_size {
                return Err(Error::InvalidConfig(format!(
                    "maximum_size ({max}) must be >= minimum_size ({})",
                    self.minimum_size
                )));
            }
        }
        Ok(())
    }

    /// Smallest grid side that holds `total_items` items of `footprint`.
    pub fn required_size(&self, total_items: usize, footprint: &FootprintSpec) -> usize {
        let area = total_items as f64 * footprint.area() as f64 * footprint.packing_factor() as f64;
        // Float-to-int casts saturate, so only the margin can overflow.
        let side = (area.sqrt().ceil() as usize).saturating_add(self.fixed_margin);
        let size = side.max(self.minimum_size);
        match self.maximum_size {
            Some(max) => size.min(max),
            None => size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FootprintCatalog;

    #[test]
    fn minimum_applies_to_small_batches() {
        let policy = GridSizePolicy::default();
        let catalog = FootprintCatalog::garden_defaults();
        let flower = catalog.lookup("flower").unwrap();
        // ceil(sqrt(1)) + 4 = 5 < 6
        assert_eq!(policy.required_size(1, &flower), 6);
        assert_eq!(policy.required_size(0, &flower), 6);
    }

    #[test]
    fn size_grows_with_area_and_factor() {
        let policy = GridSizePolicy::default();
        let catalog = FootprintCatalog::garden_defaults();

        // 10 bushes: 10 * 4 * 1.5 = 60 -> ceil(7.75) = 8 -> 12
        let bush = catalog.lookup("bush").unwrap();
        assert_eq!(policy.required_size(10, &bush), 12);

        // 30 flowers: 30 * 1 * 1.0 = 30 -> ceil(5.48) = 6 -> 10
        let flower = catalog.lookup("flower").unwrap();
        assert_eq!(policy.required_size(30, &flower), 10);

        // 4 pine trees: 4 * 9 * 1.5 = 54 -> ceil(7.35) = 8 -> 12
        let tree = catalog.lookup("pinetree").unwrap();
        assert_eq!(policy.required_size(4, &tree), 12);
    }

    #[test]
    fn perfect_squares_are_not_rounded_up() {
        let policy = GridSizePolicy::new(0, 1);
        let unit = FootprintSpec::new(1, 1);
        assert_eq!(policy.required_size(16, &unit), 4);
        assert_eq!(policy.required_size(17, &unit), 5);
    }

    #[test]
    fn maximum_caps_growth() {
        let policy = GridSizePolicy::new(0, 1).with_maximum_size(3);
        let unit = FootprintSpec::new(1, 1);
        assert_eq!(policy.required_size(4, &unit), 2);
        assert_eq!(policy.required_size(100, &unit), 3);
    }

    #[test]
    fn huge_counts_saturate_instead_of_wrapping() {
        let policy = GridSizePolicy::new(usize::MAX, 1);
        let unit = FootprintSpec::new(1, 1);
        assert_eq!(policy.required_size(4, &unit), usize::MAX);
        let side = GridSizePolicy::default().required_size(usize::MAX, &unit);
        assert!(side > u32::MAX as usize);
    }

    #[test]
    fn validate_checks_bounds() {
        assert!(GridSizePolicy::default().validate().is_ok());
        assert!(GridSizePolicy::new(4, 0).validate().is_err());
        assert!(GridSizePolicy::new(4, 6)
            .with_maximum_size(5)
            .validate()
            .is_err());
    }
}
