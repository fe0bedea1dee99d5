//! Thread-safe handle around a [`GardenState`].
//!
//! Every command locks the state for its whole duration, so an `add` or `reset` is observed
//! either completely or not at all by other threads.
use std::sync::{Arc, Mutex, MutexGuard};

use rand::RngCore;

use crate::catalog::models::ModelInfo;
use crate::error::{Error, Result};
use crate::garden::{GardenState, PlacedItem, PlacementResult};
use crate::grid::GridCell;

/// Consistent copy of the garden taken under a single lock.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenSnapshot {
    pub grid_size: usize,
    pub items: Vec<PlacedItem>,
    pub occupied: Vec<GridCell>,
}

/// Cloneable shared garden. Clones refer to the same state.
#[derive(Debug, Clone)]
pub struct SharedGarden {
    inner: Arc<Mutex<GardenState>>,
}

impl SharedGarden {
    pub fn new(state: GardenState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GardenState>> {
        self.inner.lock().map_err(|_| Error::Poisoned)
    }

    pub fn add<R: RngCore>(
        &self,
        item_type: &str,
        quantity: usize,
        model: &ModelInfo,
        rng: &mut R,
    ) -> Result<PlacementResult> {
        self.lock()?.add(item_type, quantity, model, rng)
    }

    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset();
        Ok(())
    }

    /// Runs `f` with shared access to the locked state.
    pub fn with<T>(&self, f: impl FnOnce(&GardenState) -> T) -> Result<T> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    pub fn snapshot(&self) -> Result<GardenSnapshot> {
        self.with(|state| GardenSnapshot {
            grid_size: state.grid_size(),
            items: state.items().to_vec(),
            occupied: state.grid().occupied_cells().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::FootprintCatalog;

    fn model() -> ModelInfo {
        ModelInfo::new("plants/flower.glb", 1.0, 1.0)
    }

    #[test]
    fn concurrent_adds_never_overlap() {
        let garden = SharedGarden::new(GardenState::new(FootprintCatalog::garden_defaults()));

        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                let garden = garden.clone();
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    for _ in 0..5 {
                        garden.add("flower", 2, &model(), &mut rng).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = garden.snapshot().unwrap();
        assert_eq!(snapshot.items.len(), 40);
        assert_eq!(snapshot.occupied.len(), 40);
        garden
            .with(|state| {
                let mut cells: Vec<_> = state
                    .items()
                    .iter()
                    .flat_map(|item| state.current_cells(item))
                    .collect();
                cells.sort();
                cells.dedup();
                assert_eq!(cells.len(), 40);
            })
            .unwrap();
    }

    #[test]
    fn reset_through_handle() {
        let garden = SharedGarden::new(GardenState::new(FootprintCatalog::garden_defaults()));
        let mut rng = StdRng::seed_from_u64(1);
        garden.add("bush", 3, &model(), &mut rng).unwrap();
        garden.reset().unwrap();
        let snapshot = garden.snapshot().unwrap();
        assert_eq!(snapshot.grid_size, 1);
        assert!(snapshot.items.is_empty());
        assert!(snapshot.occupied.is_empty());
    }

    #[test]
    fn with_returns_closure_value() {
        let garden = SharedGarden::new(GardenState::new(FootprintCatalog::garden_defaults()));
        let mut rng = StdRng::seed_from_u64(2);
        garden.add("flower", 3, &model(), &mut rng).unwrap();
        assert_eq!(garden.with(|state| state.len()).unwrap(), 3);
        assert_eq!(garden.with(|state| state.total_flowers()).unwrap(), 3);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let garden = SharedGarden::new(GardenState::new(FootprintCatalog::garden_defaults()));
        let clone = garden.clone();
        let _ = thread::spawn(move || {
            clone
                .with(|_| panic!("poison the lock"))
                .unwrap();
        })
        .join();
        assert_eq!(garden.reset(), Err(Error::Poisoned));
    }
}
