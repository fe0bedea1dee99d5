use garden_layout::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    garden_layout_examples::init_logging();

    let categories = CategoryMap::garden_defaults().with("shrub", "bush");
    let models = ModelRegistry::garden_defaults();
    let garden = SharedGarden::new(GardenState::new(FootprintCatalog::garden_defaults()));
    let mut rng = StdRng::seed_from_u64(3);

    // Labels as a sketch classifier would report them.
    let detections = [
        ("Tree", 2),
        (" flower ", 6),
        ("SHRUB", 2),
        ("fern", 3),
        ("cloud", 1),
    ];
    for (label, quantity) in detections {
        let item_type = match categories.resolve(label) {
            Ok(item_type) => item_type.to_owned(),
            Err(err) => {
                println!("skipping {label:?}: {err}");
                continue;
            }
        };
        let result = garden.add(&item_type, quantity, models.lookup(&item_type)?, &mut rng)?;
        println!("{label:?} -> {item_type}: {} placed", result.placed_count());
    }

    let snapshot = garden.snapshot()?;
    println!(
        "{} items on a {}x{} grid, {} cells occupied",
        snapshot.items.len(),
        snapshot.grid_size,
        snapshot.grid_size,
        snapshot.occupied.len()
    );

    let mut sink = FnSink::new(|event: GardenEvent| {
        if let GardenEvent::Reset { previous_items } = event {
            println!("reset cleared {previous_items} items");
        }
    });
    let mut state = GardenState::new(FootprintCatalog::garden_defaults());
    state.add_category("tree", 1, &categories, &models, &mut rng)?;
    state.reset_with_events(&mut sink);
    Ok(())
}
