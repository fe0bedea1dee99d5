use garden_layout::prelude::*;
use garden_layout_examples::{init_logging, render_garden_to_png, RenderConfig};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_logging();

    let models = ModelRegistry::garden_defaults();
    let mut garden = GardenState::new(FootprintCatalog::garden_defaults());
    let mut rng = StdRng::seed_from_u64(2025);

    // Large footprints first so the trees claim the center.
    let requests = [
        ("pinetree", 2),
        ("roundtree", 2),
        ("bush", 5),
        ("fern", 8),
        ("mushroom", 6),
        ("flower", 24),
    ];
    for (item_type, quantity) in requests {
        let result = garden.add(item_type, quantity, models.lookup(item_type)?, &mut rng)?;
        println!(
            "{item_type:>10}: placed {}/{} on a {}x{} grid",
            result.placed_count(),
            result.requested,
            result.grid_size,
            result.grid_size
        );
    }

    for (item_type, count) in garden.type_counts() {
        println!("{item_type:>10}: {count}");
    }
    println!("flowers in garden: {}", garden.total_flowers());

    let flower = garden.catalog().lookup("flower")?;
    if let Some(cell) = garden
        .mapper()
        .to_grid(Vec2::ZERO, garden.grid_size(), &flower)
    {
        let taken = if garden.grid().is_occupied(cell) {
            "taken"
        } else {
            "free"
        };
        println!("world origin is cell ({}, {}), {taken}", cell.col, cell.row);
    }

    let out = "garden-quick-start.png";
    render_garden_to_png(&garden, &RenderConfig::default(), out)?;
    Ok(())
}
