use anyhow::Context;
use garden_layout::prelude::*;
use garden_layout_examples::{init_logging, render_garden_to_png, RenderConfig, TypeStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_logging();

    let base = format!("{}/assets", env!("CARGO_MANIFEST_DIR"));
    let catalog_text = std::fs::read_to_string(format!("{base}/terrace.catalog.ron"))
        .context("read terrace.catalog.ron")?;
    let models_text = std::fs::read_to_string(format!("{base}/terrace.models.ron"))
        .context("read terrace.models.ron")?;
    let catalog = FootprintCatalog::from_ron_str(&catalog_text)?;
    let models = ModelRegistry::from_ron_str(&models_text)?;
    println!("catalog types: {:?}", catalog.item_types());

    let mut garden = GardenState::try_new(catalog, GardenConfig::new().with_tile_size(1.5))?;
    let mut rng = StdRng::seed_from_u64(11);
    for (item_type, quantity) in [("olive", 3), ("hedge", 6), ("lavender", 30)] {
        let result = garden.add(item_type, quantity, models.lookup(item_type)?, &mut rng)?;
        if let Some(warning) = result.warning() {
            println!("{warning}");
        }
    }

    for item in garden.items().iter().take(5) {
        let p = item.world_position;
        println!(
            "{:>9} at cell ({}, {}) -> world ({:.2}, {:.2}, {:.2}), model {}",
            item.item_type,
            item.grid_position.col,
            item.grid_position.row,
            p.x,
            p.y,
            p.z,
            item.model_reference
        );
    }

    let mut rc = RenderConfig::new(20);
    rc.set_type_style("lavender", TypeStyle::new([150, 110, 210]));
    rc.set_type_style("hedge", TypeStyle::new([50, 120, 70]));
    rc.set_type_style("olive", TypeStyle::new([130, 140, 80]));
    render_garden_to_png(&garden, &rc, "garden-ron-catalog.png")?;
    Ok(())
}
