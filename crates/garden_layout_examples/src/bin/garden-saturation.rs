use garden_layout::prelude::*;
use garden_layout_examples::{init_logging, render_garden_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_logging();

    // A bounded plot: the grid never grows past 8x8.
    let config =
        GardenConfig::new().with_size_policy(GridSizePolicy::new(2, 4).with_maximum_size(8));
    let mut garden = GardenState::try_new(FootprintCatalog::garden_defaults(), config)?;
    let models = ModelRegistry::garden_defaults();
    let mut rng = StdRng::seed_from_u64(7);

    let mut sink = VecSink::new();
    loop {
        let result =
            garden.add_with_events("bush", 3, models.lookup("bush")?, &mut rng, &mut sink)?;
        if let Some(warning) = result.warning() {
            println!("{warning}");
            break;
        }
    }
    println!(
        "{} bushes on {} occupied cells; {} fallback scans",
        garden.count_by_type("bush"),
        garden.occupied_cells(),
        sink.count(GardenEventKind::FallbackScanUsed)
    );

    // Flowers still fit between the bushes.
    let result = garden.add("flower", 200, models.lookup("flower")?, &mut rng)?;
    println!(
        "flowers: placed {} of {}",
        result.placed_count(),
        result.requested
    );

    let out = "garden-saturation.png";
    render_garden_to_png(&garden, &RenderConfig::default(), out)?;
    Ok(())
}
