mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use garden_layout::catalog::FootprintSpec;
use garden_layout::grid::occupancy::OccupancyGrid;
use garden_layout::placement::{scan_first_free, CenterBiasedPlanner, PlacementStrategy};
use rand::rngs::StdRng;
use rand::SeedableRng;

const GRID_SIZES: [usize; 4] = [16, 32, 64, 128];

fn fill_ratio_grid(size: usize, stride: usize) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(size);
    let unit = FootprintSpec::new(1, 1);
    for row in 0..size {
        for col in 0..size {
            if (row * size + col) % stride != 0 {
                grid.occupy((col, row).into(), &unit);
            }
        }
    }
    grid
}

fn planner_fill_benches(c: &mut Criterion) {
    let planner = CenterBiasedPlanner::default();
    let bush = FootprintSpec::new(2, 2).with_spacing(1);

    let mut group = c.benchmark_group("placement/planner_fill");
    for &size in &GRID_SIZES {
        let mut rng_est = StdRng::seed_from_u64(0xB05E ^ size as u64);
        let mut grid = OccupancyGrid::new(size);
        let mut expected = 0;
        while let Some(found) = planner.find(&grid, &bush, &mut rng_est) {
            grid.occupy(found.cell, &bush);
            expected += 1;
        }
        group.throughput(common::elements_throughput(expected));

        let mut rng = StdRng::seed_from_u64(0xB05E ^ size as u64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut grid = OccupancyGrid::new(size);
                let mut placed = 0usize;
                while let Some(found) = planner.find(&grid, &bush, &mut rng) {
                    grid.occupy(found.cell, &bush);
                    placed += 1;
                }
                black_box(placed);
            });
        });
    }
    group.finish();
}

fn scan_benches(c: &mut Criterion) {
    let unit = FootprintSpec::new(1, 1);

    let mut group = c.benchmark_group("placement/scan_sparse_free");
    for &size in &GRID_SIZES {
        let grid = fill_ratio_grid(size, 97);
        group.throughput(common::elements_throughput(size * size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| black_box(scan_first_free(grid, &unit)));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = planner_fill_benches, scan_benches
}
criterion_main!(benches);
