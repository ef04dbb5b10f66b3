use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use grid_path_stepper::{Algorithm, StepScheduler, TileGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmarks a full run (search plus backtracking) of each algorithm on the
/// same seeded obstacle layout.
fn comparison_bench(c: &mut Criterion) {
    const N: usize = 64;
    let mut grid = TileGrid::new(N, N).unwrap();
    grid.set_start(0, 0);
    grid.set_end(N - 1, N - 1);
    let mut rng = StdRng::seed_from_u64(0);
    grid.randomize(0.2, &mut rng).unwrap();

    for algorithm in Algorithm::ALL {
        c.bench_function(format!("{:?}, {}x{} p=0.2", algorithm, N, N).as_str(), |b| {
            b.iter(|| {
                let mut scheduler = StepScheduler::new(Duration::from_millis(1)).unwrap();
                scheduler.start(&mut grid, algorithm).unwrap();
                black_box(scheduler.run_to_completion(&mut grid));
            })
        });
    }
}

criterion_group!(benches, comparison_bench);
criterion_main!(benches);
