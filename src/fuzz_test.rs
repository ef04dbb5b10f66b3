//! Fuzzes the four algorithms by checking for many random grids that a path
//! is found exactly when start and end share a connected component, and that
//! the algorithm-specific optimality guarantees hold relative to each other.

use std::time::Duration;

use rand::prelude::*;

use super::*;

fn random_grid(n: usize, rng: &mut StdRng) -> TileGrid {
    let mut grid = TileGrid::new(n, n).unwrap();
    grid.set_start(0, 0);
    grid.set_end(n - 1, n - 1);
    grid.randomize(0.4, rng).unwrap();
    grid.update();
    grid
}

fn run(grid: &mut TileGrid, algorithm: Algorithm) -> RunOutcome {
    let mut scheduler = StepScheduler::new(Duration::from_millis(1)).unwrap();
    scheduler.start(grid, algorithm).unwrap();
    scheduler
        .run_to_completion(grid)
        .expect("started run must terminate")
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let start = grid.start().unwrap();
        let end = grid.end().unwrap();
        let reachable = grid.reachable(&start, &end);

        let mut paths = Vec::new();
        for algorithm in Algorithm::ALL {
            let outcome = run(&mut grid, algorithm);
            let found = matches!(outcome, RunOutcome::Found(_));
            // Show the grid if the outcome disagrees with the components.
            if found != reachable {
                println!("{:?} disagrees with components on:\n{}", algorithm, grid);
            }
            assert_eq!(found, reachable);
            if let RunOutcome::Found(path) = outcome {
                paths.push((algorithm, path));
            }
        }
        if !reachable {
            continue;
        }
        let bfs_length = paths
            .iter()
            .find(|(algorithm, _)| *algorithm == Algorithm::Bfs)
            .map(|(_, path)| path.length)
            .unwrap();
        for (algorithm, path) in &paths {
            // BFS is minimal in edges.
            assert!(
                bfs_length <= path.length,
                "BFS length {} beaten by {:?} with {} on:\n{}",
                bfs_length,
                algorithm,
                path.length,
                grid
            );
            assert_eq!(path.tiles.first(), Some(&start));
            assert_eq!(path.tiles.last(), Some(&end));
            // Consecutive path tiles are cardinal neighbours.
            assert!(path
                .tiles
                .windows(2)
                .all(|pair| pair[0].manhattan_distance(&pair[1]) == 1));
        }
    }
}
