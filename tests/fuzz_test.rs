/// Fuzzes the search by checking on many random grids that a path is found exactly when the end
/// lies on the start's connected component, and that A* and Dijkstra agree on its length.
use rand::prelude::*;
use std::ops::ControlFlow;
use stepwise_astar::path::{path_is_connected, path_length};
use stepwise_astar::{AstarSolver, CellState, Coord, DijkstraSolver, Grid, GridSolver};

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::build(n, n * 10).unwrap();
    for row in 0..n {
        for col in 0..n {
            if rng.gen_bool(0.4) {
                grid.mark_barrier(Coord::new(row, col)).unwrap();
            }
        }
    }
    grid
}

fn visualize_grid(grid: &Grid) {
    println!("{}", grid);
}

fn no_op(_: &Grid) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = AstarSolver::new();
    let start = Coord::new(0, 0);
    let end = Coord::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        grid.clear(start).unwrap();
        grid.clear(end).unwrap();
        grid.update();
        let reachable = grid.reachable(&start, &end);
        let report = solver.run(&mut grid, start, end, no_op).unwrap();
        // Show the grid if the outcome disagrees with the components
        if report.path_found() != reachable {
            visualize_grid(&grid);
        }
        assert_eq!(report.path_found(), reachable);
        if let Some(path) = report.path() {
            assert!(path_is_connected(path));
            assert!(path
                .iter()
                .all(|p| grid.state(*p).unwrap() != CellState::Barrier));
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let astar_solver = AstarSolver::new();
    let dijkstra_solver = DijkstraSolver;
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let start = Coord::new(rng.gen_range(0..N), rng.gen_range(0..N));
        let end = Coord::new(rng.gen_range(0..N), rng.gen_range(0..N));
        if start == end {
            continue;
        }
        grid.clear(start).unwrap();
        grid.clear(end).unwrap();
        let astar = astar_solver.run(&mut grid, start, end, no_op).unwrap();
        grid.clear_search_marks();
        let dijkstra = dijkstra_solver.run(&mut grid, start, end, no_op).unwrap();
        let astar_len = astar.path().map(path_length);
        let dijkstra_len = dijkstra.path().map(path_length);
        if astar_len != dijkstra_len {
            println!("Astar: {astar_len:?}; Dijkstra: {dijkstra_len:?}");
            visualize_grid(&grid);
        }
        assert_eq!(astar_len, dijkstra_len);
    }
}

#[test]
fn fuzz_expansions() {
    const N: usize = 10;
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver::new();
    for _ in 0..500 {
        let mut grid = random_grid(N, &mut rng);
        let start = Coord::new(0, rng.gen_range(0..N));
        let end = Coord::new(N - 1, rng.gen_range(0..N));
        grid.clear(start).unwrap();
        grid.clear(end).unwrap();
        let report = solver.run(&mut grid, start, end, no_op).unwrap();
        // Every f-score is a path length through the cell, so it is bounded below by the
        // distance and shares its parity on a 4-connected lattice.
        let distance = start.manhattan_distance(&end) as u32;
        assert!(report
            .expansions
            .iter()
            .all(|e| e.f_score >= distance && (e.f_score - distance) % 2 == 0));
        // No cell is finalised twice.
        let mut seen: Vec<Coord> = report.expansion_order().collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), report.expansions.len());
        assert!(!seen.contains(&end));
    }
}
