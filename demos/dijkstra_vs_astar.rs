use std::ops::ControlFlow;
use stepwise_astar::{AstarSolver, Coord, DijkstraSolver, Grid, GridSolver};

// Both solvers find a path of the same length, but the Manhattan heuristic keeps A* from
// flooding the whole lattice.
fn main() -> stepwise_astar::Result<()> {
    const N: usize = 20;
    let mut grid = Grid::build(N, N * 20)?;
    for row in 3..N {
        grid.mark_barrier(Coord::new(row, N / 2))?;
    }
    let start = Coord::new(N - 1, 0);
    let end = Coord::new(N - 1, N - 1);

    let astar = AstarSolver::new().run(&mut grid, start, end, |_| ControlFlow::Continue(()))?;
    println!("{}", grid);
    grid.clear_search_marks();
    let dijkstra = DijkstraSolver.run(&mut grid, start, end, |_| ControlFlow::Continue(()))?;
    println!("{}", grid);

    println!(
        "A*: {} expansions, path {:?}",
        astar.expansions.len(),
        astar.path().map(|p| p.len())
    );
    println!(
        "Dijkstra: {} expansions, path {:?}",
        dijkstra.expansions.len(),
        dijkstra.path().map(|p| p.len())
    );
    Ok(())
}
