use std::ops::ControlFlow;
use stepwise_astar::{AstarSolver, Coord, Grid, GridSolver};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Every step of the search is printed as a frame.

fn main() -> stepwise_astar::Result<()> {
    let mut grid = Grid::build(3, 300)?;
    grid.mark_barrier(Coord::new(1, 1))?;
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    let mut frame = 0;
    let report = AstarSolver::new().run(&mut grid, start, end, |g| {
        frame += 1;
        println!("Frame {frame}:\n{g}");
        ControlFlow::Continue(())
    })?;
    if let Some(path) = report.path() {
        println!("Path:");
        for p in path {
            println!("{}", p);
        }
    }
    Ok(())
}
