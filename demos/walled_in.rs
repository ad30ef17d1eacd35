use std::ops::ControlFlow;
use stepwise_astar::{AstarSolver, Coord, Grid, GridSolver, SearchOutcome};

// The end sits in a closed room, so the search expands every cell it can reach and gives up:
// S . . . . .
// . . . . . .
// . . # # # .
// . . # E # .
// . . # # # .
// . . . . . .
fn main() -> stepwise_astar::Result<()> {
    let mut grid = Grid::build(6, 600)?;
    for row in 2..5 {
        for col in 2..5 {
            if (row, col) != (3, 3) {
                grid.mark_barrier(Coord::new(row, col))?;
            }
        }
    }
    let report = AstarSolver::new().run(&mut grid, Coord::new(0, 0), Coord::new(3, 3), |_| {
        ControlFlow::Continue(())
    })?;
    match report.outcome {
        SearchOutcome::PathFound { cost, .. } => println!("Unexpected path of cost {cost}"),
        SearchOutcome::NoPathExists => {
            println!("No path after {} expansions:", report.expansions.len())
        }
    }
    println!("{}", grid);
    Ok(())
}
