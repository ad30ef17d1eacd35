use crate::{coord::Coord, solver::GridSolver};

/// Uninformed variant: a zero heuristic turns the shared loop into Dijkstra's algorithm, which
/// floods outward evenly. Useful as a reference for the A* results and as a visual contrast.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Cost = u32;

    fn heuristic(&self, _: &Coord, _: &Coord) -> u32 {
        0
    }
}
