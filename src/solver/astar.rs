use crate::{coord::Coord, solver::GridSolver};

/// A* with the Manhattan distance, which is admissible and consistent for unit-cost moves on a
/// 4-grid: the first path found is optimal and no finalised cell is ever reopened.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Cost = u32;

    fn heuristic(&self, p1: &Coord, p2: &Coord) -> u32 {
        p1.manhattan_distance(p2) as u32
    }
}
