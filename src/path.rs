use itertools::Itertools;
use std::ops::ControlFlow;

use crate::cell::CellState;
use crate::coord::Coord;
use crate::grid::Grid;
use crate::search::FxIndexMap;

/// Walks the predecessor map back from `end` until a cell without predecessor (the start) is
/// met, marking every cell on the way as [CellState::Path] and calling `on_step` after each hop.
/// The endpoints keep their own state. Returns the path from start to end, or [None] if
/// `on_step` asked to stop.
pub fn reconstruct_path<FS>(
    grid: &mut Grid,
    came_from: &FxIndexMap<Coord, Coord>,
    end: Coord,
    on_step: &mut FS,
) -> Option<Vec<Coord>>
where
    FS: FnMut(&Grid) -> ControlFlow<()>,
{
    let mut path = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        grid.set_search_state(current, CellState::Path);
        path.push(current);
        if on_step(grid).is_break() {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

/// Number of edges in a path.
pub fn path_length(path: &[Coord]) -> usize {
    path.len().saturating_sub(1)
}

/// True when consecutive cells share an edge.
pub fn path_is_connected(path: &[Coord]) -> bool {
    path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}
