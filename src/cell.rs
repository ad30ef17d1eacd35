use smallvec::SmallVec;

use crate::coord::Coord;
use crate::N_SMALLVEC_SIZE;

/// What a cell currently represents. User edits produce the first four states, the search
/// produces the last three.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered but not finalised (open).
    Frontier,
    /// Finalised (closed).
    Visited,
    Path,
}

impl CellState {
    /// States written by a search run, as opposed to states placed by the user.
    pub fn is_search_mark(&self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }

    pub fn is_endpoint(&self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }
}

/// A single lattice position together with its state and its cached 4-neighbourhood.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: Coord,
    state: CellState,
    neighbours: SmallVec<[Coord; N_SMALLVEC_SIZE]>,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Cell {
        Cell {
            coord,
            state: CellState::Empty,
            neighbours: SmallVec::new(),
        }
    }
    pub fn coord(&self) -> Coord {
        self.coord
    }
    pub fn row(&self) -> usize {
        self.coord.row
    }
    pub fn col(&self) -> usize {
        self.coord.col
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }
    /// Neighbours as of the last recomputation; stale after barrier edits until refreshed.
    pub fn neighbours(&self) -> &[Coord] {
        &self.neighbours
    }
    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
    pub(crate) fn set_neighbours(&mut self, neighbours: SmallVec<[Coord; N_SMALLVEC_SIZE]>) {
        self.neighbours = neighbours;
    }
    pub(crate) fn neighbours_owned(&self) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        self.neighbours.clone()
    }
}
