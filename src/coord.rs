use core::fmt;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// Position of a cell on the lattice. This is the only position type in the crate, so the
/// heuristic, the neighbour logic and the renderer all agree on axis order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two positions share an edge.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The axis-aligned neighbours inside a `rows x rows` lattice, in Down, Up, Right, Left
    /// order. Index 0 is a valid position on both axes.
    pub fn neumann_neighborhood(&self, rows: usize) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        let mut neighbours = SmallVec::new();
        if self.row + 1 < rows {
            neighbours.push(Coord::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            neighbours.push(Coord::new(self.row - 1, self.col));
        }
        if self.col + 1 < rows {
            neighbours.push(Coord::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            neighbours.push(Coord::new(self.row, self.col - 1));
        }
        neighbours
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
