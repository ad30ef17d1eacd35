//! # stepwise_astar
//!
//! Incremental shortest-path search on a paintable square grid. A user places a start cell, an
//! end cell and barriers; the [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) then
//! advances one expansion at a time, writing frontier, visited and path marks into the cells and
//! handing the grid to a step callback after every change so it can be animated.
//!
//! Movement is 4-connected with unit cost and the heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), so the first path found
//! is optimal. Ties between equal f-scores are broken by insertion order, which makes every run
//! on the same grid expand cells in the same order.
//!
//! Rendering and windowing are left to the caller: [render] maps states to colours and pixel
//! rectangles, and [session] turns clicks and key presses into grid edits.
pub mod cell;
pub mod coord;
pub mod error;
pub mod grid;
pub mod path;
pub mod render;
pub mod search;
pub mod session;
pub mod solver;

pub use cell::{Cell, CellState};
pub use coord::Coord;
pub use error::{Error, Result};
pub use grid::Grid;
pub use search::{Expansion, SearchContext, SearchOutcome, SearchReport};
pub use session::{pixel_to_cell, Input, MouseButton, Session, SessionConfig};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Lattice size of a default session.
pub const DEFAULT_ROWS: usize = 50;
/// Window side length of a default session, in pixels.
pub const DEFAULT_PIXEL_WIDTH: usize = 800;
/// A cell has at most 4 neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;
