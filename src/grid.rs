use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::coord::Coord;
use crate::error::{Error, Result};
use crate::N_SMALLVEC_SIZE;

/// [Grid] owns the square lattice of [Cell]s and the start/end references. Neighbour caches and
/// the [UnionFind] connected components are only rebuilt on request: barrier edits flag them as
/// dirty and [update](Grid::update) (or the explicit recompute calls) brings them up to date.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    pixel_width: usize,
    cells: Vec<Vec<Cell>>,
    start: Option<Coord>,
    end: Option<Coord>,
    pub(crate) neighbours_dirty: bool,
    pub(crate) components: UnionFind<usize>,
    pub(crate) components_dirty: bool,
}

impl Grid {
    /// Allocates a `rows x rows` lattice drawn over `pixel_width` pixels. Every cell starts out
    /// empty with its neighbour cache already computed.
    pub fn build(rows: usize, pixel_width: usize) -> Result<Grid> {
        if rows == 0 || pixel_width < rows {
            return Err(Error::InvalidDimensions { rows, pixel_width });
        }
        let cells = (0..rows)
            .map(|row| (0..rows).map(|col| Cell::new(Coord::new(row, col))).collect())
            .collect();
        let mut grid = Grid {
            rows,
            pixel_width,
            cells,
            start: None,
            end: None,
            neighbours_dirty: true,
            components: UnionFind::new(rows * rows),
            components_dirty: true,
        };
        grid.update();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn pixel_width(&self) -> usize {
        self.pixel_width
    }
    /// Side length of a cell in pixels. Only the renderer cares about this.
    pub fn cell_width(&self) -> usize {
        self.pixel_width / self.rows
    }
    pub fn start(&self) -> Option<Coord> {
        self.start
    }
    pub fn end(&self) -> Option<Coord> {
        self.end
    }
    /// Whether a barrier edit left the neighbour caches out of date.
    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }
    pub fn components(&self) -> &UnionFind<usize> {
        &self.components
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.rows
    }

    fn check(&self, coord: Coord) -> Result<Coord> {
        if self.in_bounds(coord.row, coord.col) {
            Ok(coord)
        } else {
            Err(Error::OutOfRange {
                row: coord.row,
                col: coord.col,
                rows: self.rows,
            })
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cell(Coord::new(row, col))
    }
    pub fn cell(&self, coord: Coord) -> Result<&Cell> {
        let coord = self.check(coord)?;
        Ok(&self.cells[coord.row][coord.col])
    }
    pub fn state(&self, coord: Coord) -> Result<CellState> {
        self.cell(coord).map(Cell::state)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[coord.row][coord.col]
    }
    fn get_ix(&self, coord: Coord) -> usize {
        coord.row * self.rows + coord.col
    }
    fn is_open(&self, coord: Coord) -> bool {
        !self.cells[coord.row][coord.col].is_barrier()
    }

    /// Rebuilds the neighbour cache of one cell from the in-bounds, non-barrier positions around
    /// it.
    pub fn recompute_neighbours(&mut self, coord: Coord) -> Result<()> {
        let coord = self.check(coord)?;
        let neighbours = coord
            .neumann_neighborhood(self.rows)
            .into_iter()
            .filter(|&n| self.is_open(n))
            .collect();
        self.cell_mut(coord).set_neighbours(neighbours);
        Ok(())
    }

    /// Rebuilds every neighbour cache. Needed before a search whenever barriers changed.
    pub fn recompute_all_neighbours(&mut self) {
        debug!("Recomputing neighbours of {} cells", self.rows * self.rows);
        for row in 0..self.rows {
            for col in 0..self.rows {
                let coord = Coord::new(row, col);
                let neighbours = coord
                    .neumann_neighborhood(self.rows)
                    .into_iter()
                    .filter(|&n| self.is_open(n))
                    .collect();
                self.cell_mut(coord).set_neighbours(neighbours);
            }
        }
        self.neighbours_dirty = false;
    }

    /// Refreshes whatever barrier edits have invalidated.
    pub fn update(&mut self) {
        if self.neighbours_dirty {
            self.recompute_all_neighbours();
        }
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let n = self.rows;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for row in 0..n {
            for col in 0..n {
                let point = Coord::new(row, col);
                if !self.is_open(point) {
                    continue;
                }
                let parent_ix = self.get_ix(point);
                [Coord::new(row + 1, col), Coord::new(row, col + 1)]
                    .into_iter()
                    .filter(|p| self.in_bounds(p.row, p.col) && self.is_open(*p))
                    .map(|p| self.get_ix(p))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .for_each(|ix| {
                        self.components.union(parent_ix, ix);
                    });
            }
        }
    }

    /// Checks if start and goal are open cells on the same connected component. Only meaningful
    /// once [update](Grid::update) has run after the last barrier edit.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.check(*start).is_err() || self.check(*goal).is_err() {
            return false;
        }
        if !self.is_open(*start) || !self.is_open(*goal) {
            return false;
        }
        self.components.equiv(self.get_ix(*start), self.get_ix(*goal))
    }

    /// Drops whatever role the cell had before it is overwritten: start/end references are
    /// released and a removed barrier dirties the neighbour caches.
    fn release(&mut self, coord: Coord) {
        if self.start == Some(coord) {
            self.start = None;
        }
        if self.end == Some(coord) {
            self.end = None;
        }
        if !self.is_open(coord) {
            self.neighbours_dirty = true;
            // Reopening a cell can only merge components.
            let ix = self.get_ix(coord);
            for n in coord.neumann_neighborhood(self.rows) {
                if self.is_open(n) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    pub fn mark_start(&mut self, coord: Coord) -> Result<()> {
        let coord = self.check(coord)?;
        if self.start == Some(coord) {
            return Ok(());
        }
        if let Some(previous) = self.start.take() {
            self.cell_mut(previous).set_state(CellState::Empty);
        }
        self.release(coord);
        self.cell_mut(coord).set_state(CellState::Start);
        self.start = Some(coord);
        Ok(())
    }

    pub fn mark_end(&mut self, coord: Coord) -> Result<()> {
        let coord = self.check(coord)?;
        if self.end == Some(coord) {
            return Ok(());
        }
        if let Some(previous) = self.end.take() {
            self.cell_mut(previous).set_state(CellState::Empty);
        }
        self.release(coord);
        self.cell_mut(coord).set_state(CellState::End);
        self.end = Some(coord);
        Ok(())
    }

    /// Turns a cell into a barrier. Neighbour caches are not touched until the next
    /// recomputation, which keeps painting cheap.
    pub fn mark_barrier(&mut self, coord: Coord) -> Result<()> {
        let coord = self.check(coord)?;
        if !self.is_open(coord) {
            return Ok(());
        }
        self.release(coord);
        self.cell_mut(coord).set_state(CellState::Barrier);
        self.neighbours_dirty = true;
        self.components_dirty = true;
        Ok(())
    }

    pub fn clear(&mut self, coord: Coord) -> Result<()> {
        let coord = self.check(coord)?;
        self.release(coord);
        self.cell_mut(coord).set_state(CellState::Empty);
        Ok(())
    }

    /// Sets every cell back to empty and forgets the endpoints.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.set_state(CellState::Empty);
        }
        self.start = None;
        self.end = None;
        self.neighbours_dirty = true;
        self.components_dirty = true;
        self.update();
    }

    /// Wipes the marks of a previous search while keeping barriers and endpoints.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.state().is_search_mark() {
                cell.set_state(CellState::Empty);
            }
        }
    }

    /// Writes a state produced by the search. User-placed states (start, end, barrier) take
    /// precedence over frontier, visited and path marks.
    pub(crate) fn set_search_state(&mut self, coord: Coord, state: CellState) {
        let cell = self.cell_mut(coord);
        let current = cell.state();
        if state.is_search_mark() && (current.is_endpoint() || current == CellState::Barrier) {
            return;
        }
        cell.set_state(state);
    }

    pub(crate) fn neighbours_of(&self, coord: Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        self.cells[coord.row][coord.col].neighbours_owned()
    }
}
