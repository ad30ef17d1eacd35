//! Input glue between a windowing layer and the grid. The window itself (event loop, drawing)
//! stays outside the crate; it feeds clicks and key presses in here and repaints from the step
//! callback.
use log::{debug, info};
use std::ops::ControlFlow;

use crate::coord::Coord;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::search::SearchReport;
use crate::solver::{astar::AstarSolver, GridSolver};
use crate::{DEFAULT_PIXEL_WIDTH, DEFAULT_ROWS};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub pixel_width: usize,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            rows: DEFAULT_ROWS,
            pixel_width: DEFAULT_PIXEL_WIDTH,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Click { button: MouseButton, x: usize, y: usize },
    /// Clear the whole grid.
    Reset,
    /// Recompute neighbours and animate a search.
    RunSearch,
    Quit,
}

/// Maps a pixel position to the cell under it. `x` selects the row and `y` the column.
pub fn pixel_to_cell(x: usize, y: usize, rows: usize, pixel_width: usize) -> Result<Coord> {
    let gap = pixel_width.checked_div(rows).filter(|&gap| gap > 0);
    let gap = gap.ok_or(Error::InvalidDimensions { rows, pixel_width })?;
    let (row, col) = (x / gap, y / gap);
    if row >= rows || col >= rows {
        return Err(Error::OutOfRange { row, col, rows });
    }
    Ok(Coord::new(row, col))
}

/// One interactive session: a grid of fixed size and the solver used to animate it. A running
/// search borrows the session mutably, so no edits can reach the grid until it returns.
#[derive(Clone, Debug)]
pub struct Session<S: GridSolver = AstarSolver> {
    grid: Grid,
    solver: S,
    quit: bool,
}

impl Session<AstarSolver> {
    pub fn new(config: SessionConfig) -> Result<Session<AstarSolver>> {
        Session::with_solver(config, AstarSolver::new())
    }
}

impl<S: GridSolver> Session<S> {
    pub fn with_solver(config: SessionConfig, solver: S) -> Result<Session<S>> {
        Ok(Session {
            grid: Grid::build(config.rows, config.pixel_width)?,
            solver,
            quit: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Left click places the start, then the end, then barriers. Endpoints are never painted
    /// over. Right click empties the cell, dropping the start or end it held.
    pub fn click(&mut self, button: MouseButton, x: usize, y: usize) -> Result<()> {
        let coord = pixel_to_cell(x, y, self.grid.rows(), self.grid.pixel_width())?;
        let start = self.grid.start();
        let end = self.grid.end();
        match button {
            MouseButton::Left => {
                if start.is_none() && end != Some(coord) {
                    self.grid.mark_start(coord)
                } else if end.is_none() && start != Some(coord) {
                    self.grid.mark_end(coord)
                } else if start != Some(coord) && end != Some(coord) {
                    self.grid.mark_barrier(coord)
                } else {
                    Ok(())
                }
            }
            MouseButton::Right => self.grid.clear(coord),
        }
    }

    pub fn reset(&mut self) {
        debug!("Resetting grid");
        self.grid.reset();
    }

    /// Clears the marks of the previous run, rebuilds every neighbour cache and animates a
    /// search between the placed endpoints.
    pub fn run_search<F>(&mut self, on_step: F) -> Result<SearchReport<S::Cost>>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        self.grid.clear_search_marks();
        self.grid.recompute_all_neighbours();
        self.solver.search(&mut self.grid, on_step)
    }

    /// Dispatches one input event. Only [Input::RunSearch] produces a report.
    pub fn handle<F>(&mut self, input: Input, on_step: F) -> Result<Option<SearchReport<S::Cost>>>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        match input {
            Input::Click { button, x, y } => self.click(button, x, y).map(|_| None),
            Input::Reset => {
                self.reset();
                Ok(None)
            }
            Input::RunSearch => self.run_search(on_step).map(Some),
            Input::Quit => {
                info!("Quit requested");
                self.quit = true;
                Ok(None)
            }
        }
    }
}
