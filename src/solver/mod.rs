use crate::error::{Error, Result};
use crate::search::{SearchContext, SearchReport};
use crate::{coord::Coord, grid::Grid};
use num_traits::{Bounded, One, Zero};
use std::fmt::Debug;
use std::ops::ControlFlow;

pub mod astar;
pub mod dijkstra;

/// A best-first strategy over the unit-cost 4-grid. Implementors only choose the heuristic; the
/// incremental search loop is shared.
pub trait GridSolver {
    type Cost: Zero + One + Bounded + Ord + Copy + Debug;

    /// Estimated cost from `p1` to `p2`. Must never overestimate.
    fn heuristic(&self, p1: &Coord, p2: &Coord) -> Self::Cost;

    /// Animated search between explicit endpoints, see [SearchContext::astar].
    fn run<F>(
        &self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        on_step: F,
    ) -> Result<SearchReport<Self::Cost>>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        let mut ct = SearchContext::new();
        self.run_in(&mut ct, grid, start, end, on_step)
    }

    /// Like [run](Self::run), reusing the allocations of an existing context.
    fn run_in<F>(
        &self,
        ct: &mut SearchContext<Self::Cost>,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        on_step: F,
    ) -> Result<SearchReport<Self::Cost>>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        ct.astar(grid, start, end, |point| self.heuristic(point, &end), on_step)
    }

    /// Searches between the start and end cells placed on the grid.
    fn search<F>(&self, grid: &mut Grid, on_step: F) -> Result<SearchReport<Self::Cost>>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        let start = grid
            .start()
            .ok_or(Error::InvalidEndpoints("no start cell placed"))?;
        let end = grid.end().ok_or(Error::InvalidEndpoints("no end cell placed"))?;
        self.run(grid, start, end, on_step)
    }

    /// Runs without animation and only keeps the path.
    fn get_path_single_goal(
        &self,
        grid: &mut Grid,
        start: Coord,
        goal: Coord,
    ) -> Result<Option<Vec<Coord>>> {
        let report = self.run(grid, start, goal, |_| ControlFlow::Continue(()))?;
        Ok(report.path().map(<[Coord]>::to_vec))
    }
}
