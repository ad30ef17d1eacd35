//! Incremental A* over a [Grid]. Unlike a batch solver, every expansion writes its result into
//! the cells (frontier, visited, path) and hands the grid to a step callback, so a caller can
//! repaint after each step or cancel the run.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::IndexMap;
use log::{info, trace, warn};
use num_traits::{Bounded, One, Zero};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::ops::ControlFlow;

use crate::cell::CellState;
use crate::coord::Coord;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::path::reconstruct_path;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Debug)]
struct OpenEntry<C> {
    f_score: C,
    sequence: u64,
    coord: Coord,
}

impl<C: PartialEq> Eq for OpenEntry<C> {}

impl<C: PartialEq> PartialEq for OpenEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.eq(&other.f_score) && self.sequence == other.sequence
    }
}

impl<C: Ord> PartialOrd for OpenEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for OpenEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest f-score, then the earliest insertion
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// A cell finalised by the search together with the f-score it was popped at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Expansion<C> {
    pub coord: Coord,
    pub f_score: C,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<C> {
    /// The full path from start to end, both included, and its cost.
    PathFound { path: Vec<Coord>, cost: C },
    /// Every cell reachable from the start was expanded without meeting the end.
    NoPathExists,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport<C> {
    pub outcome: SearchOutcome<C>,
    /// Finalised cells in expansion order. The end cell is not included.
    pub expansions: Vec<Expansion<C>>,
}

impl<C> SearchReport<C> {
    pub fn path_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::PathFound { .. })
    }
    pub fn path(&self) -> Option<&[Coord]> {
        match &self.outcome {
            SearchOutcome::PathFound { path, .. } => Some(path),
            SearchOutcome::NoPathExists => None,
        }
    }
    pub fn expansion_order(&self) -> impl Iterator<Item = Coord> + '_ {
        self.expansions.iter().map(|e| e.coord)
    }
}

/// Transient state of one search run. Can be reused between runs to keep its allocations.
#[derive(Clone, Debug)]
pub struct SearchContext<C> {
    open_set: BinaryHeap<OpenEntry<C>>,
    open_members: FxHashSet<Coord>,
    closed: FxHashSet<Coord>,
    came_from: FxIndexMap<Coord, Coord>,
    g_score: FxHashMap<Coord, C>,
    f_score: FxHashMap<Coord, C>,
    insertion_counter: u64,
}

impl<C> Default for SearchContext<C>
where
    C: Zero + One + Bounded + Ord + Copy + Debug,
{
    fn default() -> Self {
        SearchContext::new()
    }
}

impl<C> SearchContext<C>
where
    C: Zero + One + Bounded + Ord + Copy + Debug,
{
    pub fn new() -> SearchContext<C> {
        SearchContext {
            open_set: BinaryHeap::new(),
            open_members: FxHashSet::default(),
            closed: FxHashSet::default(),
            came_from: FxIndexMap::default(),
            g_score: FxHashMap::default(),
            f_score: FxHashMap::default(),
            insertion_counter: 0,
        }
    }

    pub fn clear(&mut self) {
        self.open_set.clear();
        self.open_members.clear();
        self.closed.clear();
        self.came_from.clear();
        self.g_score.clear();
        self.f_score.clear();
        self.insertion_counter = 0;
    }

    /// Best known cost from the start, [Bounded::max_value] when the cell was never reached.
    pub fn g_score(&self, coord: &Coord) -> C {
        self.g_score.get(coord).copied().unwrap_or_else(C::max_value)
    }
    pub fn f_score(&self, coord: &Coord) -> C {
        self.f_score.get(coord).copied().unwrap_or_else(C::max_value)
    }
    /// Predecessor of every discovered cell, in discovery order.
    pub fn came_from(&self) -> &FxIndexMap<Coord, Coord> {
        &self.came_from
    }
    pub fn is_open(&self, coord: &Coord) -> bool {
        self.open_members.contains(coord)
    }
    pub fn is_closed(&self, coord: &Coord) -> bool {
        self.closed.contains(coord)
    }

    /// Runs A* from `start` to `end`, calling `on_step` after every expansion and after every
    /// step of the path trace. Returning [ControlFlow::Break] from `on_step` aborts the run with
    /// [Error::Cancelled], leaving the marks made so far on the grid.
    pub fn astar<FH, FS>(
        &mut self,
        grid: &mut Grid,
        start: Coord,
        end: Coord,
        mut heuristic: FH,
        mut on_step: FS,
    ) -> Result<SearchReport<C>>
    where
        FH: FnMut(&Coord) -> C,
        FS: FnMut(&Grid) -> ControlFlow<()>,
    {
        validate_endpoints(grid, start, end)?;
        grid.mark_start(start)?;
        grid.mark_end(end)?;
        grid.update();
        self.clear();

        info!("Searching for a path from {} to {}", start, end);
        let start_f = heuristic(&start);
        self.g_score.insert(start, C::zero());
        self.f_score.insert(start, start_f);
        self.open_set.push(OpenEntry {
            f_score: start_f,
            sequence: self.insertion_counter,
            coord: start,
        });
        self.open_members.insert(start);

        let mut expansions = Vec::new();
        while let Some(OpenEntry {
            f_score,
            coord: current,
            ..
        }) = self.open_set.pop()
        {
            // Entries of cells that were already finalised are dropped.
            if !self.closed.insert(current) {
                trace!("Skipping stale queue entry for {}", current);
                continue;
            }
            self.open_members.remove(&current);

            if current == end {
                let path = reconstruct_path(grid, &self.came_from, end, &mut on_step).ok_or(
                    Error::Cancelled {
                        expanded: expansions.len(),
                    },
                )?;
                grid.set_search_state(end, CellState::End);
                let cost = self.g_score(&end);
                info!(
                    "Found a path of cost {:?} after {} expansions",
                    cost,
                    expansions.len()
                );
                return Ok(SearchReport {
                    outcome: SearchOutcome::PathFound { path, cost },
                    expansions,
                });
            }
            expansions.push(Expansion {
                coord: current,
                f_score,
            });

            let current_g = self.g_score(&current);
            for neighbour in grid.neighbours_of(current) {
                if self.closed.contains(&neighbour) {
                    continue;
                }
                let tentative_g = current_g + C::one();
                if tentative_g < self.g_score(&neighbour) {
                    self.came_from.insert(neighbour, current);
                    self.g_score.insert(neighbour, tentative_g);
                    let neighbour_f = tentative_g + heuristic(&neighbour);
                    self.f_score.insert(neighbour, neighbour_f);
                    // A cell already queued keeps its entry and the f-score it was queued with.
                    if self.open_members.insert(neighbour) {
                        self.insertion_counter += 1;
                        self.open_set.push(OpenEntry {
                            f_score: neighbour_f,
                            sequence: self.insertion_counter,
                            coord: neighbour,
                        });
                        grid.set_search_state(neighbour, CellState::Frontier);
                    }
                }
            }

            if on_step(grid).is_break() {
                info!("Search cancelled after {} expansions", expansions.len());
                return Err(Error::Cancelled {
                    expanded: expansions.len(),
                });
            }
            if current != start {
                grid.set_search_state(current, CellState::Visited);
            }
        }

        if grid.reachable(&start, &end) {
            warn!(
                "{} is reachable from {} but the search exhausted, is the neighbour cache stale?",
                end, start
            );
        } else {
            info!(
                "No path from {} to {} after {} expansions",
                start,
                end,
                expansions.len()
            );
        }
        Ok(SearchReport {
            outcome: SearchOutcome::NoPathExists,
            expansions,
        })
    }
}

/// Both endpoints must be distinct, inside the grid, and either empty or already carrying their
/// own tag.
pub fn validate_endpoints(grid: &Grid, start: Coord, end: Coord) -> Result<()> {
    let start_state = grid.state(start)?;
    let end_state = grid.state(end)?;
    if start == end {
        return Err(Error::InvalidEndpoints("start and end are the same cell"));
    }
    if !matches!(start_state, CellState::Empty | CellState::Start) {
        return Err(Error::InvalidEndpoints("start cell is occupied"));
    }
    if !matches!(end_state, CellState::Empty | CellState::End) {
        return Err(Error::InvalidEndpoints("end cell is occupied"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::path_length;

    fn continue_step(_: &Grid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn manhattan(end: Coord) -> impl FnMut(&Coord) -> u32 {
        move |p: &Coord| p.manhattan_distance(&end) as u32
    }

    #[test]
    fn open_entries_pop_by_f_then_insertion() {
        let mut heap = BinaryHeap::new();
        for (f_score, sequence) in [(3u32, 0), (1, 2), (1, 1), (2, 3)] {
            heap.push(OpenEntry {
                f_score,
                sequence,
                coord: Coord::new(0, 0),
            });
        }
        let order: Vec<(u32, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.f_score, e.sequence))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 3), (3, 0)]);
    }

    // |. . . S .|
    // |. . . # .|
    // |. . . . .|
    // |. . # . .|
    // |. . E . .|
    #[test]
    fn improved_open_cell_keeps_its_queue_entry() {
        let mut grid = Grid::build(5, 50).unwrap();
        grid.mark_barrier(Coord::new(1, 3)).unwrap();
        grid.mark_barrier(Coord::new(3, 2)).unwrap();
        let start = Coord::new(0, 3);
        let end = Coord::new(4, 2);
        let mut ct: SearchContext<u32> = SearchContext::new();
        let report = ct
            .astar(&mut grid, start, end, manhattan(end), continue_step)
            .unwrap();

        // (2, 4) is queued at g = 5 from (2, 3), then reached at g = 3 from (1, 4). It keeps the
        // f = 9 entry and the end is popped first.
        let expected = [
            ((0, 3), 5),
            ((0, 2), 5),
            ((1, 2), 5),
            ((2, 2), 5),
            ((0, 4), 7),
            ((0, 1), 7),
            ((1, 1), 7),
            ((2, 3), 7),
            ((2, 1), 7),
            ((1, 4), 7),
            ((3, 3), 7),
            ((3, 1), 7),
            ((4, 3), 7),
            ((4, 1), 7),
        ];
        let order: Vec<((usize, usize), u32)> = report
            .expansions
            .iter()
            .map(|e| ((e.coord.row, e.coord.col), e.f_score))
            .collect();
        assert_eq!(order, expected);

        let improved = Coord::new(2, 4);
        assert_eq!(ct.g_score(&improved), 3);
        assert_eq!(ct.f_score(&improved), 7);
        assert_eq!(ct.came_from().get(&improved), Some(&Coord::new(1, 4)));
        assert!(ct.is_open(&improved));
        assert!(!ct.is_closed(&improved));
        assert_eq!(grid.state(improved).unwrap(), CellState::Frontier);
        assert_eq!(path_length(report.path().unwrap()), 7);
    }

    #[test]
    fn rejects_bad_endpoints() {
        let mut grid = Grid::build(3, 30).unwrap();
        let mut ct: SearchContext<u32> = SearchContext::new();
        let same = ct.astar(
            &mut grid,
            Coord::new(1, 1),
            Coord::new(1, 1),
            manhattan(Coord::new(1, 1)),
            continue_step,
        );
        assert!(matches!(same, Err(Error::InvalidEndpoints(_))));

        grid.mark_barrier(Coord::new(2, 2)).unwrap();
        let blocked = ct.astar(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(2, 2),
            manhattan(Coord::new(2, 2)),
            continue_step,
        );
        assert!(matches!(blocked, Err(Error::InvalidEndpoints(_))));

        let outside = ct.astar(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(5, 0),
            manhattan(Coord::new(5, 0)),
            continue_step,
        );
        assert!(matches!(outside, Err(Error::OutOfRange { .. })));
        // Nothing ran, so nothing was marked.
        assert!(grid.cells().all(|c| !c.state().is_search_mark()));
    }

    #[test]
    fn marks_endpoints_and_visited_cells() {
        let mut grid = Grid::build(3, 30).unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(0, 2);
        let mut ct: SearchContext<u32> = SearchContext::new();
        let report = ct
            .astar(&mut grid, start, end, manhattan(end), continue_step)
            .unwrap();
        assert_eq!(report.path().unwrap(), &[start, Coord::new(0, 1), end]);
        assert_eq!(grid.start(), Some(start));
        assert_eq!(grid.end(), Some(end));
        assert_eq!(grid.state(start).unwrap(), CellState::Start);
        assert_eq!(grid.state(end).unwrap(), CellState::End);
        assert_eq!(grid.state(Coord::new(0, 1)).unwrap(), CellState::Path);
        assert!(ct.is_closed(&end));
        assert_eq!(ct.g_score(&end), 2);
        assert_eq!(ct.g_score(&Coord::new(2, 2)), u32::MAX);
    }

    #[test]
    fn step_callback_runs_once_per_expansion_and_path_step() {
        let mut grid = Grid::build(4, 40).unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(3, 0);
        let mut steps = 0;
        let mut ct: SearchContext<u32> = SearchContext::new();
        let report = ct
            .astar(&mut grid, start, end, manhattan(end), |_| {
                steps += 1;
                ControlFlow::Continue(())
            })
            .unwrap();
        let path_len = report.path().unwrap().len() - 1;
        assert_eq!(steps, report.expansions.len() + path_len);
    }

    #[test]
    fn cancellation_stops_the_run() {
        let mut grid = Grid::build(6, 60).unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(5, 5);
        let mut steps = 0;
        let mut ct: SearchContext<u32> = SearchContext::new();
        let result = ct.astar(&mut grid, start, end, manhattan(end), |_| {
            steps += 1;
            if steps == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(result, Err(Error::Cancelled { expanded: 3 }));
        assert!(grid.cells().all(|c| c.state() != CellState::Path));
        assert!(grid.cells().any(|c| c.state() == CellState::Frontier));
    }

    #[test]
    fn cancellation_during_path_trace() {
        let mut grid = Grid::build(3, 30).unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 0);
        let mut ct: SearchContext<u32> = SearchContext::new();
        let mut expanding = true;
        let result = ct.astar(&mut grid, start, end, manhattan(end), |g| {
            // Stop at the first step after the end has been reached.
            if g.cells().any(|c| c.state() == CellState::Path) {
                expanding = false;
            }
            if expanding {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
        assert!(matches!(result, Err(Error::Cancelled { .. })));
    }
}
