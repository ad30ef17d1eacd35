//! One-way presentation of cell states. Nothing in here feeds back into the search.
use core::fmt;

use crate::cell::CellState;
use crate::coord::Coord;
use crate::error::Result;
use crate::grid::Grid;

pub type Rgb = (u8, u8, u8);

pub const RED: Rgb = (255, 0, 0);
pub const GREEN: Rgb = (0, 255, 0);
pub const WHITE: Rgb = (255, 255, 255);
pub const BLACK: Rgb = (0, 0, 0);
pub const PURPLE: Rgb = (128, 0, 128);
pub const ORANGE: Rgb = (255, 165, 0);
pub const GREY: Rgb = (128, 128, 128);
pub const TURQUOISE: Rgb = (64, 224, 208);

/// Colour used for the lines between cells.
pub const GRID_LINE: Rgb = BLACK;

pub fn color(state: CellState) -> Rgb {
    match state {
        CellState::Empty => WHITE,
        CellState::Start => ORANGE,
        CellState::End => TURQUOISE,
        CellState::Barrier => BLACK,
        CellState::Frontier => GREEN,
        CellState::Visited => RED,
        CellState::Path => PURPLE,
    }
}

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Barrier => '#',
        CellState::Frontier => 'o',
        CellState::Visited => 'x',
        CellState::Path => '*',
    }
}

/// Square drawn for one cell. Rows run along the x axis and columns along the y axis, matching
/// [pixel_to_cell](crate::session::pixel_to_cell).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub size: usize,
}

pub fn cell_rect(grid: &Grid, coord: Coord) -> Result<PixelRect> {
    let cell = grid.cell(coord)?;
    let size = grid.cell_width();
    Ok(PixelRect {
        x: cell.row() * size,
        y: cell.col() * size,
        size,
    })
}

/// Pixel offsets of the separating lines, used for both axes.
pub fn grid_line_offsets(grid: &Grid) -> impl Iterator<Item = usize> {
    let gap = grid.cell_width();
    (0..grid.rows()).map(move |i| i * gap)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.rows())
                .map(|col| {
                    self.state(Coord::new(row, col))
                        .map(glyph)
                        .unwrap_or('?')
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
