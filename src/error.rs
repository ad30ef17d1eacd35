use thiserror::Error;

/// Errors raised by grid access, endpoint validation and cancelled searches.
///
/// Running out of cells without reaching the end is not an error, see
/// [SearchOutcome::NoPathExists](crate::search::SearchOutcome::NoPathExists).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cell ({row}, {col}) lies outside the {rows}x{rows} grid")]
    OutOfRange { row: usize, col: usize, rows: usize },
    #[error("cannot build a grid of {rows} rows over {pixel_width} pixels")]
    InvalidDimensions { rows: usize, pixel_width: usize },
    #[error("invalid search endpoints: {0}")]
    InvalidEndpoints(&'static str),
    #[error("search cancelled after {expanded} expansions")]
    Cancelled { expanded: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
