//! Grid error type.

use thiserror::Error;

/// Errors produced by `wh-grid`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one cell (got {width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },

    #[error("layout has no {0}")]
    Missing(&'static str),
}

pub type GridResult<T> = Result<T, GridError>;
