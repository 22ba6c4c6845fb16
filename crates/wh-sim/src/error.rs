use thiserror::Error;
use wh_core::{ConfigError, InvariantViolation, Tick};
use wh_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),

    #[error("grid layout error: {0}")]
    Grid(#[from] GridError),

    #[error("layout is {width}x{height} but the scenario grid is {grid_size}x{grid_size}")]
    LayoutMismatch { grid_size: u32, width: u32, height: u32 },

    #[error("{what} length {got} does not match robot count {expected}")]
    RobotCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("invariant violated at {tick}: {violation}")]
    Invariant {
        tick: Tick,
        #[source]
        violation: InvariantViolation,
    },

    #[error("run halted by an invariant violation at {tick}; reset or reconfigure to continue")]
    Halted { tick: Tick },
}

pub type SimResult<T> = Result<T, SimError>;
