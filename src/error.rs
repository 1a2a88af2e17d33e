use thiserror::Error;

use crate::maze::Coordinate;

pub type Result<T> = std::result::Result<T, MazeError>;

/// Errors raised by the maze core.
///
/// `RunUnderflow` and `OutOfBounds` mean an algorithm produced an operation it
/// should not have; callers are expected to abort the session rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("cannot pop from an empty run")]
    RunUnderflow,

    #[error("coordinate {coordinate:?} is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        width: u16,
        height: u16,
    },

    #[error("maze dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("{name} coordinate {coordinate:?} lies outside the maze")]
    InvalidCoordinate {
        name: &'static str,
        coordinate: Coordinate,
    },

    #[error("unknown algorithm {0:?}, expected binary-tree, sidewinder or recursive-backtracker")]
    UnknownAlgorithm(String),
}
