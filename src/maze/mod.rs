//! Maze data: directions, the passage grid, distance maps and their text rendering.

mod direction;
mod distances;
mod grid;
pub mod render;

pub use direction::Direction;
pub use distances::DistanceMap;
pub use grid::Grid;
pub use render::TextRenderer;

/// A cell position `(x, y)`, with `(0, 0)` at the north-west corner.
pub type Coordinate = (u16, u16);
