//! Shortest-path distances over the passages of a carved maze.

mod dijkstra;
mod sweep;

pub use dijkstra::longest_path;
pub use sweep::DistanceSweep;
