//! Step-by-step maze generation where every change to the maze can be undone.
//!
//! Carving algorithms ([`generators`]) emit [`state::Operation`]s instead of touching the
//! maze directly. [`state::MazeState`] applies them and hands back their inverses, and
//! [`state::MazeStepper`] groups them into steps that can be replayed in both directions.

pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;
pub mod state;
