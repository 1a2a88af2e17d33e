//! The undoable maze state, its operation algebra, and the stepper that replays it.

mod maze_state;
mod operation;
mod stepper;

pub use maze_state::MazeState;
pub use operation::{Emission, Operation, Step};
pub use stepper::{Algorithm, MazeStepper, StepSource, run_to_end};
