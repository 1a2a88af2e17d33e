use crate::maze::{Coordinate, Direction};

/// One atomic mutation of a [`MazeState`](super::MazeState).
///
/// Applying an operation returns the operation that undoes it, see
/// [`MazeState::apply_operation`](super::MazeState::apply_operation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Push a coordinate onto the run.
    PushRun(Coordinate),
    /// Pop the last coordinate of the run.
    PopRun,
    /// Replace the whole run.
    SetRun(Vec<Coordinate>),
    /// Open passages from a cell (and back from its neighbours).
    Link(Coordinate, Direction),
    /// Close passages from a cell (and back from its neighbours).
    Unlink(Coordinate, Direction),
    /// Replace the cells the algorithm is looking at.
    SetTargetCoordinates(Vec<Coordinate>),
    /// Replace the directions the algorithm is looking at.
    SetTargetDirections(Direction),
    /// Set (`Some`) or clear (`None`) the distance of a cell.
    SetDistance(Coordinate, Option<u32>),
    /// Set or clear the farthest cell and its distance.
    SetMaxDistance(Option<(Coordinate, u32)>),
}

/// What an [`Algorithm`](super::Algorithm) hands to its driver: an operation to apply,
/// or the marker that closes the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Operation(Operation),
    StepBoundary,
}

impl From<Operation> for Emission {
    fn from(op: Operation) -> Self {
        Emission::Operation(op)
    }
}

/// One reversible unit of progress.
///
/// `backward` is stored in the order it must be applied, i.e. already reversed
/// relative to `forward`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub forward: Vec<Operation>,
    pub backward: Vec<Operation>,
}

impl Step {
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }
}
