use super::{Operation, Step};
use crate::{
    error::{MazeError, Result},
    maze::{Coordinate, Direction, DistanceMap, Grid},
};

/// Everything a generation session mutates: the grid, the distances from the start,
/// the run (current path or stack) and the targets shown by visualisers.
///
/// All mutation goes through [`MazeState::apply_operation`], which returns the inverse
/// operation. The recording helpers (`push_run`, `grid_link`, ...) additionally buffer
/// each forward operation and its inverse until [`MazeState::pop_maze_step`] collects them.
#[derive(Debug, Clone)]
pub struct MazeState {
    grid: Grid,
    start: Coordinate,
    distances: DistanceMap,
    run: Vec<Coordinate>,
    target_coordinates: Vec<Coordinate>,
    target_directions: Direction,
    forward_operations: Vec<Operation>,
    backward_operations: Vec<Operation>,
}

impl MazeState {
    pub fn new(grid: Grid, start: Coordinate) -> Self {
        let distances = DistanceMap::new(grid.width(), grid.height(), start);
        MazeState {
            grid,
            start,
            distances,
            run: Vec::new(),
            target_coordinates: Vec::new(),
            target_directions: Direction::empty(),
            forward_operations: Vec::new(),
            backward_operations: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn run(&self) -> &[Coordinate] {
        &self.run
    }

    pub fn target_coordinates(&self) -> &[Coordinate] {
        &self.target_coordinates
    }

    pub fn target_directions(&self) -> Direction {
        self.target_directions
    }

    /// Applies `operation` and returns the operation that undoes it.
    ///
    /// Fails without mutating anything when popping an empty run or when a distance
    /// operation addresses a cell outside the grid.
    pub fn apply_operation(&mut self, operation: Operation) -> Result<Operation> {
        tracing::trace!("[state] apply {:?}", operation);
        let inverse = match operation {
            Operation::PushRun(coord) => {
                self.run.push(coord);
                Operation::PopRun
            }
            Operation::PopRun => {
                let head = self.run.pop().ok_or(MazeError::RunUnderflow)?;
                Operation::PushRun(head)
            }
            Operation::SetRun(run) => Operation::SetRun(std::mem::replace(&mut self.run, run)),
            Operation::Link(coord, directions) => {
                let opened = directions.difference(self.grid.get(coord).unwrap_or_default());
                self.grid.link(coord, directions);
                Operation::Unlink(coord, opened)
            }
            Operation::Unlink(coord, directions) => {
                let closed = directions.intersection(self.grid.get(coord).unwrap_or_default());
                self.grid.unlink(coord, directions);
                Operation::Link(coord, closed)
            }
            Operation::SetTargetCoordinates(targets) => Operation::SetTargetCoordinates(
                std::mem::replace(&mut self.target_coordinates, targets),
            ),
            Operation::SetTargetDirections(directions) => Operation::SetTargetDirections(
                std::mem::replace(&mut self.target_directions, directions),
            ),
            Operation::SetDistance(coord, distance) => {
                let previous = self.distances.assign(coord, distance)?;
                Operation::SetDistance(coord, previous)
            }
            Operation::SetMaxDistance(max) => Operation::SetMaxDistance(self.distances.set_max(max)?),
        };
        Ok(inverse)
    }

    fn execute(&mut self, operation: Operation) -> Result<()> {
        let inverse = self.apply_operation(operation.clone())?;
        self.forward_operations.push(operation);
        self.backward_operations.push(inverse);
        Ok(())
    }

    /// Collects every operation recorded since the previous call into a [`Step`].
    pub fn pop_maze_step(&mut self) -> Step {
        let forward = std::mem::take(&mut self.forward_operations);
        let mut backward = std::mem::take(&mut self.backward_operations);
        backward.reverse();
        Step { forward, backward }
    }

    pub fn push_run(&mut self, coord: Coordinate) -> Result<()> {
        self.execute(Operation::PushRun(coord))
    }

    pub fn pop_run(&mut self) -> Result<()> {
        self.execute(Operation::PopRun)
    }

    pub fn set_run(&mut self, run: Vec<Coordinate>) -> Result<()> {
        self.execute(Operation::SetRun(run))
    }

    pub fn grid_link(&mut self, coord: Coordinate, directions: Direction) -> Result<()> {
        self.execute(Operation::Link(coord, directions))
    }

    pub fn grid_unlink(&mut self, coord: Coordinate, directions: Direction) -> Result<()> {
        self.execute(Operation::Unlink(coord, directions))
    }

    pub fn set_target_coordinates(&mut self, targets: Vec<Coordinate>) -> Result<()> {
        self.execute(Operation::SetTargetCoordinates(targets))
    }

    pub fn set_target_directions(&mut self, directions: Direction) -> Result<()> {
        self.execute(Operation::SetTargetDirections(directions))
    }

    /// Records the distance of `coord`, and a new maximum if `distance` exceeds the
    /// current one.
    pub fn set_distance(&mut self, coord: Coordinate, distance: u32) -> Result<()> {
        self.execute(Operation::SetDistance(coord, Some(distance)))?;
        if self.distances.max_distance().is_none_or(|max| distance > max) {
            self.execute(Operation::SetMaxDistance(Some((coord, distance))))?;
        }
        Ok(())
    }

    pub fn clear_distance(&mut self, coord: Coordinate) -> Result<()> {
        self.execute(Operation::SetDistance(coord, None))
    }
}
