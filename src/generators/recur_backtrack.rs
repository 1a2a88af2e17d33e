use std::collections::VecDeque;

use super::MazeRandom;
use crate::{
    maze::Direction,
    state::{Algorithm, Emission, MazeState, Operation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Carve,
    Done,
}

/// Recursive backtracker (randomised depth-first search).
///
/// The stack is the run of the maze state: the top cell links into a random unvisited
/// neighbour which is pushed in turn, and dead ends are popped until the stack is empty.
/// Every step ends right after the candidates of the top cell have been shown.
pub struct RecursiveBacktracker<R> {
    random: R,
    phase: Phase,
    pending: VecDeque<Emission>,
}

impl<R: MazeRandom> RecursiveBacktracker<R> {
    pub fn new(random: R) -> Self {
        RecursiveBacktracker {
            random,
            phase: Phase::Start,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self, state: &MazeState) {
        let grid = state.grid();
        match self.phase {
            Phase::Start => {
                let start = self.random.random_coordinate(grid.width(), grid.height());
                tracing::debug!("[generator] backtracker starts at {:?}", start);
                self.pending.push_back(Operation::PushRun(start).into());
                self.phase = Phase::Carve;
            }
            Phase::Carve => {
                let Some(&current) = state.run().last() else {
                    self.pending.push_back(Emission::StepBoundary);
                    self.phase = Phase::Done;
                    return;
                };
                let available = grid.available_directions(current);
                if available.is_empty() {
                    // Dead end, backtrack
                    self.pending.extend([
                        Operation::SetTargetDirections(Direction::empty()).into(),
                        Operation::SetTargetCoordinates(Vec::new()).into(),
                        Emission::StepBoundary,
                        Operation::PopRun.into(),
                    ]);
                    return;
                }

                let targets = available.iter().map(|d| d.translate(current)).collect();
                self.pending.extend([
                    Operation::SetTargetDirections(available).into(),
                    Operation::SetTargetCoordinates(targets).into(),
                    Emission::StepBoundary,
                ]);
                let direction = self.random.choose_direction(available);
                self.pending.extend([
                    Operation::Link(current, direction).into(),
                    Operation::PushRun(direction.translate(current)).into(),
                ]);
            }
            Phase::Done => {}
        }
    }
}

impl<R: MazeRandom> Algorithm for RecursiveBacktracker<R> {
    fn next_emission(&mut self, state: &MazeState) -> Option<Emission> {
        if self.pending.is_empty() {
            self.refill(state);
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::ScriptedRandom,
        maze::{Grid, TextRenderer},
        state::{MazeStepper, run_to_end},
    };

    const N: Direction = Direction::NORTH;
    const S: Direction = Direction::SOUTH;
    const E: Direction = Direction::EAST;
    const W: Direction = Direction::WEST;

    #[test]
    fn test_recursive_backtracker() {
        let mut state = MazeState::new(Grid::new(4, 4), (0, 1));
        let directions = [
            N, E, S, S, S, W, N, // (0, 1) to (0, 2)
            E, N, E, S, // (1, 3) to (3, 3)
            N, N, W, S, // (3, 2) to (3, 0)
        ];
        let random = ScriptedRandom::new()
            .with_coordinates([(0, 1)])
            .with_directions(directions);
        let mut algorithm = RecursiveBacktracker::new(random);
        run_to_end(&mut algorithm, &mut state).unwrap();

        let expected = "\
+---+---+---+---+
|       |       |
+   +   +   +   +
|   |   |   |   |
+---+   +---+   +
|   |   |       |
+   +   +   +   +
|           |   |
+---+---+---+---+
";
        assert_eq!(TextRenderer::render_grid(state.grid()), expected);
        assert!(state.run().is_empty());
        assert!(state.target_coordinates().is_empty());
    }

    #[test]
    fn test_targets_shown_before_carving() {
        let state = MazeState::new(Grid::new(3, 3), (1, 1));
        let random = ScriptedRandom::new()
            .with_coordinates([(1, 1)])
            .with_directions([E]);
        let mut stepper = MazeStepper::new(state, RecursiveBacktracker::new(random));

        assert!(stepper.step_forward());
        let state = stepper.state();
        assert_eq!(state.run(), &[(1, 1)]);
        assert_eq!(state.target_directions(), Direction::all());
        assert_eq!(state.target_coordinates(), &[(1, 0), (1, 2), (2, 1), (0, 1)]);
        assert_eq!(state.grid().passage_count(), 0);

        assert!(stepper.step_forward());
        let state = stepper.state();
        assert_eq!(state.run(), &[(1, 1), (2, 1)]);
        assert_eq!(state.grid().get((1, 1)), Some(E));
        assert_eq!(state.target_directions(), N | S);
    }

    #[test]
    fn test_single_cell() {
        let mut state = MazeState::new(Grid::new(1, 1), (0, 0));
        let mut algorithm = RecursiveBacktracker::new(ScriptedRandom::new());
        // Push and show no targets, then pop
        assert_eq!(run_to_end(&mut algorithm, &mut state), Ok(2));
        assert!(state.run().is_empty());
        assert_eq!(state.grid().passage_count(), 0);
    }

    #[test]
    fn test_round_trip_restores_empty_grid() {
        let state = MazeState::new(Grid::new(4, 3), (0, 0));
        let mut stepper = MazeStepper::new(state, RecursiveBacktracker::new(ScriptedRandom::new()));
        stepper.step_forward_until_end();
        assert_eq!(stepper.state().grid().passage_count(), 11);

        stepper.step_backward_until_end();
        assert_eq!(stepper.state().grid(), &Grid::new(4, 3));
        assert!(stepper.state().run().is_empty());
        assert!(stepper.state().target_coordinates().is_empty());
        assert_eq!(stepper.state().target_directions(), Direction::empty());
    }
}
