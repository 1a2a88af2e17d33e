use std::collections::VecDeque;

use super::{MazeRandom, ScanOrder};
use crate::{
    maze::Direction,
    state::{Algorithm, Emission, MazeState, Operation},
};

/// Sidewinder: walks each row west to east growing a run of cells linked eastwards.
/// When the run is closed (always at the eastern edge, otherwise on a coin flip) one of
/// its cells is linked north and the run starts over.
///
/// The run lives in the maze state, so visualisers see it grow.
pub struct Sidewinder<R> {
    random: R,
    order: ScanOrder,
    cursor: usize,
    pending: VecDeque<Emission>,
}

impl<R: MazeRandom> Sidewinder<R> {
    pub fn new(random: R, order: ScanOrder) -> Self {
        Sidewinder {
            random,
            order,
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self, state: &MazeState) {
        let grid = state.grid();
        let total = grid.len();
        if self.cursor > total {
            return;
        }
        if self.cursor == total {
            self.pending.extend([
                Operation::SetTargetDirections(Direction::empty()).into(),
                Operation::SetTargetCoordinates(Vec::new()).into(),
                Emission::StepBoundary,
            ]);
            self.cursor += 1;
            return;
        }

        let coord = self.order.coordinate(self.cursor, grid.width(), grid.height());
        self.cursor += 1;

        let mut run = state.run().to_vec();
        run.push(coord);
        self.pending.push_back(Operation::PushRun(coord).into());

        let valid = grid.valid_directions(coord);
        let at_eastern_boundary = !valid.contains(Direction::EAST);
        let at_northern_boundary = !valid.contains(Direction::NORTH);
        let should_close_out =
            at_eastern_boundary || (!at_northern_boundary && self.random.coin_flip());

        if should_close_out {
            // Nothing to link north of the first row, so no member is drawn there
            let member = if at_northern_boundary {
                None
            } else {
                self.random.choose_coordinate(&run)
            };
            match member {
                Some(member) => self.pending.extend([
                    Operation::SetTargetDirections(Direction::NORTH).into(),
                    Operation::SetTargetCoordinates(vec![Direction::NORTH.translate(member)])
                        .into(),
                    Operation::Link(member, Direction::NORTH).into(),
                ]),
                None => self.pending.extend([
                    Operation::SetTargetDirections(Direction::empty()).into(),
                    Operation::SetTargetCoordinates(Vec::new()).into(),
                ]),
            }
            self.pending.push_back(Operation::SetRun(Vec::new()).into());
        } else {
            self.pending.extend([
                Operation::SetTargetDirections(Direction::EAST).into(),
                Operation::SetTargetCoordinates(vec![Direction::EAST.translate(coord)]).into(),
                Operation::Link(coord, Direction::EAST).into(),
            ]);
        }
        self.pending.push_back(Emission::StepBoundary);
    }
}

impl<R: MazeRandom> Algorithm for Sidewinder<R> {
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

    #[test]
    fn test_sidewinder_south_first() {
        let mut state = MazeState::new(Grid::new(3, 3), (0, 2));
        // Only cells that are neither on the eastern nor the northern edge flip a coin;
        // coordinates are not scripted, so the last run member is linked north.
        let coins = [
            false, false, // y = 2
            true, false, // y = 1
        ];
        let random = ScriptedRandom::new().with_coin_flips(coins);
        let mut algorithm = Sidewinder::new(random, ScanOrder::SouthFirst);
        run_to_end(&mut algorithm, &mut state).unwrap();

        let expected = "\
+---+---+---+
|           |
+   +---+   +
|   |       |
+---+---+   +
|           |
+---+---+---+
";
        assert_eq!(TextRenderer::render_grid(state.grid()), expected);
    }

    #[test]
    fn test_run_grows_and_closes() {
        let state = MazeState::new(Grid::new(3, 2), (0, 0));
        let random = ScriptedRandom::new().with_coin_flips([false, true]);
        let mut stepper = MazeStepper::new(state, Sidewinder::new(random, ScanOrder::NorthFirst));

        // First row is the northern edge: the run only grows east until the edge
        assert!(stepper.step_forward());
        assert_eq!(stepper.state().run(), &[(0, 0)]);
        assert!(stepper.step_forward());
        assert_eq!(stepper.state().run(), &[(0, 0), (1, 0)]);
        assert!(stepper.step_forward());
        assert!(stepper.state().run().is_empty());

        // Second row: (0, 1) keeps going, (1, 1) closes and links itself north
        assert!(stepper.step_forward());
        assert_eq!(stepper.state().target_coordinates(), &[(1, 1)]);
        assert!(stepper.step_forward());
        assert_eq!(stepper.state().target_coordinates(), &[(1, 0)]);
        assert_eq!(stepper.state().target_directions(), Direction::NORTH);
        assert!(stepper.state().run().is_empty());

        stepper.step_forward_until_end();
        assert_eq!(stepper.state().grid().passage_count(), 5);
        assert!(stepper.state().target_coordinates().is_empty());
    }

    #[test]
    fn test_first_row_draws_no_member() {
        let mut state = MazeState::new(Grid::new(2, 2), (0, 0));
        let random = ScriptedRandom::new()
            .with_coordinates([(0, 1)])
            .with_coin_flips([false]);
        let mut algorithm = Sidewinder::new(random, ScanOrder::NorthFirst);
        run_to_end(&mut algorithm, &mut state).unwrap();

        // The scripted member is the first one of the second row's run
        let expected = "\
+---+---+
|       |
+   +---+
|       |
+---+---+
";
        assert_eq!(TextRenderer::render_grid(state.grid()), expected);
        assert_eq!(algorithm.random.remaining(), (0, 0, 0));
    }

    #[test]
    fn test_single_column() {
        let mut state = MazeState::new(Grid::new(1, 4), (0, 0));
        let mut algorithm = Sidewinder::new(ScriptedRandom::new(), ScanOrder::NorthFirst);
        run_to_end(&mut algorithm, &mut state).unwrap();
        assert_eq!(state.grid().passage_count(), 3);
        for y in 1..4 {
            assert!(state.grid().get((0, y)).unwrap().contains(Direction::NORTH));
        }
    }
}
