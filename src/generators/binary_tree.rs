use std::collections::VecDeque;

use super::{MazeRandom, ScanOrder};
use crate::{
    maze::{Direction, Grid},
    state::{Algorithm, Emission, MazeState, Operation},
};

/// Binary tree: every cell links either north or east, chosen at random among the
/// directions that stay on the grid. One step per cell.
pub struct BinaryTree<R> {
    random: R,
    order: ScanOrder,
    /// Index of the next cell in scan order
    cursor: usize,
    pending: VecDeque<Emission>,
}

impl<R: MazeRandom> BinaryTree<R> {
    pub fn new(random: R, order: ScanOrder) -> Self {
        BinaryTree {
            random,
            order,
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self, grid: &Grid) {
        let total = grid.len();
        if self.cursor < total {
            let coord = self.order.coordinate(self.cursor, grid.width(), grid.height());
            let candidates = (Direction::NORTH | Direction::EAST) & grid.valid_directions(coord);
            let targets = candidates.iter().map(|d| d.translate(coord)).collect();

            self.pending.extend([
                Operation::SetRun(vec![coord]).into(),
                Operation::SetTargetDirections(candidates).into(),
                Operation::SetTargetCoordinates(targets).into(),
            ]);
            if !candidates.is_empty() {
                let direction = self.random.choose_direction(candidates);
                self.pending.push_back(Operation::Link(coord, direction).into());
            }
            self.pending.push_back(Emission::StepBoundary);
        } else if self.cursor == total {
            self.pending.extend([
                Operation::SetRun(Vec::new()).into(),
                Operation::SetTargetDirections(Direction::empty()).into(),
                Operation::SetTargetCoordinates(Vec::new()).into(),
                Emission::StepBoundary,
            ]);
        } else {
            return;
        }
        self.cursor += 1;
    }
}

impl<R: MazeRandom> Algorithm for BinaryTree<R> {
    fn next_emission(&mut self, state: &MazeState) -> Option<Emission> {
        if self.pending.is_empty() {
            self.refill(state.grid());
        }
        self.pending.pop_front()
    }
}
