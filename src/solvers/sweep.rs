use std::collections::VecDeque;

use crate::{
    maze::Coordinate,
    state::{Algorithm, Emission, MazeState, Operation},
};

/// Breadth-first distances from the start of the maze, played as operations on the
/// state so the sweep can be stepped and rewound like a generator.
///
/// The first step seeds the start at distance 0, each following step assigns one whole
/// level and shows it as the targets, and a last step clears the targets. Expects the
/// distance map of the state to be empty when the sweep begins.
pub struct DistanceSweep {
    frontier: Vec<Coordinate>,
    level: u32,
    started: bool,
    done: bool,
    pending: VecDeque<Emission>,
}

impl DistanceSweep {
    pub fn new() -> Self {
        DistanceSweep {
            frontier: Vec::new(),
            level: 0,
            started: false,
            done: false,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self, state: &MazeState) {
        if self.done {
            return;
        }
        if !self.started {
            let root = state.start();
            self.pending.extend([
                Operation::SetDistance(root, Some(0)).into(),
                Operation::SetMaxDistance(Some((root, 0))).into(),
                Operation::SetTargetCoordinates(vec![root]).into(),
                Emission::StepBoundary,
            ]);
            self.frontier = vec![root];
            self.started = true;
            return;
        }

        let grid = state.grid();
        let distances = state.distances();
        let level = self.level + 1;
        let mut max = distances.max_distance();
        let mut next_frontier: Vec<Coordinate> = Vec::new();

        for &current in &self.frontier {
            let linked = grid.get(current).unwrap_or_default();
            for direction in linked.iter() {
                let next = direction.translate(current);
                let reached = distances.get(next).ok().flatten().is_some();
                if reached || next_frontier.contains(&next) {
                    continue;
                }
                self.pending
                    .push_back(Operation::SetDistance(next, Some(level)).into());
                if max.is_none_or(|max| level > max) {
                    self.pending
                        .push_back(Operation::SetMaxDistance(Some((next, level))).into());
                    max = Some(level);
                }
                next_frontier.push(next);
            }
        }

        if next_frontier.is_empty() {
            tracing::debug!("[solver] distances swept up to {}", self.level);
            self.done = true;
        } else {
            self.level = level;
        }
        self.pending.extend([
            Operation::SetTargetCoordinates(next_frontier.clone()).into(),
            Emission::StepBoundary,
        ]);
        self.frontier = next_frontier;
    }
}

impl Default for DistanceSweep {
    fn default() -> Self {
        DistanceSweep::new()
    }
}

impl Algorithm for DistanceSweep {
    fn next_emission(&mut self, state: &MazeState) -> Option<Emission> {
        if self.pending.is_empty() {
            self.refill(state);
        }
        self.pending.pop_front()
    }
}
