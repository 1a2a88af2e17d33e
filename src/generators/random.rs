use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::maze::{Coordinate, Direction};

/// Source of every random decision a carving algorithm makes.
pub trait MazeRandom {
    /// Picks one direction out of `directions` uniformly. Returns an empty set only
    /// when `directions` is empty.
    fn choose_direction(&mut self, directions: Direction) -> Direction;

    /// Picks one of `coordinates` uniformly, `None` if the slice is empty.
    fn choose_coordinate(&mut self, coordinates: &[Coordinate]) -> Option<Coordinate>;

    /// Any cell of a `width` x `height` grid.
    fn random_coordinate(&mut self, width: u16, height: u16) -> Coordinate;

    fn coin_flip(&mut self) -> bool;
}

/// Picks a seed from the OS when none is given, so every session can be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => StdRng::from_os_rng().random(),
    }
}

/// [`MazeRandom`] backed by a seeded [`StdRng`]; the same seed yields the same choices.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MazeRandom for SeededRandom {
    fn choose_direction(&mut self, directions: Direction) -> Direction {
        let count = directions.iter().count();
        if count == 0 {
            return Direction::empty();
        }
        let idx = self.rng.random_range(0..count);
        directions.iter().nth(idx).unwrap_or_default()
    }

    fn choose_coordinate(&mut self, coordinates: &[Coordinate]) -> Option<Coordinate> {
        if coordinates.is_empty() {
            return None;
        }
        Some(coordinates[self.rng.random_range(0..coordinates.len())])
    }

    fn random_coordinate(&mut self, width: u16, height: u16) -> Coordinate {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        (
            self.rng.random_range(0..width),
            self.rng.random_range(0..height),
        )
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// [`MazeRandom`] that replays scripted answers, for deterministic tests and demos.
///
/// Each kind of decision reads its own queue. Once a queue runs dry the answer falls back
/// to something predictable: the first candidate direction, the last coordinate of the
/// slice, the north-west corner, or `false` for a coin flip.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    directions: VecDeque<Direction>,
    coordinates: VecDeque<Coordinate>,
    coins: VecDeque<bool>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        ScriptedRandom::default()
    }

    /// Answers for [`MazeRandom::choose_direction`], returned as is.
    pub fn with_directions(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.directions.extend(directions);
        self
    }

    /// Answers for both [`MazeRandom::choose_coordinate`] and [`MazeRandom::random_coordinate`].
    pub fn with_coordinates(mut self, coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        self.coordinates.extend(coordinates);
        self
    }

    pub fn with_coin_flips(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    /// Scripted answers not consumed yet, as (directions, coordinates, coin flips).
    pub fn remaining(&self) -> (usize, usize, usize) {
        (self.directions.len(), self.coordinates.len(), self.coins.len())
    }
}

impl MazeRandom for ScriptedRandom {
    fn choose_direction(&mut self, directions: Direction) -> Direction {
        self.directions
            .pop_front()
            .unwrap_or_else(|| directions.iter().next().unwrap_or_default())
    }

    fn choose_coordinate(&mut self, coordinates: &[Coordinate]) -> Option<Coordinate> {
        if coordinates.is_empty() {
            return None;
        }
        self.coordinates
            .pop_front()
            .or_else(|| coordinates.last().copied())
    }

    fn random_coordinate(&mut self, _width: u16, _height: u16) -> Coordinate {
        self.coordinates.pop_front().unwrap_or((0, 0))
    }

    fn coin_flip(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }
}
