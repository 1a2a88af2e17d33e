//! Maze carving algorithms and the entry point that wires them to a seeded session.

mod binary_tree;
mod random;
mod recur_backtrack;
mod sidewinder;

use std::{fmt, str::FromStr};

pub use binary_tree::BinaryTree;
pub use random::{MazeRandom, ScriptedRandom, SeededRandom, resolve_seed};
pub use recur_backtrack::RecursiveBacktracker;
pub use sidewinder::Sidewinder;

use crate::{
    error::{MazeError, Result},
    maze::{Coordinate, Grid},
    state::{Algorithm, MazeState, MazeStepper, run_to_end},
};

/// Order in which row-by-row algorithms visit the grid. Cells within a row always go
/// west to east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    #[default]
    NorthFirst,
    SouthFirst,
}

impl ScanOrder {
    /// Rows are visited starting from the half of the grid that holds `start`.
    pub fn from_start(start: Coordinate, height: u16) -> Self {
        if u32::from(start.1) * 2 + 1 > u32::from(height) {
            ScanOrder::SouthFirst
        } else {
            ScanOrder::NorthFirst
        }
    }

    /// The `index`-th cell visited on a `width` x `height` grid.
    pub fn coordinate(self, index: usize, width: u16, height: u16) -> Coordinate {
        let width = usize::from(width.max(1));
        let x = (index % width) as u16;
        let row = (index / width) as u16;
        match self {
            ScanOrder::NorthFirst => (x, row),
            ScanOrder::SouthFirst => (x, height.saturating_sub(1).saturating_sub(row)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmKind {
    BinaryTree,
    Sidewinder,
    #[default]
    RecursiveBacktracker,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::BinaryTree,
        AlgorithmKind::Sidewinder,
        AlgorithmKind::RecursiveBacktracker,
    ];

    /// Name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::BinaryTree => "binary-tree",
            AlgorithmKind::Sidewinder => "sidewinder",
            AlgorithmKind::RecursiveBacktracker => "recursive-backtracker",
        }
    }

    fn build(self, random: SeededRandom, order: ScanOrder) -> Box<dyn Algorithm> {
        match self {
            AlgorithmKind::BinaryTree => Box::new(BinaryTree::new(random, order)),
            AlgorithmKind::Sidewinder => Box::new(Sidewinder::new(random, order)),
            AlgorithmKind::RecursiveBacktracker => Box::new(RecursiveBacktracker::new(random)),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::BinaryTree => write!(f, "Binary Tree"),
            AlgorithmKind::Sidewinder => write!(f, "Sidewinder"),
            AlgorithmKind::RecursiveBacktracker => write!(f, "Recursive Backtracker"),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_string()))
    }
}

/// Everything needed to start a generation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeOptions {
    pub width: u16,
    pub height: u16,
    pub algorithm: AlgorithmKind,
    pub start: Coordinate,
    pub end: Coordinate,
    /// `None` picks a fresh seed from the OS
    pub seed: Option<u64>,
}

impl MazeOptions {
    /// Recursive backtracker from the north-west to the south-east corner, unseeded.
    pub fn new(width: u16, height: u16) -> Self {
        MazeOptions {
            width,
            height,
            algorithm: AlgorithmKind::default(),
            start: (0, 0),
            end: (width.saturating_sub(1), height.saturating_sub(1)),
            seed: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_start(mut self, start: Coordinate) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Coordinate) -> Self {
        self.end = end;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let in_bounds = |(x, y): Coordinate| x < self.width && y < self.height;
        for (name, coordinate) in [("start", self.start), ("end", self.end)] {
            if !in_bounds(coordinate) {
                return Err(MazeError::InvalidCoordinate { name, coordinate });
            }
        }
        Ok(())
    }
}

/// A generation session: the seeded algorithm and the state it carves.
pub struct MazeGenerator {
    options: MazeOptions,
    seed: u64,
    state: MazeState,
    algorithm: Box<dyn Algorithm>,
}

impl MazeGenerator {
    pub fn new(options: MazeOptions) -> Result<Self> {
        options.validate()?;
        let seed = resolve_seed(options.seed);
        tracing::info!(
            "[generator] {} {}x{} from {:?} to {:?}, seed {}",
            options.algorithm,
            options.width,
            options.height,
            options.start,
            options.end,
            seed
        );

        let state = MazeState::new(Grid::new(options.width, options.height), options.start);
        let order = ScanOrder::from_start(options.start, options.height);
        let algorithm = options.algorithm.build(SeededRandom::new(seed), order);
        Ok(MazeGenerator {
            options,
            seed,
            state,
            algorithm,
        })
    }

    /// The seed actually used, whether given or drawn.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &MazeOptions {
        &self.options
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    /// Hands the untouched state and the algorithm to a stepper for step-wise playback.
    pub fn make_stepper(self) -> MazeStepper {
        MazeStepper::new(self.state, self.algorithm)
    }

    /// Carves the whole maze without keeping any step.
    pub fn generate(mut self) -> Result<GeneratedMaze> {
        let steps = run_to_end(self.algorithm.as_mut(), &mut self.state)?;
        tracing::debug!("[generator] carved in {} steps", steps);
        Ok(GeneratedMaze {
            state: self.state,
            seed: self.seed,
            start: self.options.start,
            end: self.options.end,
        })
    }
}

/// A fully carved maze together with the state used to build it.
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub state: MazeState,
    pub seed: u64,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl GeneratedMaze {
    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }
}

pub fn generate_maze(options: MazeOptions) -> Result<GeneratedMaze> {
    MazeGenerator::new(options)?.generate()
}
