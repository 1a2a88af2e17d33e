use std::fmt;

use super::{Coordinate, Direction};
use crate::maze::render::TextRenderer;

/// A rectangular grid of cells, each storing the directions of its open passages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Direction]>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Creates a grid with every wall in place.
    pub fn new(width: u16, height: u16) -> Self {
        let data = vec![Direction::empty(); width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Coordinate) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, coord: Coordinate) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    /// Open passages of the cell at `coord`, or `None` outside the grid.
    pub fn get(&self, coord: Coordinate) -> Option<Direction> {
        self.is_in_bounds(coord)
            .then(|| self.data[self.ravel_index(coord)])
    }

    /// Opens a passage from `coord` in each of `directions`, and the matching
    /// passage back from every neighbour. Directions leading off the grid are skipped.
    pub fn link(&mut self, coord: Coordinate, directions: Direction) {
        self.update(coord, directions, true, true);
    }

    /// Closes the passages opened by [`Grid::link`].
    pub fn unlink(&mut self, coord: Coordinate, directions: Direction) {
        self.update(coord, directions, false, true);
    }

    /// Opens passages on `coord` only, leaving the neighbours untouched.
    pub fn link_one_way(&mut self, coord: Coordinate, directions: Direction) {
        self.update(coord, directions, true, false);
    }

    /// Closes passages on `coord` only, leaving the neighbours untouched.
    pub fn unlink_one_way(&mut self, coord: Coordinate, directions: Direction) {
        self.update(coord, directions, false, false);
    }

    fn update(&mut self, coord: Coordinate, directions: Direction, open: bool, bidirectional: bool) {
        if !self.is_in_bounds(coord) {
            return;
        }
        for direction in directions.iter() {
            let neighbor = direction.translate(coord);
            if !self.is_in_bounds(neighbor) {
                continue;
            }
            let idx = self.ravel_index(coord);
            self.data[idx].set(direction, open);
            if bidirectional {
                let idx = self.ravel_index(neighbor);
                self.data[idx].set(direction.opposite(), open);
            }
        }
    }

    /// Links a chain of moves starting at `start` and returns where the chain ends.
    pub fn link_path(&mut self, start: Coordinate, moves: &[Direction]) -> Coordinate {
        moves.iter().fold(start, |coord, &direction| {
            self.link(coord, direction);
            direction.translate(coord)
        })
    }

    /// Directions from `coord` that stay on the grid.
    pub fn valid_directions(&self, coord: Coordinate) -> Direction {
        if !self.is_in_bounds(coord) {
            return Direction::empty();
        }
        Direction::CARDINALS
            .into_iter()
            .filter(|direction| self.is_in_bounds(direction.translate(coord)))
            .collect()
    }

    /// Valid directions whose neighbour has no open passage at all, i.e. has not been
    /// carved into yet.
    pub fn available_directions(&self, coord: Coordinate) -> Direction {
        self.valid_directions(coord)
            .iter()
            .filter(|direction| self.get(direction.translate(coord)) == Some(Direction::empty()))
            .collect()
    }

    /// Iterates over every cell in row-major order, starting at the north-west corner.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Direction)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .zip(self.data.iter().copied())
    }

    /// Number of undirected open passages.
    pub fn passage_count(&self) -> usize {
        self.data
            .iter()
            .map(|cell| (*cell & (Direction::SOUTH | Direction::EAST)).bits().count_ones() as usize)
            .sum()
    }

    pub fn north_west_corner(&self) -> Coordinate {
        (0, 0)
    }

    pub fn north_east_corner(&self) -> Coordinate {
        (self.width.saturating_sub(1), 0)
    }

    pub fn south_west_corner(&self) -> Coordinate {
        (0, self.height.saturating_sub(1))
    }

    pub fn south_east_corner(&self) -> Coordinate {
        (self.width.saturating_sub(1), self.height.saturating_sub(1))
    }

    pub fn center(&self) -> Coordinate {
        (self.width / 2, self.height / 2)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TextRenderer::render_grid(self))
    }
}
