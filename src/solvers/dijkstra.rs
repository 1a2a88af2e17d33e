use crate::{
    error::{MazeError, Result},
    maze::{Coordinate, DistanceMap, Grid},
};

impl DistanceMap {
    /// Breadth-first distances from `root`, following open passages only.
    ///
    /// Cells that cannot be reached stay unset. The maximum is the first cell found at
    /// the largest distance.
    pub fn from_root(grid: &Grid, root: Coordinate) -> Result<DistanceMap> {
        let mut distances = DistanceMap::new(grid.width(), grid.height(), root);
        distances.set(root, 0)?;
        let mut frontier = vec![root];
        let mut distance = 0;

        while !frontier.is_empty() {
            distance += 1;
            let mut next_frontier = Vec::new();
            for current in frontier {
                let linked = grid.get(current).unwrap_or_default();
                for direction in linked.iter() {
                    let next = direction.translate(current);
                    if distances.get(next)?.is_some() {
                        continue;
                    }
                    distances.set(next, distance)?;
                    next_frontier.push(next);
                }
            }
            frontier = next_frontier;
        }
        Ok(distances)
    }

    /// The path from the root to `goal`, as a map holding only the cells on the path with
    /// their distance from the root.
    ///
    /// Walks back from `goal` through linked neighbours with a smaller distance. If
    /// `goal` was never reached the returned map is empty.
    pub fn path_to(&self, grid: &Grid, goal: Coordinate) -> Result<DistanceMap> {
        let mut path = DistanceMap::new(self.width(), self.height(), self.root());
        let Some(mut distance) = self.get(goal)? else {
            return Ok(path);
        };

        let mut current = goal;
        path.set(current, distance)?;
        while current != self.root() {
            let linked = grid.get(current).unwrap_or_default();
            let closer = linked.iter().map(|d| d.translate(current)).find_map(|next| {
                match self.get(next) {
                    Ok(Some(d)) if d < distance => Some((next, d)),
                    _ => None,
                }
            });
            let Some((next, d)) = closer else {
                break;
            };
            path.set(next, d)?;
            current = next;
            distance = d;
        }
        Ok(path)
    }
}

/// One of the longest paths of a perfect maze, found with two breadth-first sweeps: the
/// cell farthest from the north-west corner is one end of the path, and the cell farthest
/// from that is the other. The returned map is rooted at the first end.
pub fn longest_path(grid: &Grid) -> Result<DistanceMap> {
    if grid.is_empty() {
        return Err(MazeError::InvalidDimensions {
            width: grid.width(),
            height: grid.height(),
        });
    }
    let first = DistanceMap::from_root(grid, grid.north_west_corner())?;
    let root = first.max_coordinate().unwrap_or(first.root());
    let distances = DistanceMap::from_root(grid, root)?;
    let goal = distances.max_coordinate().unwrap_or(root);
    distances.path_to(grid, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, TextRenderer};

    const N: Direction = Direction::NORTH;
    const S: Direction = Direction::SOUTH;
    const E: Direction = Direction::EAST;
    const W: Direction = Direction::WEST;

    fn make_grid() -> Grid {
        let mut grid = Grid::new(4, 4);
        assert_eq!(grid.link_path((0, 0), &[E, E, S, W, S]), (1, 2));
        assert_eq!(grid.link_path((1, 2), &[W, N]), (0, 1));
        assert_eq!(grid.link_path((0, 2), &[S]), (0, 3));
        assert_eq!(grid.link_path((1, 2), &[E]), (2, 2));
        assert_eq!(grid.link_path((2, 2), &[E, N, N]), (3, 0));
        assert_eq!(grid.link_path((2, 2), &[S]), (2, 3));
        assert_eq!(grid.link_path((2, 3), &[E]), (3, 3));
        assert_eq!(grid.link_path((2, 3), &[W]), (1, 3));

        let expected = "\
+---+---+---+---+
|           |   |
+---+---+   +   +
|   |       |   |
+   +   +---+   +
|               |
+   +---+   +---+
|   |           |
+---+---+---+---+
";
        assert_eq!(TextRenderer::render_grid(&grid), expected);
        grid
    }

    fn assert_table(distances: &DistanceMap, expected: [[Option<u32>; 4]; 4]) {
        for (y, row) in expected.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                assert_eq!(distances[(x as u16, y as u16)], value, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_from_root() {
        let grid = make_grid();
        let distances = DistanceMap::from_root(&grid, (0, 0)).unwrap();
        let expected = [[0, 1, 2, 9], [7, 4, 3, 8], [6, 5, 6, 7], [7, 8, 7, 8]];
        assert_table(&distances, expected.map(|row| row.map(Some)));
        assert_eq!(distances.max_distance(), Some(9));
        assert_eq!(distances.max_coordinate(), Some((3, 0)));
        assert_eq!(distances.root(), (0, 0));
    }

    #[test]
    fn test_path_to() {
        let grid = make_grid();
        let distances = DistanceMap::from_root(&grid, (0, 0)).unwrap();
        let path = distances.path_to(&grid, (3, 3)).unwrap();
        let expected = [
            [Some(0), Some(1), Some(2), None],
            [None, Some(4), Some(3), None],
            [None, Some(5), Some(6), None],
            [None, None, Some(7), Some(8)],
        ];
        assert_table(&path, expected);
        assert_eq!(path.reached(), 9);
    }

    #[test]
    fn test_path_to_root() {
        let grid = make_grid();
        let distances = DistanceMap::from_root(&grid, (2, 2)).unwrap();
        let path = distances.path_to(&grid, (2, 2)).unwrap();
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![((2, 2), 0)]);
    }

    #[test]
    fn test_unreachable_cells() {
        let mut grid = Grid::new(3, 1);
        grid.link((0, 0), E);
        let distances = DistanceMap::from_root(&grid, (0, 0)).unwrap();
        assert_eq!(distances[(1, 0)], Some(1));
        assert_eq!(distances[(2, 0)], None);
        assert_eq!(distances.path_to(&grid, (2, 0)).unwrap().reached(), 0);
        assert!(distances.path_to(&grid, (3, 0)).is_err());
        assert!(DistanceMap::from_root(&grid, (0, 1)).is_err());
    }

    #[test]
    fn test_longest_path() {
        let grid = make_grid();
        let path = longest_path(&grid).unwrap();
        // The two ends of the maze are the north-west and north-east corners
        assert_eq!(path.root(), (3, 0));
        assert_eq!(path.max(), Some(((0, 0), 9)));
        assert_eq!(path.reached(), 10);
        assert_eq!(path[(3, 0)], Some(0));
        assert_eq!(path[(2, 2)], Some(3));
        assert_eq!(path[(2, 3)], None);
    }

    #[test]
    fn test_longest_path_single_cell() {
        let path = longest_path(&Grid::new(1, 1)).unwrap();
        assert_eq!(path.max(), Some(((0, 0), 0)));
        assert!(longest_path(&Grid::new(0, 3)).is_err());
    }
}
