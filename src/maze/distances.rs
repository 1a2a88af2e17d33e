use crate::{
    error::{MazeError, Result},
    maze::Coordinate,
};

/// Distance of every cell from a root cell. `None` means the cell has not been reached.
///
/// Unlike [`Grid`](crate::maze::Grid), indexing outside the map is an error: coordinates
/// handed to a distance map are expected to have been validated already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    data: Box<[Option<u32>]>,
    width: u16,
    height: u16,
    root: Coordinate,
    /// Farthest cell seen so far and its distance
    max: Option<(Coordinate, u32)>,
}

impl DistanceMap {
    pub fn new(width: u16, height: u16, root: Coordinate) -> Self {
        DistanceMap {
            data: vec![None; width as usize * height as usize].into_boxed_slice(),
            width,
            height,
            root,
            max: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn root(&self) -> Coordinate {
        self.root
    }

    pub fn max(&self) -> Option<(Coordinate, u32)> {
        self.max
    }

    pub fn max_coordinate(&self) -> Option<Coordinate> {
        self.max.map(|(coord, _)| coord)
    }

    pub fn max_distance(&self) -> Option<u32> {
        self.max.map(|(_, distance)| distance)
    }

    pub fn is_in_bounds(&self, coord: Coordinate) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn checked_index(&self, coord: Coordinate) -> Result<usize> {
        if !self.is_in_bounds(coord) {
            return Err(MazeError::OutOfBounds {
                coordinate: coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord.1 as usize * self.width as usize + coord.0 as usize)
    }

    pub fn get(&self, coord: Coordinate) -> Result<Option<u32>> {
        let idx = self.checked_index(coord)?;
        Ok(self.data[idx])
    }

    /// Records `distance` at `coord` and raises the running maximum if it is exceeded.
    /// On a tie the earlier maximum is kept.
    pub fn set(&mut self, coord: Coordinate, distance: u32) -> Result<()> {
        let idx = self.checked_index(coord)?;
        self.data[idx] = Some(distance);
        if self.max.is_none_or(|(_, max)| distance > max) {
            self.max = Some((coord, distance));
        }
        Ok(())
    }

    /// Writes or clears the distance at `coord` without touching the running maximum.
    /// Returns the previous value.
    pub fn assign(&mut self, coord: Coordinate, distance: Option<u32>) -> Result<Option<u32>> {
        let idx = self.checked_index(coord)?;
        Ok(std::mem::replace(&mut self.data[idx], distance))
    }

    /// Overwrites the running maximum and returns the previous one.
    pub fn set_max(
        &mut self,
        max: Option<(Coordinate, u32)>,
    ) -> Result<Option<(Coordinate, u32)>> {
        if let Some((coord, _)) = max {
            self.checked_index(coord)?;
        }
        Ok(std::mem::replace(&mut self.max, max))
    }

    /// Iterates over every cell that has a distance, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, u32)> + '_ {
        let width = self.width as usize;
        self.data.iter().enumerate().filter_map(move |(idx, distance)| {
            distance.map(|d| (((idx % width) as u16, (idx / width) as u16), d))
        })
    }

    /// Number of cells that have been reached.
    pub fn reached(&self) -> usize {
        self.data.iter().filter(|d| d.is_some()).count()
    }
}

impl std::ops::Index<Coordinate> for DistanceMap {
    type Output = Option<u32>;

    /// # Panics
    /// If `index` is outside the map.
    fn index(&self, index: Coordinate) -> &Self::Output {
        match self.checked_index(index) {
            Ok(idx) => &self.data[idx],
            Err(err) => panic!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let distances = DistanceMap::new(3, 4, (0, 0));
        assert_eq!(distances.width(), 3);
        assert_eq!(distances.height(), 4);
        assert_eq!(distances.max(), None);
        for y in 0..4 {
            for x in 0..3 {
                assert_eq!(distances[(x, y)], None);
            }
        }
    }

    #[test]
    fn test_setting_distances() {
        let mut distances = DistanceMap::new(3, 3, (0, 0));
        distances.set((0, 1), 1).unwrap();
        distances.set((1, 1), 2).unwrap();
        assert_eq!(distances[(0, 1)], Some(1));
        assert_eq!(distances[(1, 1)], Some(2));
        assert_eq!(distances.reached(), 2);
        assert_eq!(distances.max(), Some(((1, 1), 2)));
    }

    #[test]
    fn test_max_keeps_first_on_tie() {
        let mut distances = DistanceMap::new(3, 3, (0, 0));
        distances.set((0, 0), 0).unwrap();
        distances.set((2, 0), 4).unwrap();
        distances.set((0, 2), 4).unwrap();
        distances.set((1, 1), 3).unwrap();
        assert_eq!(distances.max_coordinate(), Some((2, 0)));
        assert_eq!(distances.max_distance(), Some(4));
    }

    #[test]
    fn test_assign_leaves_max_alone() {
        let mut distances = DistanceMap::new(2, 2, (0, 0));
        assert_eq!(distances.assign((1, 1), Some(7)).unwrap(), None);
        assert_eq!(distances.max(), None);
        assert_eq!(distances.assign((1, 1), None).unwrap(), Some(7));
        assert_eq!(distances[(1, 1)], None);
        assert_eq!(distances.set_max(Some(((1, 0), 1))), Ok(None));
        assert_eq!(distances.set_max(None), Ok(Some(((1, 0), 1))));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut distances = DistanceMap::new(2, 2, (0, 0));
        let err = MazeError::OutOfBounds {
            coordinate: (2, 0),
            width: 2,
            height: 2,
        };
        assert_eq!(distances.get((2, 0)), Err(err.clone()));
        assert_eq!(distances.set((2, 0), 1), Err(err));
    }

    #[test]
    fn test_max_outside_the_map_is_an_error() {
        let mut distances = DistanceMap::new(2, 2, (0, 0));
        distances.set((1, 1), 2).unwrap();
        assert_eq!(
            distances.set_max(Some(((9, 9), 3))),
            Err(MazeError::OutOfBounds {
                coordinate: (9, 9),
                width: 2,
                height: 2,
            })
        );
        assert_eq!(distances.max(), Some(((1, 1), 2)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let distances = DistanceMap::new(2, 2, (0, 0));
        let _ = distances[(0, 2)];
    }
}
