use bitflags::bitflags;

use crate::maze::Coordinate;

bitflags! {
    /// A set of cardinal directions.
    ///
    /// In a [`Grid`](crate::maze::Grid) each cell stores the directions in which it has
    /// an open passage. North is towards `y = 0`, west is towards `x = 0`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Direction: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
    }
}

impl Direction {
    /// The cardinal directions in the order random choices index into them.
    pub const CARDINALS: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];

    /// Mirrors every direction in the set: north <-> south, east <-> west.
    pub fn opposite(self) -> Direction {
        let mut opposite = Direction::empty();
        if self.contains(Direction::NORTH) {
            opposite |= Direction::SOUTH;
        }
        if self.contains(Direction::SOUTH) {
            opposite |= Direction::NORTH;
        }
        if self.contains(Direction::EAST) {
            opposite |= Direction::WEST;
        }
        if self.contains(Direction::WEST) {
            opposite |= Direction::EAST;
        }
        opposite
    }

    /// Sum of the unit offsets of every direction in the set.
    pub fn delta(self) -> (i32, i32) {
        let mut delta = (0, 0);
        if self.contains(Direction::NORTH) {
            delta.1 -= 1;
        }
        if self.contains(Direction::SOUTH) {
            delta.1 += 1;
        }
        if self.contains(Direction::EAST) {
            delta.0 += 1;
        }
        if self.contains(Direction::WEST) {
            delta.0 -= 1;
        }
        delta
    }

    /// Moves `coordinate` one cell along every direction in the set.
    ///
    /// Steps off the low edge (or past `u16::MAX`) land on `u16::MAX`, which is never
    /// a valid index since dimensions are at most `u16::MAX`. Callers rely on the
    /// bounds check of the grid to filter those out.
    pub fn translate(self, coordinate: Coordinate) -> Coordinate {
        let (dx, dy) = self.delta();
        let shift =
            |value: u16, delta: i32| u16::try_from(i32::from(value) + delta).unwrap_or(u16::MAX);
        (shift(coordinate.0, dx), shift(coordinate.1, dy))
    }

    /// Short label used in logs and text output.
    pub fn label(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        Direction::CARDINALS
            .iter()
            .zip(["N", "S", "E", "W"])
            .filter(|(direction, _)| self.contains(**direction))
            .map(|(_, label)| label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_direction() {
        let empty = Direction::empty();
        assert!(!empty.contains(Direction::NORTH));
        assert!(!empty.contains(Direction::SOUTH));
        assert!(!empty.contains(Direction::EAST));
        assert!(!empty.contains(Direction::WEST));
        assert_eq!(empty.bits(), 0);
    }

    #[test]
    fn test_combined_directions() {
        let d = Direction::NORTH | Direction::EAST;
        assert!(d.contains(Direction::NORTH));
        assert!(d.contains(Direction::EAST));
        assert!(!d.contains(Direction::SOUTH));
        assert!(!d.contains(Direction::WEST));
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::NORTH.opposite(), Direction::SOUTH);
        assert_eq!(Direction::SOUTH.opposite(), Direction::NORTH);
        assert_eq!(Direction::EAST.opposite(), Direction::WEST);
        assert_eq!(Direction::WEST.opposite(), Direction::EAST);
        assert_eq!(
            (Direction::NORTH | Direction::EAST).opposite(),
            Direction::SOUTH | Direction::WEST
        );
        assert_eq!(Direction::empty().opposite(), Direction::empty());
    }

    #[test]
    fn test_translate() {
        assert_eq!(Direction::NORTH.translate((2, 2)), (2, 1));
        assert_eq!(Direction::SOUTH.translate((2, 2)), (2, 3));
        assert_eq!(Direction::EAST.translate((2, 2)), (3, 2));
        assert_eq!(Direction::WEST.translate((2, 2)), (1, 2));
        assert_eq!((Direction::NORTH | Direction::WEST).translate((2, 2)), (1, 1));
    }

    #[test]
    fn test_translate_off_the_edge() {
        assert_eq!(Direction::NORTH.translate((0, 0)), (0, u16::MAX));
        assert_eq!(Direction::WEST.translate((0, 3)), (u16::MAX, 3));
        assert_eq!(Direction::EAST.translate((u16::MAX, 0)), (u16::MAX, 0));
    }

    #[test]
    fn test_complement() {
        assert_eq!(Direction::empty().complement(), Direction::all());
        assert_eq!(Direction::all().complement(), Direction::empty());
        assert_eq!(
            Direction::NORTH.complement(),
            Direction::SOUTH | Direction::EAST | Direction::WEST
        );
    }

    #[test]
    fn test_iteration_order() {
        let order = Direction::all().iter().collect::<Vec<_>>();
        assert_eq!(order, Direction::CARDINALS.to_vec());
        assert_eq!((Direction::WEST | Direction::SOUTH).label(), "SW");
    }
}
