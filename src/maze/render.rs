use super::{Coordinate, Direction, DistanceMap, Grid};

const BASE_36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Single character used to show a distance inside a cell; `!` once the digits run out.
pub fn distance_glyph(distance: u32) -> char {
    BASE_36
        .get(distance as usize)
        .map(|&b| b as char)
        .unwrap_or('!')
}

/// Plain-text box drawing of a grid:
///
/// ```text
/// +---+---+
/// |       |
/// +   +---+
/// |       |
/// +---+---+
/// ```
pub struct TextRenderer<'a> {
    grid: &'a Grid,
    distances: Option<&'a DistanceMap>,
}

impl<'a> TextRenderer<'a> {
    pub fn new(grid: &'a Grid, distances: Option<&'a DistanceMap>) -> Self {
        TextRenderer { grid, distances }
    }

    pub fn render_grid(grid: &Grid) -> String {
        TextRenderer::new(grid, None).render()
    }

    pub fn render_with_distances(grid: &Grid, distances: &DistanceMap) -> String {
        TextRenderer::new(grid, Some(distances)).render()
    }

    pub fn render(&self) -> String {
        let width = self.grid.width() as usize;
        let mut output = format!("+{}\n", "---+".repeat(width));
        let mut top = String::new();
        let mut bottom = String::new();
        for (coord, linked) in self.grid.iter() {
            if coord.0 == 0 {
                top = "|".to_string();
                bottom = "+".to_string();
            }
            top.push(' ');
            top.push(self.contents_of(coord));
            top.push(' ');
            top.push(if linked.contains(Direction::EAST) { ' ' } else { '|' });
            bottom.push_str(if linked.contains(Direction::SOUTH) {
                "   +"
            } else {
                "---+"
            });
            if coord.0 as usize == width - 1 {
                output.push_str(&top);
                output.push('\n');
                output.push_str(&bottom);
                output.push('\n');
            }
        }
        output
    }

    fn contents_of(&self, coord: Coordinate) -> char {
        self.distances
            .and_then(|distances| distances.get(coord).ok().flatten())
            .map(distance_glyph)
            .unwrap_or(' ')
    }
}
