use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::Phase,
    maze::{Coordinate, Direction, DistanceMap, render::distance_glyph},
    state::MazeState,
};

/// What the renderer needs to draw one frame.
pub struct Frame<'a> {
    pub state: &'a MazeState,
    pub phase: Phase,
    /// Path from start to end, once it is known
    pub path: Option<&'a DistanceMap>,
    pub end: Coordinate,
    pub status: String,
}

/// Draws the maze with box-drawing text: every cell is three columns wide and walls sit
/// on their own rows and columns.
pub struct Renderer;

impl Renderer {
    /// Rows kept below the maze for the status lines
    pub const NUM_STATUS_ROWS: u16 = 3;
    pub const CELL_WIDTH: u16 = 4;

    /// Terminal size needed to show a `width` x `height` maze and its status lines.
    pub fn required_size(width: u16, height: u16) -> (u16, u16) {
        (
            width.saturating_mul(Renderer::CELL_WIDTH).saturating_add(1),
            height
                .saturating_mul(2)
                .saturating_add(1)
                .saturating_add(Renderer::NUM_STATUS_ROWS),
        )
    }

    /// Check if terminal size is sufficient for the given maze dimensions.
    /// If not, tell the user how large it has to be and return Ok(false).
    pub fn check_size(stdout: &mut Stdout, width: u16, height: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let (needed_width, needed_height) = Renderer::required_size(width, height);
        if term_width >= needed_width && term_height >= needed_height {
            return Ok(true);
        }
        let msg = format!(
            "Terminal size is too small ({}x{}) for a {}x{} maze, it needs to be at least {}x{}.\r\n",
            term_width, term_height, width, height, needed_width, needed_height
        );
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        stdout.flush()?;
        Ok(false)
    }

    pub fn draw(stdout: &mut Stdout, frame: &Frame) -> std::io::Result<()> {
        let grid = frame.state.grid();
        let width = grid.width() as usize;
        stdout.queue(cursor::MoveTo(0, 0))?;
        stdout.queue(style::Print(format!("+{}", "---+".repeat(width))))?;

        let mut row = 1;
        for (coord, linked) in grid.iter() {
            if coord.0 == 0 {
                queue!(stdout, cursor::MoveTo(0, row), style::Print("|"))?;
            }
            stdout.queue(style::PrintStyledContent(Renderer::cell(frame, coord)))?;
            stdout.queue(style::Print(if linked.contains(Direction::EAST) {
                " "
            } else {
                "|"
            }))?;

            if coord.0 as usize == width - 1 {
                let bottom = (0..grid.width())
                    .map(|x| {
                        let open = grid
                            .get((x, coord.1))
                            .is_some_and(|cell| cell.contains(Direction::SOUTH));
                        if open { "   +" } else { "---+" }
                    })
                    .collect::<String>();
                queue!(
                    stdout,
                    cursor::MoveTo(0, row + 1),
                    style::Print(format!("+{bottom}"))
                )?;
                row += 2;
            }
        }

        queue!(
            stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(
                frame
                    .status
                    .as_str()
                    .with(Color::Green)
                    .attribute(Attribute::Bold)
            ),
            cursor::MoveTo(0, row + 1),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(
                "Enter: pause/resume  ←/→: step when paused  ↑/↓: speed  f: finish phase  Esc: exit"
                    .with(Color::Cyan)
            ),
        )?;
        stdout.flush()
    }

    /// The three columns of a cell body, coloured by what the algorithm is doing there.
    fn cell(frame: &Frame, coord: Coordinate) -> style::StyledContent<String> {
        let state = frame.state;
        let on_path = frame
            .path
            .and_then(|path| path.get(coord).ok().flatten());
        let distance = state.distances().get(coord).ok().flatten();

        let glyph = on_path.or(distance).map(distance_glyph).unwrap_or(' ');
        let mut body = format!(" {glyph} ").with(Color::White);

        let background = if on_path.is_some() {
            Some(Color::DarkGreen)
        } else if state.run().last() == Some(&coord) {
            Some(Color::Red)
        } else if state.run().contains(&coord) {
            Some(Color::DarkYellow)
        } else if state.target_coordinates().contains(&coord) {
            Some(Color::Blue)
        } else if coord == state.start() || coord == frame.end {
            Some(Color::DarkMagenta)
        } else {
            None
        };
        if let Some(color) = background {
            body = body.on(color);
        }
        if frame.phase == Phase::Distances && distance.is_some() && background.is_none() {
            body = body.with(Color::Grey);
        }
        body
    }
}
