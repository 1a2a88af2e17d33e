mod renderer;

use std::{io::Stdout, time::Duration};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    execute,
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::{Frame, Renderer},
    generators::{MazeGenerator, MazeOptions},
    maze::Coordinate,
    solvers::DistanceSweep,
    state::MazeStepper,
};

/// What the viewer is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Distances,
    Done,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Generating => write!(f, "Generating"),
            Phase::Distances => write!(f, "Distances"),
            Phase::Done => write!(f, "Done"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// The phase played to its end
    Finished,
    /// The user asked to leave
    Exit,
}

/// Fixed facts about the session shown in every frame.
struct Session {
    label: String,
    end: Coordinate,
}

/// Playback settings that survive from one phase to the next.
#[derive(Debug, Clone, Copy)]
struct Playback {
    paused: bool,
    /// Time between two automatic steps
    delay: Duration,
}

pub struct App {
    /// How long to wait for input while paused, a.k.a. how often the frame is refreshed
    input_poll_timeout: Duration,
    /// Delay between automatic steps when the viewer starts
    initial_delay: Duration,
    /// Fastest and slowest autoplay
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(100),
            initial_delay: Duration::from_millis(50),
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1000),
        }
    }
}

impl App {
    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Plays a generation session: carving, then the distance sweep from the start, then
    /// the path from start to end. The terminal must already be set up.
    pub fn run(&self, stdout: &mut Stdout, options: MazeOptions) -> std::io::Result<()> {
        if !Renderer::check_size(stdout, options.width, options.height)? {
            return App::wait_for_esc();
        }
        execute!(stdout, terminal::Clear(ClearType::All))?;

        let generator = MazeGenerator::new(options).map_err(std::io::Error::other)?;
        let seed = generator.seed();
        let options = generator.options().clone();
        let mut playback = Playback {
            paused: false,
            delay: self.initial_delay,
        };
        let session = Session {
            label: format!("{} (seed {})", options.algorithm, seed),
            end: options.end,
        };

        let mut stepper = generator.make_stepper();
        tracing::info!("[viewer] phase {}", Phase::Generating);
        let flow = self.play(stdout, &mut stepper, Phase::Generating, &mut playback, &session)?;
        if flow == Flow::Exit {
            return Ok(());
        }

        let mut stepper = MazeStepper::new(stepper.into_state(), DistanceSweep::new());
        tracing::info!("[viewer] phase {}", Phase::Distances);
        let flow = self.play(stdout, &mut stepper, Phase::Distances, &mut playback, &session)?;
        if flow == Flow::Exit {
            return Ok(());
        }

        let state = stepper.into_state();
        let path = state
            .distances()
            .path_to(state.grid(), options.end)
            .map_err(std::io::Error::other)?;
        tracing::info!(
            "[viewer] phase {}, path of {} cells",
            Phase::Done,
            path.reached()
        );
        let frame = Frame {
            state: &state,
            phase: Phase::Done,
            path: Some(&path),
            end: session.end,
            status: App::status_line(Phase::Done, &session.label, path.reached(), &playback),
        };
        Renderer::draw(stdout, &frame)?;
        App::wait_for_esc()
    }

    /// Steps `stepper` until its source is exhausted, following the keys pressed.
    fn play(
        &self,
        stdout: &mut Stdout,
        stepper: &mut MazeStepper,
        phase: Phase,
        playback: &mut Playback,
        session: &Session,
    ) -> std::io::Result<Flow> {
        loop {
            let frame = Frame {
                state: stepper.state(),
                phase,
                path: None,
                end: session.end,
                status: App::status_line(phase, &session.label, stepper.position(), playback),
            };
            Renderer::draw(stdout, &frame)?;

            let timeout = if playback.paused {
                self.input_poll_timeout
            } else {
                playback.delay
            };
            if event::poll(timeout)? {
                let event::Event::Key(key_event) = event::read()? else {
                    // Resizes only need a redraw
                    continue;
                };
                if key_event.kind != event::KeyEventKind::Press {
                    continue;
                }
                tracing::debug!("[viewer] key {:?} in phase {}", key_event.code, phase);
                match key_event.code {
                    KeyCode::Esc => return Ok(Flow::Exit),
                    KeyCode::Enter => playback.paused = !playback.paused,
                    KeyCode::Right if playback.paused => {
                        if !stepper.try_step_forward().map_err(std::io::Error::other)? {
                            return Ok(Flow::Finished);
                        }
                    }
                    KeyCode::Left if playback.paused => {
                        stepper
                            .try_step_backward()
                            .map_err(std::io::Error::other)?;
                    }
                    KeyCode::Up => playback.delay = (playback.delay / 2).max(self.min_delay),
                    KeyCode::Down => playback.delay = (playback.delay * 2).min(self.max_delay),
                    KeyCode::Char('f') => {
                        while stepper.try_step_forward().map_err(std::io::Error::other)? {}
                        return Ok(Flow::Finished);
                    }
                    _ => {}
                }
                continue;
            }

            if !playback.paused && !stepper.try_step_forward().map_err(std::io::Error::other)? {
                return Ok(Flow::Finished);
            }
        }
    }

    fn status_line(phase: Phase, label: &str, position: usize, playback: &Playback) -> String {
        let mode = if playback.paused { "paused" } else { "playing" };
        format!(
            "{phase}: {label}, step {position}, {mode}, {}ms per step",
            playback.delay.as_millis()
        )
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let playback = Playback {
            paused: true,
            delay: Duration::from_millis(40),
        };
        assert_eq!(
            App::status_line(Phase::Distances, "Sidewinder (seed 7)", 12, &playback),
            "Distances: Sidewinder (seed 7), step 12, paused, 40ms per step"
        );
    }

    #[test]
    fn test_default_delays_are_ordered() {
        let app = App::default();
        assert!(app.min_delay <= app.initial_delay);
        assert!(app.initial_delay <= app.max_delay);
    }
}
