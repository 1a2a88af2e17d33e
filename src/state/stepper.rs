use super::{Emission, MazeState, Operation, Step};
use crate::error::Result;

/// A resumable procedure that produces the operations of a generation (or solving)
/// algorithm one at a time.
///
/// The driver applies every operation to `state` before asking for the next one, so an
/// implementation always observes the effects of everything it emitted before. It must
/// only read the state; randomness is consumed while producing operations, never when
/// they are replayed.
pub trait Algorithm {
    /// Next operation or step boundary, `None` once the algorithm is finished.
    fn next_emission(&mut self, state: &MazeState) -> Option<Emission>;
}

impl<A: Algorithm + ?Sized> Algorithm for Box<A> {
    fn next_emission(&mut self, state: &MazeState) -> Option<Emission> {
        (**self).next_emission(state)
    }
}

/// A producer of whole steps. It mutates the state through the recording helpers of
/// [`MazeState`] and returns [`MazeState::pop_maze_step`].
pub trait StepSource {
    fn next_step(&mut self, state: &mut MazeState) -> Result<Option<Step>>;
}

enum Source {
    Operations(Box<dyn Algorithm>),
    Steps(Box<dyn StepSource>),
}

/// Drives a source forward and backward one step at a time.
///
/// Steps already taken live on the backward stack. Steps that were undone live on the
/// forward stack and are replayed from there instead of asking the source again, so the
/// source only ever runs once per step.
pub struct MazeStepper {
    state: MazeState,
    source: Source,
    source_done: bool,
    /// Applied steps, most recent last
    backward_steps: Vec<Step>,
    /// Undone steps, next one to replay last
    forward_steps: Vec<Step>,
}

impl MazeStepper {
    pub fn new(state: MazeState, algorithm: impl Algorithm + 'static) -> Self {
        MazeStepper::with_source(state, Source::Operations(Box::new(algorithm)))
    }

    pub fn from_steps(state: MazeState, steps: impl StepSource + 'static) -> Self {
        MazeStepper::with_source(state, Source::Steps(Box::new(steps)))
    }

    fn with_source(state: MazeState, source: Source) -> Self {
        MazeStepper {
            state,
            source,
            source_done: false,
            backward_steps: Vec::new(),
            forward_steps: Vec::new(),
        }
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    pub fn into_state(self) -> MazeState {
        self.state
    }

    /// Number of steps currently applied.
    pub fn position(&self) -> usize {
        self.backward_steps.len()
    }

    /// Number of undone steps that can be replayed without running the source.
    pub fn cached_ahead(&self) -> usize {
        self.forward_steps.len()
    }

    /// Whether the source has reported that it has no more steps.
    pub fn is_source_exhausted(&self) -> bool {
        self.source_done
    }

    /// Goes forward one step. Returns `false` at the end.
    ///
    /// # Panics
    /// If the source produces an operation that cannot be applied. That is a bug in the
    /// algorithm, see [`MazeStepper::try_step_forward`].
    pub fn step_forward(&mut self) -> bool {
        self.try_step_forward()
            .unwrap_or_else(|err| panic!("stepping forward failed: {err}"))
    }

    /// Goes back one step. Returns `false` at the start.
    ///
    /// # Panics
    /// If a recorded operation cannot be undone, see [`MazeStepper::try_step_backward`].
    pub fn step_backward(&mut self) -> bool {
        self.try_step_backward()
            .unwrap_or_else(|err| panic!("stepping backward failed: {err}"))
    }

    pub fn step_forward_until_end(&mut self) {
        while self.step_forward() {}
    }

    pub fn step_backward_until_end(&mut self) {
        while self.step_backward() {}
    }

    pub fn try_step_forward(&mut self) -> Result<bool> {
        if let Some(step) = self.forward_steps.pop() {
            self.apply_all(&step.forward)?;
            self.backward_steps.push(step);
            return Ok(true);
        }

        if self.source_done {
            return Ok(false);
        }
        let step = match &mut self.source {
            Source::Operations(algorithm) => {
                next_generated_step(algorithm.as_mut(), &mut self.state)?
            }
            Source::Steps(steps) => match steps.next_step(&mut self.state) {
                Ok(step) => step,
                Err(err) => {
                    // Undo whatever the source recorded before it failed
                    for inverse in self.state.pop_maze_step().backward {
                        self.state.apply_operation(inverse)?;
                    }
                    return Err(err);
                }
            },
        };
        match step {
            Some(step) => {
                self.backward_steps.push(step);
                Ok(true)
            }
            None => {
                tracing::debug!(
                    "[stepper] source exhausted after {} steps",
                    self.backward_steps.len()
                );
                self.source_done = true;
                Ok(false)
            }
        }
    }

    pub fn try_step_backward(&mut self) -> Result<bool> {
        let Some(step) = self.backward_steps.pop() else {
            return Ok(false);
        };
        self.apply_all(&step.backward)?;
        self.forward_steps.push(step);
        Ok(true)
    }

    fn apply_all(&mut self, operations: &[Operation]) -> Result<()> {
        for op in operations {
            self.state.apply_operation(op.clone())?;
        }
        Ok(())
    }
}

/// Pulls operations until the next step boundary, applying each one as it arrives.
///
/// Empty groups (consecutive boundaries) are skipped; `None` means the algorithm is
/// finished. If an operation fails, the part of the step already applied is rolled back.
fn next_generated_step(
    algorithm: &mut dyn Algorithm,
    state: &mut MazeState,
) -> Result<Option<Step>> {
    let mut step = Step::default();
    loop {
        match algorithm.next_emission(state) {
            Some(Emission::Operation(op)) => match state.apply_operation(op.clone()) {
                Ok(inverse) => {
                    step.forward.push(op);
                    step.backward.push(inverse);
                }
                Err(err) => {
                    for inverse in step.backward.into_iter().rev() {
                        state.apply_operation(inverse)?;
                    }
                    return Err(err);
                }
            },
            Some(Emission::StepBoundary) if step.is_empty() => continue,
            Some(Emission::StepBoundary) => break,
            None if step.is_empty() => return Ok(None),
            None => break,
        }
    }
    step.backward.reverse();
    Ok(Some(step))
}

/// Runs `algorithm` to completion directly on `state` without keeping any step.
/// Returns the number of non-empty steps that were applied.
pub fn run_to_end(algorithm: &mut dyn Algorithm, state: &mut MazeState) -> Result<usize> {
    let mut steps = 0;
    let mut ops_in_step = 0;
    while let Some(emission) = algorithm.next_emission(state) {
        match emission {
            Emission::Operation(op) => {
                state.apply_operation(op)?;
                ops_in_step += 1;
            }
            Emission::StepBoundary => {
                if ops_in_step > 0 {
                    steps += 1;
                }
                ops_in_step = 0;
            }
        }
    }
    if ops_in_step > 0 {
        steps += 1;
    }
    Ok(steps)
}
