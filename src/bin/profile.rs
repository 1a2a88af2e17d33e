use std::time::Instant;

use mazestep::{
    generators::{AlgorithmKind, MazeGenerator, MazeOptions},
    solvers::DistanceSweep,
    state::MazeStepper,
};

/// Steps every algorithm through a large maze, forward and back, then sweeps its
/// distances. Meant to be run under a profiler.
fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let size = u16::from(u8::MAX);

    for kind in AlgorithmKind::ALL {
        let started = Instant::now();
        for iteration in 0..num_iters {
            let options = MazeOptions::new(size, size)
                .with_algorithm(kind)
                .with_seed(iteration as u64);
            let mut stepper = MazeGenerator::new(options)
                .map_err(std::io::Error::other)?
                .make_stepper();
            stepper.step_forward_until_end();
            stepper.step_backward_until_end();
            stepper.step_forward_until_end();

            let mut sweep = MazeStepper::new(stepper.into_state(), DistanceSweep::new());
            sweep.step_forward_until_end();
        }
        println!("{kind}: {:?} for {num_iters} iteration(s)", started.elapsed());
    }
    Ok(())
}
