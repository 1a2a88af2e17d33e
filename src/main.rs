use mazestep::{
    app::App,
    generators::{AlgorithmKind, MazeOptions, generate_maze},
    maze::TextRenderer,
};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

const USAGE: &str = "Usage: mazestep <width> <height> \
[--algorithm binary-tree|sidewinder|recursive-backtracker] [--seed N] [--view]";
const LOG_FILE: &str = "mazestep.log";

struct Args {
    options: MazeOptions,
    view: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut dims = Vec::new();
    let mut algorithm = AlgorithmKind::default();
    let mut seed = None;
    let mut view = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--algorithm" => {
                let name = args.next().ok_or("--algorithm needs a value")?;
                algorithm = name.parse().map_err(|e| format!("{e}"))?;
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed {value:?}"))?,
                );
            }
            "--view" => view = true,
            _ => dims.push(
                arg.parse::<u16>()
                    .map_err(|_| format!("invalid dimension {arg:?}"))?,
            ),
        }
    }

    let [width, height] = dims[..] else {
        return Err("expected a width and a height".to_string());
    };
    let mut options = MazeOptions::new(width, height).with_algorithm(algorithm);
    options.seed = seed;
    options.validate().map_err(|e| format!("{e}"))?;
    Ok(Args { options, view })
}

/// Where log lines go: a file in `directory` while the viewer owns the terminal,
/// stderr otherwise. The guard must live until the program exits.
fn log_writer(view: bool, directory: &Path) -> (BoxMakeWriter, Option<WorkerGuard>) {
    if view {
        let file_appender = tracing_appender::rolling::never(directory, LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        (BoxMakeWriter::new(writer), Some(guard))
    } else {
        (BoxMakeWriter::new(std::io::stderr), None)
    }
}

fn main() -> std::io::Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return Ok(());
        }
    };

    let (writer, _guard) = log_writer(args.view, Path::new("."));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("MAZESTEP_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if args.view {
        let app = App::default();
        let mut stdout = std::io::stdout();
        App::setup_terminal(&mut stdout)?;
        let result = app.run(&mut stdout, args.options);
        App::restore_terminal(&mut stdout)?;
        return result;
    }

    let maze = generate_maze(args.options).map_err(std::io::Error::other)?;
    print!("{}", TextRenderer::render_grid(maze.grid()));
    println!("Seed: {}", maze.seed);
    Ok(())
}
