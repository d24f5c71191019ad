use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use xiangqi::rules::Board;

/// Plays a game of Xiangqi through commands sent to the standard input. Log
/// messages are written to the standard error.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Frame of the board to start from instead of the standard setup.
    #[arg(long, conflicts_with = "frame_file")]
    frame: Option<String>,
    /// Path to a file with the frame to start from.
    #[arg(long)]
    frame_file: Option<PathBuf>,
    /// Verbosity of the log. `RUST_LOG` takes precedence.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
    /// Do not print the version banner on startup.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let frame = match (&args.frame, &args.frame_file) {
        (Some(frame), _) => Some(frame.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading the frame from {}", path.display()))?,
        ),
        (None, None) => None,
    };
    let board = match frame {
        Some(frame) => Board::try_from(frame.as_str()).context("parsing the starting frame")?,
        None => Board::starting(),
    };
    // Only a board with both Generals on record can be played on.
    let _ = board.winner().context("checking the starting frame")?;

    if !args.quiet {
        xiangqi::print_engine_info();
        xiangqi::print_binary_info();
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = xiangqi::Engine::with_board(board, &mut input, &mut output);
    engine.run()
}
