//! CLI for maze solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::debug;
use maze_walker::endpoints::RandomEndpoints;
use maze_walker::playback::Playback;
use maze_walker::{Maze, Orientation, SolveType, WallFollower, WallLayout};

/// Walk out of a maze by keeping one hand on the wall
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Wall to follow: `left`, `right` or `recursive`
    #[arg(short, long, default_value = "left")]
    rule: SolveType,

    /// Initial facing of the walker (random with `--random-endpoints`, north otherwise)
    #[arg(long)]
    facing: Option<Orientation>,

    /// Ignore the `X` and `E` markers and pick start and end at random
    #[arg(long)]
    random_endpoints: bool,

    /// Random seed for `--random-endpoints`
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Display solution on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 20)]
    frame_length: u64,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print output
fn main() -> anyhow::Result<()> {
    if std::env::var("MAZE_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?
    };

    let mut maze = if args.random_endpoints {
        let layout = WallLayout::parse_ascii(&text)?;
        let mut endpoints = RandomEndpoints::new(args.seed);
        let (start, end) = endpoints.pick(&layout);
        let facing = args.facing.unwrap_or_else(|| endpoints.orientation());
        Maze::new(layout, start, end, facing)?
    } else {
        Maze::parse_ascii(&text, args.facing.unwrap_or(Orientation::North))?
    };
    debug!(
        "Walking from {} to {} facing {}",
        maze.start(),
        maze.end(),
        maze.orientation()
    );

    let playback = Playback::new(&maze);
    let solution = WallFollower::new(&mut maze, args.rule).solve(args.max_steps)?;

    if args.playback {
        playback.play(&solution, args.frame_length);
    }
    solution.print_report();
    Ok(())
}
