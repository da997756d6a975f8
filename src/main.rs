//! Polygo: Go rules on arbitrary board graphs.
//!
//! ## Usage
//!
//! - `polygo` - Show a demo
//! - `polygo replay --settings game.json --moves moves.json` - Rebuild a position
//! - `polygo score --settings game.json --moves moves.json` - Score a finished game
//! - `polygo selfplay --settings game.json` - Generate a random game
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` or `-v`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use polygo::board::Color;
use polygo::chooser::{RandomMover, play_engine_turns, self_play};
use polygo::constants::{MAX_ENGINE_PLAYS, SELFPLAY_MOVES};
use polygo::moves::{Play, replay_to};
use polygo::position::Position;
use polygo::scoring::{DeadGroups, ScoringSession};
use polygo::settings::{BoardType, GameSettings};

/// Polygo: Go rules engine for grids, stars, hexagons and more
#[derive(Parser)]
#[command(name = "polygo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a short demo of captures and scoring
    Demo,
    /// Rebuild a position from settings and a move log
    Replay {
        /// Game settings (JSON)
        #[arg(long)]
        settings: PathBuf,
        /// Move log (JSON array of {"i", "c"} entries)
        #[arg(long)]
        moves: PathBuf,
        /// Only replay the first N entries
        #[arg(long)]
        upto: Option<usize>,
        /// Play any pending engine-owned turns and print them
        #[arg(long)]
        engine: bool,
    },
    /// Score the position reached by a move log
    Score {
        #[arg(long)]
        settings: PathBuf,
        #[arg(long)]
        moves: PathBuf,
        /// Dead flags (JSON object of representative -> bool)
        #[arg(long)]
        dead: Option<PathBuf>,
    },
    /// Play random moves and print the resulting move log
    Selfplay {
        #[arg(long)]
        settings: PathBuf,
        /// Number of plays to make
        #[arg(long, default_value_t = SELFPLAY_MOVES)]
        moves: usize,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Replay {
            settings,
            moves,
            upto,
            engine,
        }) => run_replay(&settings, &moves, upto, engine),
        Some(Commands::Score {
            settings,
            moves,
            dead,
        }) => run_score(&settings, &moves, dead.as_deref()),
        Some(Commands::Selfplay {
            settings,
            moves,
            seed,
        }) => run_selfplay(&settings, moves, seed),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_game(settings: &Path, moves: &Path, upto: Option<usize>) -> Result<Position> {
    let settings: GameSettings = read_json(settings)?;
    let plays: Vec<Play> = read_json(moves)?;
    let n = upto.unwrap_or(plays.len());
    replay_to(&settings, &plays, n).context("building the game from its settings")
}

fn print_scores(session: &ScoringSession, position: &Position) {
    let board = position.board();
    let Some(territory) = session.territory(board) else {
        return;
    };
    for (color, points) in territory.scores() {
        println!("{color}: {points}");
    }
    println!("neutral: {}", territory.neutral_count());
}

fn run_replay(settings: &Path, moves: &Path, upto: Option<usize>, engine: bool) -> Result<()> {
    let mut position = load_game(settings, moves, upto)?;

    if engine {
        let mut mover = RandomMover::new();
        let plays = play_engine_turns(&mut position, &mut mover, MAX_ENGINE_PLAYS);
        println!("{}", serde_json::to_string(&plays)?);
    }

    println!("{}", position.board());
    println!("Move {}: {}", position.move_number(), position.current_move());
    Ok(())
}

fn run_score(settings: &Path, moves: &Path, dead: Option<&Path>) -> Result<()> {
    let position = load_game(settings, moves, None)?;
    let dead: DeadGroups = match dead {
        Some(path) => read_json(path)?,
        None => DeadGroups::new(),
    };

    let session = ScoringSession::with_dead(position.board(), dead);
    println!("{}", position.board());
    print_scores(&session, &position);
    Ok(())
}

fn run_selfplay(settings: &Path, moves: usize, seed: Option<u64>) -> Result<()> {
    let settings: GameSettings = read_json(settings)?;
    let mut position = Position::from_settings(&settings).context("invalid game settings")?;
    let mut mover = match seed {
        Some(seed) => RandomMover::with_seed(seed),
        None => RandomMover::new(),
    }
    .avoid_self_atari(true);

    let plays = self_play(&mut position, &mut mover, moves);
    println!("{}", serde_json::to_string(&plays)?);
    eprintln!("{}", position.board());
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Polygo: Go on arbitrary boards\n");

    println!("=== Capture on 9x9 ===");
    let settings = GameSettings::default();
    let mut pos = Position::from_settings(&settings)?;
    // White at (4,4) = 40, black around it.
    for (index, color) in [
        (31, Color::Black),
        (40, Color::White),
        (39, Color::Black),
        (0, Color::White),
        (41, Color::Black),
        (1, Color::White),
    ] {
        pos.place(index, color);
    }
    let result = pos.place(49, Color::Black);
    println!("Black at 49: {result:?}");
    println!("{}", pos.board());

    println!("=== Three colors on a hexagon ===");
    let settings = GameSettings::new(BoardType::Hexagon, 4).with_turn_cycle("B,W,R");
    let mut pos = Position::from_settings(&settings)?;
    let mut mover = RandomMover::with_seed(1).avoid_self_atari(true);
    self_play(&mut pos, &mut mover, 12);
    println!("{}", pos.board());
    let session = ScoringSession::open(pos.board());
    print_scores(&session, &pos);
    Ok(())
}
