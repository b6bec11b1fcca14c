//! Command-line interface for gridmatch.

use clap::Parser;
use gridmatch::ScoreResetPolicy;

/// Gridmatch - timed tic-tac-toe for two players at one console
#[derive(Parser, Debug)]
#[command(name = "gridmatch")]
#[command(about = "Timed N×N tic-tac-toe with a running score", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML match config
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Board size (3 to 5); overrides the config file
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Seconds per turn; overrides the config file
    #[arg(short, long)]
    pub turn_limit: Option<u32>,

    /// Symbol for player 1
    #[arg(long)]
    pub player1: Option<String>,

    /// Symbol for player 2
    #[arg(long)]
    pub player2: Option<String>,

    /// What starting a new match does to the score (preserve or reset)
    #[arg(long)]
    pub score_policy: Option<ScoreResetPolicy>,

    /// Print every snapshot as a JSON line instead of a board
    #[arg(long)]
    pub json: bool,
}
