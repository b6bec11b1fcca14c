//! Console commands and frame rendering.

use gridmatch::{MatchPhase, MatchSnapshot};
use std::str::FromStr;

/// Seconds at or below which the countdown is printed.
const COUNTDOWN_WARNING: u32 = 3;

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `row col`
    Move {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// `size N` while selecting.
    Size(usize),
    /// `next` after a round ends.
    Next,
    /// `new` to return to board selection.
    New,
    /// `restart` to replay the current round.
    Restart,
    /// `symbols A B`
    Symbols(String, String),
    /// `score` to print the tally.
    Score,
    /// `reset-score` to zero the tally.
    ResetScore,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Unparseable console input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CommandError {
    /// Blank line.
    #[display("Empty command")]
    Empty,
    /// First word is not a command.
    #[display("Unknown command: {}", _0)]
    Unknown(String),
    /// Right command, wrong arguments.
    #[display("Usage: {}", _0)]
    Usage(&'static str),
}

impl std::error::Error for CommandError {}

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match (head.to_lowercase().as_str(), args) {
            ("next", []) => Ok(Self::Next),
            ("new", []) => Ok(Self::New),
            ("restart", []) => Ok(Self::Restart),
            ("score", []) => Ok(Self::Score),
            ("reset-score", []) => Ok(Self::ResetScore),
            ("help" | "?", []) => Ok(Self::Help),
            ("quit" | "exit" | "q", []) => Ok(Self::Quit),
            ("size", [n]) => n
                .parse()
                .map(Self::Size)
                .map_err(|_| CommandError::Usage("size N")),
            ("size", _) => Err(CommandError::Usage("size N")),
            ("symbols", [a, b]) => Ok(Self::Symbols(a.to_string(), b.to_string())),
            ("symbols", _) => Err(CommandError::Usage("symbols A B")),
            (_, [col]) => match (head.parse(), col.parse()) {
                (Ok(row), Ok(col)) => Ok(Self::Move { row, col }),
                _ => Err(CommandError::Unknown(head.to_string())),
            },
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

/// Text listing every command.
pub const HELP: &str = "\
Commands:
  ROW COL        place your mark (zero-based)
  size N         pick a board size (3-5) when selecting
  next           start the next round
  restart        replay the current round
  new            back to board selection
  symbols A B    change both symbols
  score          show the score
  reset-score    zero the score
  quit           leave";

/// Full frame: board, status and score.
pub fn render_frame(snapshot: &MatchSnapshot) -> String {
    let mut frame = String::new();
    if let Some(board) = snapshot.render_board() {
        frame.push_str(&board);
        frame.push('\n');
    }
    frame.push_str(&snapshot.status_line());
    frame.push('\n');
    frame.push_str(&render_score(snapshot));
    if snapshot.phase == MatchPhase::RoundOver {
        frame.push_str("\nType `next` for another round or `new` to pick a board");
    }
    frame
}

/// Score line using the current symbols.
pub fn render_score(snapshot: &MatchSnapshot) -> String {
    format!(
        "Score  {}: {}  {}: {}  draws: {}",
        snapshot.symbols.player1(),
        snapshot.score.player1_wins(),
        snapshot.symbols.player2(),
        snapshot.score.player2_wins(),
        snapshot.score.draws()
    )
}

/// What to print when the snapshot moves from `prev` to `next`.
///
/// A change that only moves the countdown prints the seconds left once it
/// reaches the warning threshold, and nothing before that.
pub fn describe_change(prev: Option<&MatchSnapshot>, next: &MatchSnapshot) -> Option<String> {
    match prev {
        Some(prev) if prev == next => None,
        Some(prev) if only_clock_changed(prev, next) => {
            (next.time_remaining <= COUNTDOWN_WARNING).then(|| format!("  {}s", next.time_remaining))
        }
        _ => Some(render_frame(next)),
    }
}

fn only_clock_changed(prev: &MatchSnapshot, next: &MatchSnapshot) -> bool {
    MatchSnapshot {
        time_remaining: next.time_remaining,
        ..prev.clone()
    } == *next
}
