//! Gridmatch - console match
//!
//! Runs a timed match between two players sharing one terminal. The board is
//! printed to stdout; logs go to stderr.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use console::{describe_change, render_score, ConsoleCommand, HELP};
use gridmatch::{
    MatchConfig, MatchController, MatchDriver, MatchError, MatchHandle, MatchSnapshot,
    PlayerSymbols, TICK_PERIOD,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;
    run_console(config, cli.json).await
}

/// Merges the optional config file with command-line overrides.
#[instrument(skip(cli))]
fn resolve_config(cli: &Cli) -> Result<MatchConfig> {
    let mut config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    if let Some(turn_limit) = cli.turn_limit {
        config = config.with_turn_limit(turn_limit);
    }
    if let Some(policy) = cli.score_policy {
        config = config.with_score_policy(policy);
    }
    if cli.player1.is_some() || cli.player2.is_some() {
        let player1 = cli
            .player1
            .clone()
            .unwrap_or_else(|| config.symbols().player1().clone());
        let player2 = cli
            .player2
            .clone()
            .unwrap_or_else(|| config.symbols().player2().clone());
        let symbols = PlayerSymbols::new(player1, player2).context("Invalid player symbols")?;
        config = config.with_symbols(symbols);
    }

    config.validate().context("Invalid match configuration")?;
    debug!(?config, "Resolved match configuration");
    Ok(config)
}

/// Runs the match until `quit` or end of input.
async fn run_console(config: MatchConfig, json: bool) -> Result<()> {
    let controller = MatchController::new(config.clone()).context("Failed to create match")?;
    let (handle, driver) = MatchDriver::spawn(controller, TICK_PERIOD);
    let printer = spawn_printer(handle.subscribe(), json);

    info!(size = config.size(), "Starting console match");
    if !json {
        println!("{}", HELP);
    }
    handle
        .configure(*config.size(), config.symbols().clone())
        .await
        .context("Failed to start match")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }
        if let Err(e) = execute(&handle, command).await {
            println!("{}", e);
            if e == MatchError::Disconnected {
                break;
            }
        }
    }

    info!("Shutting down console match");
    drop(handle);
    driver.await.context("Match driver panicked")?;
    printer.await.context("Printer task panicked")?;
    Ok(())
}

/// Applies one console command through the driver.
#[instrument(skip(handle))]
async fn execute(handle: &MatchHandle, command: ConsoleCommand) -> Result<(), MatchError> {
    match command {
        ConsoleCommand::Move { row, col } => handle.submit_move(row, col).await.map(drop),
        ConsoleCommand::Size(size) => handle
            .configure(size, handle.snapshot().symbols)
            .await
            .map(drop),
        ConsoleCommand::Next => handle.start_next_round().await.map(drop),
        ConsoleCommand::New => handle.start_new_match().await.map(drop),
        ConsoleCommand::Restart => handle.restart_round().await.map(drop),
        ConsoleCommand::Symbols(player1, player2) => {
            handle.update_symbols(player1, player2).await.map(drop)
        }
        ConsoleCommand::ResetScore => handle.reset_score().await.map(drop),
        ConsoleCommand::Score => {
            println!("{}", render_score(&handle.snapshot()));
            Ok(())
        }
        ConsoleCommand::Help => {
            println!("{}", HELP);
            Ok(())
        }
        ConsoleCommand::Quit => Ok(()),
    }
}

/// Prints snapshots as they are published until the driver stops.
fn spawn_printer(mut snapshots: watch::Receiver<MatchSnapshot>, json: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last: Option<MatchSnapshot> = None;
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            if json {
                match serde_json::to_string(&snapshot) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "Failed to serialize snapshot"),
                }
            } else if let Some(text) = describe_change(last.as_ref(), &snapshot) {
                println!("{}", text);
            }
            last = Some(snapshot);
        }
        debug!("Snapshot stream closed");
    })
}
