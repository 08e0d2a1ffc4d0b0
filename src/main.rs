//! Strictly Slide - unified CLI
//!
//! Plays place-then-slide tic-tac-toe at the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufRead;
use std::sync::Arc;
use strictly_slide::{Board, Player as Mark, Position, choose_action};
use strictly_slide_games::{
    AutomatedPlayer, ConfigOverrides, GameEvent, GameSession, HumanPlayer, InputSource, MatchConfig,
    Orchestrator, Player, PlayerRole, TranscriptFormat, render,
};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            x,
            o,
            seed,
            max_turns,
            json,
        } => {
            let overrides = ConfigOverrides {
                x,
                o,
                seed,
                max_turns,
            };
            let config = MatchConfig::resolve(config.as_deref(), overrides)?;
            run_match(config, transcript_format(json)).await
        }
        Command::Auto {
            seed,
            max_turns,
            json,
        } => {
            let overrides = ConfigOverrides {
                seed,
                max_turns,
                ..ConfigOverrides::default()
            };
            let config = MatchConfig::automated().with_overrides(overrides)?;
            run_match(config, transcript_format(json)).await
        }
        Command::Legal { board, turn } => run_legal(&board, turn),
    }
}

fn transcript_format(json: bool) -> TranscriptFormat {
    if json {
        TranscriptFormat::Json
    } else {
        TranscriptFormat::Text
    }
}

/// Run one match, printing the transcript to stdout.
#[instrument(skip(config), fields(x = %config.x(), o = %config.o()))]
async fn run_match(config: MatchConfig, format: TranscriptFormat) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match render(&event, format) {
                Ok(Some(line)) => println!("{line}"),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Failed to render event"),
            }
        }
    });

    let input = spawn_stdin_reader(&config);
    let player_x = make_player(Mark::X, config.role_of(Mark::X), &input, &event_tx);
    let player_o = make_player(Mark::O, config.role_of(Mark::O), &input, &event_tx);

    let session = GameSession::new(config);
    if format == TranscriptFormat::Text {
        println!(
            "{} moves first\n{}\n",
            session.position().turn().to_string().to_uppercase(),
            session.position().board().display()
        );
    }

    let mut orchestrator = Orchestrator::new(session, player_x, player_o, event_tx);
    let outcome = orchestrator.run().await;
    drop(orchestrator);

    printer.await.context("Transcript printer failed")?;

    let outcome = outcome?;
    info!(?outcome, "Match finished");
    Ok(())
}

fn make_player(
    mark: Mark,
    role: PlayerRole,
    input: &InputSource,
    events: &mpsc::UnboundedSender<GameEvent>,
) -> Box<dyn Player> {
    let name = format!("{}-{}", role, mark);
    match role {
        PlayerRole::Human => Box::new(HumanPlayer::new(
            name,
            mark,
            Arc::clone(input),
            events.clone(),
        )),
        PlayerRole::Automated => Box::new(AutomatedPlayer::first_available(name)),
    }
}

/// Forward stdin lines into a shared channel when a human is playing.
///
/// Reads on a detached OS thread: a blocking read cannot be cancelled and
/// must not hold up runtime shutdown.
fn spawn_stdin_reader(config: &MatchConfig) -> InputSource {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    let has_human = [Mark::X, Mark::O]
        .into_iter()
        .any(|mark| config.role_of(mark) == PlayerRole::Human);

    if has_human {
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
            debug!("Stdin closed");
        });
    }
    Arc::new(Mutex::new(line_rx))
}

/// Print the legal actions and automated choice for a hand-built position.
#[instrument]
fn run_legal(board: &str, turn: Mark) -> Result<()> {
    let board: Board = board.parse()?;
    let position = Position::from_board(board, turn)?;

    println!("{}\n", position.board().display());
    println!("turn: {}  phase: {}", position.turn(), position.phase());

    if let Some(winner) = position.winner() {
        println!("winner: {winner}");
    }

    let actions = position.legal_actions();
    println!("legal actions ({}):", actions.len());
    for action in &actions {
        println!("  {action}");
    }

    match choose_action(&position) {
        Ok(action) => println!("automated choice: {action}"),
        Err(e) => println!("automated choice: none ({e})"),
    }
    Ok(())
}
