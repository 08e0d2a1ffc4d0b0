//! Strictly Slide - terminal driver for place-then-slide tic-tac-toe.
//!
//! The rules live in the [`strictly_slide`] crate. This crate adds what it
//! takes to actually play a match:
//!
//! - **Config**: which side is human and which is automated
//! - **Session**: the single authoritative position, applied one action at
//!   a time
//! - **Players**: keyboard input or a move selector
//! - **Orchestrator**: the turn loop and its event stream
//!
//! # Example
//!
//! ```no_run
//! use strictly_slide_games::{AutomatedPlayer, GameSession, MatchConfig, Orchestrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut orchestrator = Orchestrator::new(
//!     GameSession::new(MatchConfig::automated()),
//!     Box::new(AutomatedPlayer::first_available("bot-x")),
//!     Box::new(AutomatedPlayer::first_available("bot-o")),
//!     tx,
//! );
//! let outcome = orchestrator.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
mod players;
mod session;
mod transcript;

pub use config::{ConfigError, ConfigOverrides, MatchConfig, PlayerRole};
pub use orchestrator::{GameEvent, MatchOutcome, Orchestrator};
pub use players::{AutomatedPlayer, HumanPlayer, InputSource, Player};
pub use session::{GameSession, GameStatus, SessionError, TurnRecord};
pub use transcript::{TranscriptFormat, render};
