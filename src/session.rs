//! The authoritative game session.
//!
//! A session owns the single position every action is applied to, so
//! actions are serialized by construction: `submit` takes `&mut self`.

use crate::config::{MatchConfig, PlayerRole};
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strictly_slide::{Action, IllegalMove, Player, Position};
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "player", rename_all = "snake_case")]
pub enum GameStatus {
    /// The side to move has at least one legal action.
    InProgress,
    /// A player holds a complete line.
    Won(Player),
    /// The side to move has no legal action.
    Stalled(Player),
}

impl GameStatus {
    /// True once no further action may be submitted.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Player who acted.
    pub player: Player,
    /// What they did.
    pub action: Action,
}

/// Errors from submitting an action to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The game already has a winner.
    #[display("Game is over: {_0} has won")]
    #[from(ignore)]
    GameOver(#[error(not(source))] Player),
    /// The side to move has no legal action.
    #[display("Game is stalled: {_0} has no legal action")]
    #[from(ignore)]
    Stalled(#[error(not(source))] Player),
    /// The action broke a rule; the position is unchanged.
    #[display("{_0}")]
    IllegalMove(#[error(not(source))] IllegalMove),
}

/// A single game between two configured players.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: MatchConfig,
    position: Position,
    history: Vec<TurnRecord>,
    rng: StdRng,
}

impl GameSession {
    /// Starts a session. The first player is drawn from the configured seed,
    /// or from OS entropy when none is set.
    #[instrument(skip(config), fields(x = %config.x(), o = %config.o()))]
    pub fn new(config: MatchConfig) -> Self {
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        let position = Position::new_game(&mut rng);
        info!(first = %position.turn(), "Created game session");
        Self {
            config,
            position,
            history: Vec::new(),
            rng,
        }
    }

    /// Starts over with the same roles and a freshly drawn first player.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.position = Position::new_game(&mut self.rng);
        self.history.clear();
        info!(first = %self.position.turn(), "Restarted game session");
    }

    /// The match configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The current authoritative position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Actions applied so far, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Number of actions applied so far.
    pub fn turns(&self) -> usize {
        self.history.len()
    }

    /// Role controlling the given player.
    pub fn role_of(&self, player: Player) -> PlayerRole {
        self.config.role_of(player)
    }

    /// Role controlling the side to move.
    pub fn current_role(&self) -> PlayerRole {
        self.role_of(self.position.turn())
    }

    /// Current status.
    ///
    /// A win is checked before a stall, so a finished game reports its
    /// winner even when the loser could not move.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.position.winner() {
            GameStatus::Won(winner)
        } else if self.position.legal_actions().is_empty() {
            GameStatus::Stalled(self.position.turn())
        } else {
            GameStatus::InProgress
        }
    }

    /// Applies an action for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameOver`] or [`SessionError::Stalled`] once
    /// play has ended, and [`SessionError::IllegalMove`] when the action
    /// breaks a rule. The position is unchanged on error.
    #[instrument(skip(self), fields(turn = %self.position.turn()))]
    pub fn submit(&mut self, action: Action) -> Result<&Position, SessionError> {
        match self.status() {
            GameStatus::Won(winner) => return Err(SessionError::GameOver(winner)),
            GameStatus::Stalled(player) => return Err(SessionError::Stalled(player)),
            GameStatus::InProgress => {}
        }

        let player = self.position.turn();
        self.position = self.position.apply_action(action).inspect_err(|err| {
            warn!(error = %err, "Session rejected action");
        })?;
        self.history.push(TurnRecord { player, action });

        debug!(%player, %action, turns = self.history.len(), "Applied action");
        Ok(&self.position)
    }
}
