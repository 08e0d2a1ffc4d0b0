//! Game orchestration between players.

use crate::config::PlayerRole;
use crate::players::Player;
use crate::session::{GameSession, GameStatus, SessionError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strictly_slide::{Action, Phase, Player as Mark};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A player is about to act.
    TurnStarted {
        /// Side to move.
        player: Mark,
        /// Who controls it.
        role: PlayerRole,
        /// Current phase.
        phase: Phase,
        /// Legal actions in selector order.
        legal: Vec<Action>,
    },
    /// An action was applied.
    ActionApplied {
        /// Player who acted.
        player: Mark,
        /// The action.
        action: Action,
        /// Board after the action, in compact notation.
        board: String,
        /// Phase after the action.
        phase: Phase,
    },
    /// A submitted action broke a rule; the player is asked again.
    ActionRejected {
        /// Player who submitted it.
        player: Mark,
        /// The rejected action.
        action: Action,
        /// Why.
        reason: String,
    },
    /// Typed input could not be parsed.
    InputRejected {
        /// Player whose input it was.
        player: Mark,
        /// Raw input line.
        input: String,
        /// Parse error.
        reason: String,
    },
    /// A player completed a line.
    GameOver {
        /// The winner.
        winner: Mark,
        /// Actions applied.
        turns: usize,
    },
    /// The side to move has no legal action.
    Stalled {
        /// The stuck player.
        player: Mark,
        /// Actions applied.
        turns: usize,
    },
    /// The configured turn limit was reached without a winner.
    TurnLimitReached {
        /// Actions applied.
        turns: usize,
    },
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// A player won.
    Won(Mark),
    /// The side to move had no legal action.
    Stalled(Mark),
    /// Play was abandoned at the turn limit.
    TurnLimitReached,
}

/// Orchestrates gameplay between two players over one session.
pub struct Orchestrator {
    session: GameSession,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: GameSession,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            player_x,
            player_o,
            event_tx,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the game loop until a win, a stall, or the turn limit.
    ///
    /// Actions are applied one at a time to the session's position.
    /// Rejected human actions are reported and re-requested.
    ///
    /// # Errors
    ///
    /// Fails if a player cannot produce an action, an automated player
    /// proposes an illegal one, or the event channel is closed.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<MatchOutcome> {
        info!(first = %self.session.position().turn(), "Starting game orchestration");
        let max_turns = *self.session.config().max_turns() as usize;

        loop {
            let turns = self.session.turns();
            match self.session.status() {
                GameStatus::Won(winner) => {
                    info!(%winner, turns, "Game won");
                    self.event_tx.send(GameEvent::GameOver { winner, turns })?;
                    return Ok(MatchOutcome::Won(winner));
                }
                GameStatus::Stalled(player) => {
                    warn!(%player, turns, "Game stalled");
                    self.event_tx.send(GameEvent::Stalled { player, turns })?;
                    return Ok(MatchOutcome::Stalled(player));
                }
                GameStatus::InProgress => {}
            }

            if turns >= max_turns {
                info!(turns, "Turn limit reached");
                self.event_tx.send(GameEvent::TurnLimitReached { turns })?;
                return Ok(MatchOutcome::TurnLimitReached);
            }

            let position = *self.session.position();
            let mark = position.turn();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };

            self.event_tx.send(GameEvent::TurnStarted {
                player: mark,
                role: player.role(),
                phase: position.phase(),
                legal: position.legal_actions(),
            })?;

            debug!(player = %player.name(), "Waiting for action");
            let action = player.choose_action(&position).await?;

            match self.session.submit(action) {
                Ok(next) => {
                    self.event_tx.send(GameEvent::ActionApplied {
                        player: mark,
                        action,
                        board: next.board().to_string(),
                        phase: next.phase(),
                    })?;
                }
                Err(SessionError::IllegalMove(err)) if player.role() == PlayerRole::Human => {
                    self.event_tx.send(GameEvent::ActionRejected {
                        player: mark,
                        action,
                        reason: err.reason.to_string(),
                    })?;
                }
                Err(err) => {
                    anyhow::bail!("{} could not act: {}", player.name(), err);
                }
            }
        }
    }

    /// Starts a new game with the same players.
    pub fn restart(&mut self) {
        self.session.restart();
    }
}
