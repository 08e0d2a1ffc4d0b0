//! Move selection for automated players.
//!
//! The only policy is [`FirstAvailable`]: it plays the first action
//! [`Position::legal_actions`] enumerates. There is no search and no
//! lookahead.

use crate::action::Action;
use crate::types::Player;
use crate::Position;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// The side to move has no legal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SelectError {
    /// No action is available for the given player.
    #[display("No legal actions available for {_0}")]
    NoLegalActions(#[error(not(source))] Player),
}

/// Chooses an action on behalf of an automated player.
pub trait MoveSelector: Send + Sync {
    /// Picks one of the legal actions of `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoLegalActions`] when the side to move is
    /// stuck.
    fn choose(&self, position: &Position) -> Result<Action, SelectError>;

    /// Short name for logs and UI.
    fn name(&self) -> &'static str;
}

/// Deterministic policy: always the first enumerated legal action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstAvailable;

impl MoveSelector for FirstAvailable {
    #[instrument(skip(self, position), fields(turn = %position.turn(), phase = %position.phase()))]
    fn choose(&self, position: &Position) -> Result<Action, SelectError> {
        match position.legal_actions().first() {
            Some(action) => {
                debug!(%action, "Selected first available action");
                Ok(*action)
            }
            None => {
                warn!("Side to move has no legal actions");
                Err(SelectError::NoLegalActions(position.turn()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "first-available"
    }
}

/// Chooses an action with the [`FirstAvailable`] policy.
///
/// # Errors
///
/// Returns [`SelectError::NoLegalActions`] when the side to move is stuck.
pub fn choose_action(position: &Position) -> Result<Action, SelectError> {
    FirstAvailable.choose(position)
}
