//! Legal-action generation.

use crate::action::Action;
use crate::types::{Board, Phase, Player};
use tracing::{instrument, trace};

/// Enumerates every legal action for `player` in `phase`.
///
/// - Placing: one place per empty square, row-major.
/// - Sliding: one slide per (own piece, empty square) pair, source squares
///   row-major as the outer loop and destinations row-major as the inner.
///
/// The order is part of the contract: the first-available selector picks
/// element zero.
#[instrument(skip(board))]
pub fn legal_actions(board: &Board, player: Player, phase: Phase) -> Vec<Action> {
    let empty = board.empty_squares();

    let actions: Vec<Action> = match phase {
        Phase::Placing => empty.into_iter().map(Action::place).collect(),
        Phase::Sliding => board
            .pieces_of(player)
            .into_iter()
            .flat_map(|from| empty.iter().map(move |&to| Action::slide(from, to)))
            .collect(),
    };

    trace!(count = actions.len(), "Generated legal actions");
    actions
}
