//! Turn order invariant: the side with fewer pieces moves next.

use super::Invariant;
use crate::{Player, Position};
use std::cmp::Ordering;

/// Invariant: when piece counts differ, the player behind is to move.
///
/// With equal counts either player may be to move, because the starting
/// player is chosen at random.
pub struct TurnOrderInvariant;

impl Invariant<Position> for TurnOrderInvariant {
    fn holds(position: &Position) -> bool {
        let board = position.board();
        match board.count(Player::X).cmp(&board.count(Player::O)) {
            Ordering::Equal => true,
            Ordering::Greater => position.turn() == Player::O,
            Ordering::Less => position.turn() == Player::X,
        }
    }

    fn description() -> &'static str {
        "Player with fewer pieces moves next"
    }
}
