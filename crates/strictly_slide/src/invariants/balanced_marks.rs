//! Balanced marks invariant: players never differ by more than one piece.

use super::Invariant;
use crate::{Player, Position};

/// Invariant: X and O piece counts differ by at most one.
///
/// Players alternate and each placement adds exactly one piece, so neither
/// side can get two placements ahead. Slides preserve both counts.
pub struct BalancedMarksInvariant;

impl Invariant<Position> for BalancedMarksInvariant {
    fn holds(position: &Position) -> bool {
        let board = position.board();
        board.count(Player::X).abs_diff(board.count(Player::O)) <= 1
    }

    fn description() -> &'static str {
        "Piece counts differ by at most one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_counts_hold() {
        let position = Position::unchecked("xo./ox./...".parse().unwrap(), Player::X);
        assert!(BalancedMarksInvariant::holds(&position));
    }

    #[test]
    fn test_two_ahead_violates() {
        let position = Position::unchecked("xx./.../...".parse().unwrap(), Player::O);
        assert!(!BalancedMarksInvariant::holds(&position));
    }
}
