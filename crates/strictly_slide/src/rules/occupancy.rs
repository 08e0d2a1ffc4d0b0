//! Phase transition by occupancy.

use crate::types::{Board, Phase};

/// Number of pieces on the board at which placing ends.
pub const SLIDING_THRESHOLD: usize = 6;

/// Phase that follows an action producing `board`, given the phase it was
/// applied in.
///
/// Sliding is absorbing; placing ends once the board holds
/// [`SLIDING_THRESHOLD`] pieces.
pub fn phase_after(current: Phase, board: &Board) -> Phase {
    match current {
        Phase::Sliding => Phase::Sliding,
        Phase::Placing if board.occupied_count() >= SLIDING_THRESHOLD => Phase::Sliding,
        Phase::Placing => Phase::Placing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placing_below_threshold() {
        let board: Board = "xox/o../...".parse().unwrap();
        assert_eq!(phase_after(Phase::Placing, &board), Phase::Placing);
    }

    #[test]
    fn test_placing_at_threshold() {
        let board: Board = "xox/oxo/...".parse().unwrap();
        assert_eq!(phase_after(Phase::Placing, &board), Phase::Sliding);
    }

    #[test]
    fn test_sliding_never_reverts() {
        let board = Board::new();
        assert_eq!(phase_after(Phase::Sliding, &board), Phase::Sliding);
    }
}
