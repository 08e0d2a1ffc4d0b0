//! Phase/occupancy invariant: placing below six pieces, sliding at six.

use super::Invariant;
use crate::rules::SLIDING_THRESHOLD;
use crate::{Phase, Position};

/// Invariant: the phase agrees with the number of pieces on the board.
///
/// Placing positions hold fewer than six pieces. Sliding positions hold
/// exactly six, since sliding neither adds nor removes pieces.
pub struct PhaseOccupancyInvariant;

impl Invariant<Position> for PhaseOccupancyInvariant {
    fn holds(position: &Position) -> bool {
        let occupied = position.board().occupied_count();
        match position.phase() {
            Phase::Placing => occupied < SLIDING_THRESHOLD,
            Phase::Sliding => occupied == SLIDING_THRESHOLD,
        }
    }

    fn description() -> &'static str {
        "Phase matches occupancy (placing below six pieces, sliding at exactly six)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_placing_below_threshold_holds() {
        let position = Position::unchecked("xo./.../...".parse().unwrap(), Player::X);
        assert!(PhaseOccupancyInvariant::holds(&position));
    }

    #[test]
    fn test_sliding_at_threshold_holds() {
        let position = Position::unchecked("xox/oxo/...".parse().unwrap(), Player::X);
        assert_eq!(position.phase(), Phase::Sliding);
        assert!(PhaseOccupancyInvariant::holds(&position));
    }

    #[test]
    fn test_overfull_board_violates() {
        let position = Position::unchecked("xox/oxo/x..".parse().unwrap(), Player::O);
        assert!(!PhaseOccupancyInvariant::holds(&position));
    }
}
