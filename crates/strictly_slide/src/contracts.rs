//! Contract-based validation for actions.
//!
//! Contracts formalize `{P} action {Q}`: preconditions decide legality and
//! are always checked; postconditions re-verify invariants in debug builds.

use crate::action::{Action, IllegalMove, IllegalMoveReason};
use crate::invariants::{InvariantSet, InvariantViolation, PositionInvariants};
use crate::types::{Phase, Square};
use crate::Position;
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: the action kind belongs to the current phase.
pub struct PhaseAllows;

impl PhaseAllows {
    /// Checks the action against the position's phase.
    #[instrument(skip(position))]
    pub fn check(action: &Action, position: &Position) -> Result<(), IllegalMove> {
        if action.phase() == position.phase() {
            Ok(())
        } else {
            Err(IllegalMove::new(
                *action,
                IllegalMoveReason::WrongPhase {
                    attempted: action.phase(),
                    current: position.phase(),
                },
            ))
        }
    }
}

/// Precondition: a slide starts from one of the mover's pieces.
pub struct SourceIsOwn;

impl SourceIsOwn {
    /// Checks the slide source. Place actions pass trivially.
    #[instrument(skip(position))]
    pub fn check(action: &Action, position: &Position) -> Result<(), IllegalMove> {
        match action {
            Action::Slide { from, .. }
                if position.board().get(*from) != Square::Occupied(position.turn()) =>
            {
                Err(IllegalMove::new(
                    *action,
                    IllegalMoveReason::NotYourPiece(*from),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Precondition: the destination square is empty.
pub struct DestinationIsEmpty;

impl DestinationIsEmpty {
    /// Checks the square that will receive the mover's piece.
    #[instrument(skip(position))]
    pub fn check(action: &Action, position: &Position) -> Result<(), IllegalMove> {
        let to = action.destination();
        if position.board().is_empty(to) {
            Ok(())
        } else {
            Err(IllegalMove::new(
                *action,
                IllegalMoveReason::SquareOccupied(to),
            ))
        }
    }
}

/// Composite precondition: phase, ownership, then occupancy.
pub struct LegalAction;

impl LegalAction {
    /// Validates all preconditions for an action.
    #[instrument(skip(position))]
    pub fn check(action: &Action, position: &Position) -> Result<(), IllegalMove> {
        PhaseAllows::check(action, position)?;
        SourceIsOwn::check(action, position)?;
        DestinationIsEmpty::check(action, position)?;
        Ok(())
    }
}

/// Contract for [`Position::apply_action`].
///
/// Postconditions:
/// - every [`PositionInvariants`] member holds
/// - the turn passed to the opponent
/// - a sliding position stays sliding
pub struct ActionContract;

impl Contract<Position, Action> for ActionContract {
    fn pre(position: &Position, action: &Action) -> Result<(), IllegalMove> {
        LegalAction::check(action, position)
    }

    fn post(before: &Position, after: &Position) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = PositionInvariants::check_all(after).err().unwrap_or_default();

        if after.turn() != before.turn().opponent() {
            violations.push(InvariantViolation::new("Turn passes to the opponent"));
        }
        if before.phase() == Phase::Sliding && after.phase() != Phase::Sliding {
            violations.push(InvariantViolation::new("Sliding phase never reverts"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(?violations, "Postcondition failed");
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Player};

    fn sliding(turn: Player) -> Position {
        Position::from_board("xox/oxo/...".parse().unwrap(), turn).unwrap()
    }

    #[test]
    fn test_precondition_place_on_empty() {
        let position = Position::starting_with(Player::X);
        let action = Action::place(Coordinate::new(1, 1));
        assert!(ActionContract::pre(&position, &action).is_ok());
    }

    #[test]
    fn test_precondition_slide_during_placing() {
        let position = Position::starting_with(Player::X);
        let action = Action::slide(Coordinate::new(0, 0), Coordinate::new(1, 1));
        let err = ActionContract::pre(&position, &action).unwrap_err();
        assert_eq!(
            err.reason,
            IllegalMoveReason::WrongPhase {
                attempted: Phase::Sliding,
                current: Phase::Placing,
            }
        );
    }

    #[test]
    fn test_precondition_place_during_sliding() {
        let action = Action::place(Coordinate::new(2, 0));
        let err = ActionContract::pre(&sliding(Player::X), &action).unwrap_err();
        assert!(matches!(err.reason, IllegalMoveReason::WrongPhase { .. }));
    }

    #[test]
    fn test_precondition_slide_opponent_piece() {
        // (0,1) holds o; x to move.
        let action = Action::slide(Coordinate::new(0, 1), Coordinate::new(2, 0));
        let err = ActionContract::pre(&sliding(Player::X), &action).unwrap_err();
        assert_eq!(
            err.reason,
            IllegalMoveReason::NotYourPiece(Coordinate::new(0, 1))
        );
    }

    #[test]
    fn test_precondition_slide_from_empty() {
        let action = Action::slide(Coordinate::new(2, 1), Coordinate::new(2, 0));
        let err = ActionContract::pre(&sliding(Player::O), &action).unwrap_err();
        assert_eq!(
            err.reason,
            IllegalMoveReason::NotYourPiece(Coordinate::new(2, 1))
        );
    }

    #[test]
    fn test_postcondition_holds_after_action() {
        let before = Position::starting_with(Player::O);
        let after = before
            .apply_action(Action::place(Coordinate::new(0, 0)))
            .unwrap();
        assert!(ActionContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_turn_flip() {
        let before = Position::starting_with(Player::X);
        let after = Position::unchecked("x../.../...".parse().unwrap(), Player::X);
        let violations = ActionContract::post(&before, &after).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.description == "Turn passes to the opponent")
        );
    }
}
