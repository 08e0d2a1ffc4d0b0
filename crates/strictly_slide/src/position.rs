//! The immutable game position and its state machine.

use crate::action::{Action, IllegalMove};
use crate::contracts::{ActionContract, Contract};
use crate::invariants::{
    Invariant, InvariantSet, InvariantViolation, PhaseOccupancyInvariant, PositionInvariants,
};
use crate::rules::{self, SLIDING_THRESHOLD};
use crate::types::{Board, Phase, Player, Square};
use derive_more::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Immutable snapshot of a game: board contents, player to move, phase.
///
/// New positions come only from [`Position::new_game`] (or its seeded
/// variants) and from [`Position::apply_action`], which returns a fresh
/// value and leaves `self` untouched. Deserialized positions go through
/// [`Position::from_board`] and are rejected if they could not arise in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SavedPosition")]
pub struct Position {
    board: Board,
    turn: Player,
    phase: Phase,
}

impl Position {
    /// Starts a game with an empty board and a randomly chosen first player.
    #[instrument(skip(rng))]
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = if rng.random_bool(0.5) {
            Player::X
        } else {
            Player::O
        };
        Self::starting_with(first)
    }

    /// Starts a game with an empty board and the given first player.
    #[instrument]
    pub fn starting_with(first: Player) -> Self {
        debug!(%first, "Starting new game");
        Self {
            board: Board::new(),
            turn: first,
            phase: Phase::Placing,
        }
    }

    /// Builds a position from an arbitrary board, e.g. a saved game or a
    /// puzzle.
    ///
    /// The phase is derived from occupancy. Boards that cannot arise in
    /// play are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] listing every violated invariant.
    #[instrument(skip(board), fields(board = %board))]
    pub fn from_board(board: Board, turn: Player) -> Result<Self, SetupError> {
        let position = Self::unchecked(board, turn);
        PositionInvariants::check_all(&position).map_err(|violations| {
            warn!(?violations, "Rejected position setup");
            SetupError { violations }
        })?;
        Ok(position)
    }

    /// Builds a position without validation. Phase is derived from occupancy.
    pub(crate) fn unchecked(board: Board, turn: Player) -> Self {
        let phase = if board.occupied_count() >= SLIDING_THRESHOLD {
            Phase::Sliding
        } else {
            Phase::Placing
        };
        Self { board, turn, phase }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of pieces on the board.
    pub fn occupied_count(&self) -> usize {
        self.board.occupied_count()
    }

    /// Every legal action for the player to move, in selector order.
    ///
    /// See [`rules::legal_actions`] for the enumeration order.
    #[instrument(skip(self), fields(turn = %self.turn, phase = %self.phase))]
    pub fn legal_actions(&self) -> Vec<Action> {
        rules::legal_actions(&self.board, self.turn, self.phase)
    }

    /// Validates and applies an action, returning the successor position.
    ///
    /// This is the only gate enforcing game rules. It does not look at
    /// whether a winner already exists; drivers stop play once
    /// [`Position::winner`] reports one.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if the action kind does not match the phase,
    /// a slide does not start from the mover's piece, or the destination
    /// is occupied.
    #[instrument(skip(self), fields(turn = %self.turn, phase = %self.phase))]
    pub fn apply_action(&self, action: Action) -> Result<Position, IllegalMove> {
        ActionContract::pre(self, &action).inspect_err(|err| {
            warn!(error = %err, "Rejected action");
        })?;

        let mut board = self.board;
        match action {
            Action::Place { at } => board.set(at, Square::Occupied(self.turn)),
            Action::Slide { from, to } => {
                board.set(from, Square::Empty);
                board.set(to, Square::Occupied(self.turn));
            }
        }

        let next = Position {
            board,
            turn: self.turn.opponent(),
            phase: rules::phase_after(self.phase, &board),
        };

        if next.phase != self.phase {
            debug!(occupied = board.occupied_count(), "Entering sliding phase");
        }

        debug_assert_eq!(
            ActionContract::post(self, &next),
            Ok(()),
            "postcondition failed after {action}"
        );

        Ok(next)
    }

    /// The player holding a complete line, if any.
    ///
    /// Absence of a winner is the only non-terminal signal; there is no
    /// draw detection.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(&self.board)
    }
}

/// Serialized form of a [`Position`], validated on the way in.
#[derive(Deserialize)]
struct SavedPosition {
    board: Board,
    turn: Player,
    #[serde(default)]
    phase: Option<Phase>,
}

impl TryFrom<SavedPosition> for Position {
    type Error = SetupError;

    fn try_from(saved: SavedPosition) -> Result<Self, Self::Error> {
        let position = Position::from_board(saved.board, saved.turn)?;
        match saved.phase {
            Some(phase) if phase != position.phase => {
                warn!(%phase, derived = %position.phase, "Rejected saved phase");
                Err(SetupError {
                    violations: vec![InvariantViolation::new(
                        PhaseOccupancyInvariant::description(),
                    )],
                })
            }
            _ => Ok(position),
        }
    }
}

/// A hand-built board that could not arise in play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SetupError {
    /// Every violated invariant.
    pub violations: Vec<InvariantViolation>,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let descriptions = self
            .violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid position: {descriptions}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::IllegalMoveReason;
    use crate::coordinate::Coordinate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_is_empty_placing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let position = Position::new_game(&mut rng);
        assert_eq!(position.phase(), Phase::Placing);
        assert_eq!(position.occupied_count(), 0);
    }

    #[test]
    fn test_new_game_picks_both_starting_players() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let starters: std::collections::HashSet<Player> =
            (0..64).map(|_| Position::new_game(&mut rng).turn()).collect();
        assert_eq!(starters.len(), 2);
    }

    #[test]
    fn test_place_marks_square_and_flips_turn() {
        let position = Position::starting_with(Player::X);
        let next = position
            .apply_action(Action::place(Coordinate::new(0, 0)))
            .unwrap();
        assert_eq!(
            next.board().get(Coordinate::new(0, 0)),
            Square::Occupied(Player::X)
        );
        assert_eq!(next.turn(), Player::O);
        assert_eq!(next.phase(), Phase::Placing);
        assert_eq!(position.occupied_count(), 0);
    }

    #[test]
    fn test_slide_moves_piece() {
        let position = Position::from_board("xox/oxo/...".parse().unwrap(), Player::X).unwrap();
        let next = position
            .apply_action(Action::slide(Coordinate::new(1, 1), Coordinate::new(2, 1)))
            .unwrap();
        assert_eq!(next.board().to_string(), "xox/o.o/.x.");
        assert_eq!(next.turn(), Player::O);
        assert_eq!(next.phase(), Phase::Sliding);
    }

    #[test]
    fn test_place_on_occupied_rejected() {
        let position = Position::from_board("x../.../...".parse().unwrap(), Player::O).unwrap();
        let err = position
            .apply_action(Action::place(Coordinate::new(0, 0)))
            .unwrap_err();
        assert_eq!(
            err.reason,
            IllegalMoveReason::SquareOccupied(Coordinate::new(0, 0))
        );
    }

    #[test]
    fn test_from_board_derives_phase() {
        let placing = Position::from_board("xo./.../...".parse().unwrap(), Player::X).unwrap();
        assert_eq!(placing.phase(), Phase::Placing);
        let sliding = Position::from_board("xox/oxo/...".parse().unwrap(), Player::O).unwrap();
        assert_eq!(sliding.phase(), Phase::Sliding);
    }

    #[test]
    fn test_from_board_rejects_impossible_boards() {
        let err = Position::from_board("xxx/.../...".parse().unwrap(), Player::O).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.to_string().contains("at most one"));

        let err = Position::from_board("x../.../...".parse().unwrap(), Player::X).unwrap_err();
        assert!(err.to_string().contains("fewer pieces"));

        assert!(Position::from_board("xox/oxo/xo.".parse().unwrap(), Player::X).is_err());
    }

    #[test]
    fn test_winner_delegates_to_rules() {
        let position = Position::unchecked("xxx/oo./...".parse().unwrap(), Player::O);
        assert_eq!(position.winner(), Some(Player::X));
        assert_eq!(Position::starting_with(Player::X).winner(), None);
    }

    fn saved(board: &str, turn: &str, phase: &str) -> serde_json::Value {
        let board: Board = board.parse().unwrap();
        serde_json::json!({ "board": board, "turn": turn, "phase": phase })
    }

    #[test]
    fn test_deserialize_accepts_reachable_position() {
        let position = Position::from_board("xox/oxo/...".parse().unwrap(), Player::X).unwrap();
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), position);
    }

    #[test]
    fn test_deserialize_rejects_phase_mismatch() {
        // Six pieces can only be in the sliding phase.
        let payload = saved("xox/oxo/...", "x", "placing");
        assert!(serde_json::from_value::<Position>(payload).is_err());

        let payload = saved(".../.../...", "o", "sliding");
        assert!(serde_json::from_value::<Position>(payload).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unreachable_board() {
        let payload = saved("xxx/.../...", "o", "placing");
        let err = serde_json::from_value::<Position>(payload).unwrap_err();
        assert!(err.to_string().contains("Invalid position"));
    }

    #[test]
    fn test_deserialize_derives_missing_phase() {
        let board: Board = "xo./.../...".parse().unwrap();
        let payload = serde_json::json!({ "board": board, "turn": "x" });
        let position: Position = serde_json::from_value(payload).unwrap();
        assert_eq!(position.phase(), Phase::Placing);
        assert_eq!(position.legal_actions().len(), 7);
    }
}
