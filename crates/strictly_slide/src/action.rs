//! First-class actions and the rule-violation error.
//!
//! Actions describe a player's intent. They are validated and applied by
//! [`Position::apply_action`](crate::Position::apply_action), which is the
//! only place game rules are enforced.

use crate::coordinate::{Coordinate, ParseCoordinateError};
use crate::types::Phase;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A single state transition requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// Put a new piece on an empty square. Placing phase only.
    Place {
        /// Target square.
        at: Coordinate,
    },
    /// Move one of the mover's pieces onto an empty square. Sliding phase only.
    Slide {
        /// Square holding the mover's piece.
        from: Coordinate,
        /// Empty destination square.
        to: Coordinate,
    },
}

impl Action {
    /// Creates a place action.
    pub fn place(at: Coordinate) -> Self {
        Action::Place { at }
    }

    /// Creates a slide action.
    pub fn slide(from: Coordinate, to: Coordinate) -> Self {
        Action::Slide { from, to }
    }

    /// The phase in which this action is allowed.
    pub fn phase(&self) -> Phase {
        match self {
            Action::Place { .. } => Phase::Placing,
            Action::Slide { .. } => Phase::Sliding,
        }
    }

    /// The square that ends up holding the mover's piece.
    pub fn destination(&self) -> Coordinate {
        match self {
            Action::Place { at } => *at,
            Action::Slide { to, .. } => *to,
        }
    }
}

/// Notation: `"r,c"` for a place, `"r,c>r,c"` for a slide.
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place { at } => write!(f, "{at}"),
            Action::Slide { from, to } => write!(f, "{from}>{to}"),
        }
    }
}

/// Error parsing action notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
#[display("Invalid action: {_0}")]
pub struct ParseActionError(ParseCoordinateError);

impl FromStr for Action {
    type Err = ParseActionError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('>') {
            Some((from, to)) => Ok(Action::slide(from.parse()?, to.parse()?)),
            None => Ok(Action::place(s.parse()?)),
        }
    }
}

/// Which rule an action broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum IllegalMoveReason {
    /// The action kind does not match the current phase.
    #[display("a {attempted} action is not allowed during the {current} phase")]
    WrongPhase {
        /// Phase the action belongs to.
        attempted: Phase,
        /// Phase the position is in.
        current: Phase,
    },
    /// The target square already holds a piece.
    #[display("square {_0} is already occupied")]
    SquareOccupied(Coordinate),
    /// The source square does not hold the mover's piece.
    #[display("square {_0} does not hold the mover's piece")]
    NotYourPiece(Coordinate),
}

/// The supplied action violates phase, turn, or occupancy rules.
///
/// The position it was applied to is unchanged; callers should re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Illegal move {action}: {reason}")]
pub struct IllegalMove {
    /// The rejected action.
    pub action: Action,
    /// The violated rule.
    pub reason: IllegalMoveReason,
}

impl IllegalMove {
    /// Creates a new illegal-move error.
    pub fn new(action: Action, reason: IllegalMoveReason) -> Self {
        Self { action, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_and_slide() {
        assert_eq!(
            "1,1".parse::<Action>().unwrap(),
            Action::place(Coordinate::new(1, 1))
        );
        assert_eq!(
            "0,0 > 2,2".parse::<Action>().unwrap(),
            Action::slide(Coordinate::new(0, 0), Coordinate::new(2, 2))
        );
        assert!("0,0>".parse::<Action>().is_err());
        assert!("9,9".parse::<Action>().is_err());
    }

    #[test]
    fn test_display_matches_notation() {
        let slide = Action::slide(Coordinate::new(2, 0), Coordinate::new(0, 1));
        assert_eq!(slide.to_string(), "2,0>0,1");
        assert_eq!(slide.to_string().parse::<Action>().unwrap(), slide);
    }

    #[test]
    fn test_action_phase() {
        assert_eq!(Action::place(Coordinate::new(0, 0)).phase(), Phase::Placing);
        assert_eq!(
            Action::slide(Coordinate::new(0, 0), Coordinate::new(0, 1)).phase(),
            Phase::Sliding
        );
    }

    #[test]
    fn test_illegal_move_message() {
        let action = Action::slide(Coordinate::new(1, 1), Coordinate::new(0, 0));
        let err = IllegalMove::new(
            action,
            IllegalMoveReason::SquareOccupied(Coordinate::new(0, 0)),
        );
        let message = err.to_string();
        assert!(message.contains("1,1>0,0"));
        assert!(message.contains("occupied"));
    }

    #[test]
    fn test_serde_tagged() {
        let action = Action::place(Coordinate::new(0, 2));
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"kind":"place","at":[0,2]}"#);
    }
}
