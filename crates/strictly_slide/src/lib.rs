//! Place-then-slide tic-tac-toe rules and move selection.
//!
//! Players place pieces on a 3x3 board until six are down, then must slide
//! one of their own pieces onto an empty square each turn. Three in a row
//! wins.
//!
//! # Example
//!
//! ```
//! use strictly_slide::{Action, Coordinate, Phase, Player, Position, choose_action};
//!
//! let position = Position::starting_with(Player::X);
//! assert_eq!(position.legal_actions().len(), 9);
//!
//! let action = choose_action(&position).unwrap();
//! assert_eq!(action, Action::place(Coordinate::new(0, 0)));
//!
//! let next = position.apply_action(action).unwrap();
//! assert_eq!(next.turn(), Player::O);
//! assert_eq!(next.phase(), Phase::Placing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod coordinate;
pub mod invariants;
mod position;
pub mod rules;
mod selector;
mod types;

pub use action::{Action, IllegalMove, IllegalMoveReason, ParseActionError};
pub use coordinate::{BOARD_SIZE, Coordinate, ParseCoordinateError};
pub use position::{Position, SetupError};
pub use selector::{FirstAvailable, MoveSelector, SelectError, choose_action};
pub use types::{Board, ParseBoardError, Phase, Player, Square};
