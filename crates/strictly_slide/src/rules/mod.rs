//! Game rules for place-then-slide tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! [`Position`](crate::Position) so contracts and invariants can reuse them.

pub mod moves;
pub mod occupancy;
pub mod win;

pub use moves::legal_actions;
pub use occupancy::{SLIDING_THRESHOLD, phase_after};
pub use win::check_winner;
