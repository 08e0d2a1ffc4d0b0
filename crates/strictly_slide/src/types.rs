//! Core domain types for place-then-slide tic-tac-toe.

use crate::coordinate::Coordinate;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Returns true for an empty square.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }
}

/// Game phase.
///
/// Play starts in `Placing` and switches to `Sliding` once six pieces
/// are on the board. The switch is one-way.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Players add new pieces.
    Placing,
    /// Players relocate one of their own pieces onto an empty square.
    Sliding,
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares indexed `[row][col]`.
    squares: [[Square; 3]; 3],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given coordinate.
    pub fn get(&self, at: Coordinate) -> Square {
        self.squares[at.row()][at.col()]
    }

    /// Sets the square at the given coordinate.
    pub fn set(&mut self, at: Coordinate, square: Square) {
        self.squares[at.row()][at.col()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, at: Coordinate) -> bool {
        self.get(at).is_empty()
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Square; 3]; 3] {
        &self.squares
    }

    /// Number of non-empty squares.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|square| !square.is_empty())
            .count()
    }

    /// Number of squares holding the given player's mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|square| **square == Square::Occupied(player))
            .count()
    }

    /// Coordinates of all empty squares, row-major.
    pub fn empty_squares(&self) -> Vec<Coordinate> {
        Coordinate::ALL
            .iter()
            .copied()
            .filter(|at| self.is_empty(*at))
            .collect()
    }

    /// Coordinates holding the given player's mark, row-major.
    pub fn pieces_of(&self, player: Player) -> Vec<Coordinate> {
        Coordinate::ALL
            .iter()
            .copied()
            .filter(|at| self.get(*at) == Square::Occupied(player))
            .collect()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their `row,col` so a human can type them back.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (row, cells) in self.squares.iter().enumerate() {
            for (col, square) in cells.iter().enumerate() {
                let symbol = match square {
                    Square::Empty => format!("{row},{col}"),
                    Square::Occupied(player) => format!(" {} ", player.to_string().to_uppercase()),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n---+---+---\n");
            }
        }
        result
    }
}

/// Error parsing a board from compact notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board notation {input:?}: {reason}")]
pub struct ParseBoardError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

/// Parses compact notation: three rows of `x`, `o` or `.` separated by `/`,
/// e.g. `"xo./.x./..o"`.
impl FromStr for Board {
    type Err = ParseBoardError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| ParseBoardError {
            input: s.to_string(),
            reason,
        };

        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != 3 {
            return Err(fail("expected three rows separated by '/'"));
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let cells: Vec<char> = text.trim().chars().collect();
            if cells.len() != 3 {
                return Err(fail("each row must have exactly three cells"));
            }
            for (col, cell) in cells.into_iter().enumerate() {
                let square = match cell.to_ascii_lowercase() {
                    'x' => Square::Occupied(Player::X),
                    'o' => Square::Occupied(Player::O),
                    '.' | '_' | '-' => Square::Empty,
                    _ => return Err(fail("cells must be 'x', 'o' or '.'")),
                };
                board.set(Coordinate::new(row, col), square);
            }
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.squares.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for square in cells {
                match square {
                    Square::Empty => write!(f, ".")?,
                    Square::Occupied(player) => write!(f, "{player}")?,
                }
            }
        }
        Ok(())
    }
}
