//! Board coordinates.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// A cell on the board, `(row, col)` with both in `0..3`.
///
/// Out-of-range coordinates are a programming error: [`Coordinate::new`]
/// panics on them. Use [`Coordinate::try_new`] or [`FromStr`] for
/// untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// All nine coordinates in row-major order.
    pub const ALL: [Coordinate; 9] = [
        Coordinate::new(0, 0),
        Coordinate::new(0, 1),
        Coordinate::new(0, 2),
        Coordinate::new(1, 0),
        Coordinate::new(1, 1),
        Coordinate::new(1, 2),
        Coordinate::new(2, 0),
        Coordinate::new(2, 1),
        Coordinate::new(2, 2),
    ];

    /// Creates a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..3`.
    pub const fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "coordinate out of range"
        );
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    /// Creates a coordinate, returning `None` when out of range.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then(|| Self::new(row, col))
    }

    /// Row index.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error for coordinate input that is malformed or off the board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid coordinate {input:?}: expected \"row,col\" with both in 0..3")]
pub struct ParseCoordinateError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parses `"row,col"`, tolerating surrounding whitespace and parentheses.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = || ParseCoordinateError {
            input: s.to_string(),
        };
        let trimmed = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (row, col) = trimmed.split_once(',').ok_or_else(fail)?;
        let row = row.trim().parse::<usize>().map_err(|_| fail())?;
        let col = col.trim().parse::<usize>().map_err(|_| fail())?;
        Coordinate::try_new(row, col).ok_or_else(fail)
    }
}

impl TryFrom<(usize, usize)> for Coordinate {
    type Error = ParseCoordinateError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Coordinate::try_new(row, col).ok_or_else(|| ParseCoordinateError {
            input: format!("{row},{col}"),
        })
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(at: Coordinate) -> Self {
        (at.row(), at.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_row_major() {
        let indices: Vec<usize> = Coordinate::ALL.iter().map(|at| at.index()).collect();
        assert_eq!(indices, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_try_new_bounds() {
        assert!(Coordinate::try_new(2, 2).is_some());
        assert!(Coordinate::try_new(3, 0).is_none());
        assert!(Coordinate::try_new(0, 3).is_none());
    }

    #[test]
    #[should_panic(expected = "coordinate out of range")]
    fn test_new_out_of_range_panics() {
        let _ = Coordinate::new(3, 1);
    }

    #[test]
    fn test_parse() {
        assert_eq!("1,2".parse::<Coordinate>().unwrap(), Coordinate::new(1, 2));
        assert_eq!(" (0, 0) ".parse::<Coordinate>().unwrap(), Coordinate::new(0, 0));
        assert!("1;2".parse::<Coordinate>().is_err());
        assert!("1,3".parse::<Coordinate>().is_err());
        assert!("a,b".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let at: Coordinate = serde_json::from_str("[2,1]").unwrap();
        assert_eq!(at, Coordinate::new(2, 1));
        assert!(serde_json::from_str::<Coordinate>("[5,1]").is_err());
    }
}
