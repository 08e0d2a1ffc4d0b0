//! Win detection.

use crate::coordinate::Coordinate;
use crate::types::{Board, Player, Square};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Lines are scanned row `l` then column `l` for `l` in `0..3`, then the
/// main diagonal, then the anti-diagonal. The first complete line wins.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Player> {
    let line = |cells: [(usize, usize); 3]| {
        let [a, b, c] = cells.map(|(row, col)| board.get(Coordinate::new(row, col)));
        match a {
            Square::Occupied(player) if a == b && a == c => Some(player),
            _ => None,
        }
    };

    for l in 0..3 {
        if let Some(player) = line([(l, 0), (l, 1), (l, 2)]) {
            return Some(player);
        }
        if let Some(player) = line([(0, l), (1, l), (2, l)]) {
            return Some(player);
        }
    }

    line([(0, 0), (1, 1), (2, 2)]).or_else(|| line([(0, 2), (1, 1), (2, 0)]))
}
