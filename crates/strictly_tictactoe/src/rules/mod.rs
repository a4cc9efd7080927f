//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are separated from the
//! state machine so any board, reachable or not, can be classified.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WINNING_LINES, check_winner};

use super::{Board, GameStatus, Position, Winner};
use tracing::instrument;

/// Classifies a board as won, tied or undecided.
///
/// A complete line takes precedence over a full board.
#[instrument]
pub fn evaluate(board: &Board) -> Winner {
    if let Some(player) = check_winner(board) {
        Winner::Player(player)
    } else if is_full(board) {
        Winner::Tie
    } else {
        Winner::Undecided
    }
}

/// Derives the status for a board and its winner.
#[instrument]
pub fn status_for(board: &Board, winner: Winner) -> GameStatus {
    match winner {
        Winner::Player(_) => GameStatus::Won,
        Winner::Tie => GameStatus::Tied,
        Winner::Undecided if board.is_blank() => GameStatus::NotStarted,
        Winner::Undecided => GameStatus::Started,
    }
}

/// Returns the empty positions in index order.
#[instrument(skip(board))]
pub fn valid_moves(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}
