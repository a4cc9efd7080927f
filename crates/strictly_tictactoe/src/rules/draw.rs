//! Full-board detection, the tie half of [`evaluate`](super::evaluate).

use super::super::{Board, Square};
use tracing::instrument;

/// True when no empty square remains. Says nothing about lines.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}
