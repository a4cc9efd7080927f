//! The persisted game aggregate.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::rules;
use super::{Board, GameStatus, Player, Position, Square, Winner};

/// Complete game state, as persisted.
///
/// Serialized as a flat record
/// `{ "status", "currentPlayer", "board", "winner" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game status.
    status: GameStatus,
    /// Current player to move.
    current_player: Player,
    /// The board.
    board: Board,
    /// Who won, if anyone.
    winner: Winner,
}

impl GameState {
    /// Creates a new game: empty board, X to move, undecided.
    pub fn new() -> Self {
        Self {
            status: GameStatus::NotStarted,
            current_player: Player::X,
            board: Board::new(),
            winner: Winner::Undecided,
        }
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the winner.
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Computes the state after the current player marks `pos`.
    ///
    /// Unchecked: the caller guarantees `pos` is empty and the game is
    /// undecided.
    #[instrument(skip(self))]
    pub(crate) fn with_move(&self, pos: Position) -> Self {
        let mut board = self.board.clone();
        board.set(pos, Square::Occupied(self.current_player));

        let winner = rules::evaluate(&board);
        let status = rules::status_for(&board, winner);

        Self {
            status,
            current_player: self.current_player.opponent(),
            board,
            winner,
        }
    }

    /// True if this state is reachable by alternating play from a new game.
    ///
    /// Status and winner must agree with the board, the mark counts must
    /// allow X-first alternation, and the player to move must match them.
    #[instrument(skip(self))]
    pub fn is_consistent(&self) -> bool {
        let x = self.board.count(Player::X);
        let o = self.board.count(Player::O);
        let to_move = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return false;
        };

        let winner = rules::evaluate(&self.board);
        to_move == self.current_player
            && winner == self.winner
            && rules::status_for(&self.board, winner) == self.status
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
