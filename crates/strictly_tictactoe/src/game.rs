//! Turn management over persisted game state.

use derive_getters::Getters;
use serde::Serialize;
use strictly_storage::{PersistentStore, Storage, StoreError};
use tracing::{debug, info, instrument, warn};

use super::{Board, GameState, GameStatus, Player, Position, Winner};

/// Storage key for the game record.
pub const GAME_KEY: &str = "TicTacToeGame";

/// The two marks, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct Players {
    /// Moves first.
    first: Player,
    /// Moves second.
    second: Player,
}

impl Default for Players {
    fn default() -> Self {
        Self {
            first: Player::X,
            second: Player::O,
        }
    }
}

/// Everything a front end needs to render the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Game status.
    status: GameStatus,
    /// The board.
    board: Board,
    /// Player to move next.
    current_player: Player,
    /// Who won, if anyone.
    winner: Winner,
    /// The two marks.
    players: Players,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            status: state.status(),
            board: state.board().clone(),
            current_player: state.current_player(),
            winner: state.winner(),
            players: Players::default(),
        }
    }
}

/// Tic-tac-toe game engine.
///
/// Owns the authoritative [`GameState`] and keeps a persisted copy in a
/// [`PersistentStore`] so the game survives restarts. Rejected moves are
/// silent no-ops: they return the current snapshot and write nothing.
#[derive(Debug, Clone)]
pub struct Game<S> {
    store: PersistentStore<GameState, S>,
    state: GameState,
}

impl<S: Storage> Game<S> {
    /// Opens the game stored under [`GAME_KEY`], or starts a new one.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`StoreError`] if `storage` is unavailable.
    #[instrument(skip(storage))]
    pub fn new(storage: S) -> Result<Self, StoreError> {
        Self::with_key(storage, GAME_KEY)
    }

    /// Opens the game stored under `key`, or starts a new one.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`StoreError`] if `storage` is unavailable
    /// or `key` is malformed.
    #[instrument(skip(storage))]
    pub fn with_key(storage: S, key: &str) -> Result<Self, StoreError> {
        let store = PersistentStore::new(storage, key, GameState::new())?;
        let state = store.read();

        let state = if state.is_consistent() {
            state
        } else {
            warn!(?state, "Stored game is not a reachable position, starting fresh");
            GameState::new()
        };

        info!(
            key,
            status = %state.status(),
            current_player = %state.current_player(),
            "Game loaded"
        );
        Ok(Self { store, state })
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the observable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Returns the storage key of this game.
    pub fn key(&self) -> &str {
        self.store.key()
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// An index outside the board is ignored like an occupied square.
    ///
    /// # Errors
    ///
    /// See [`Game::play`].
    #[instrument(skip(self), fields(key = %self.store.key()))]
    pub fn apply_move(&mut self, index: usize) -> Result<Snapshot, StoreError> {
        match Position::from_index(index) {
            Some(pos) => self.play(pos),
            None => {
                debug!(index, "Index off the board, ignoring move");
                Ok(self.snapshot())
            }
        }
    }

    /// Places the current player's mark at `pos`.
    ///
    /// Does nothing if the square is occupied or the game is decided.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the new state could not be persisted.
    /// The move is still applied in memory.
    #[instrument(skip(self), fields(key = %self.store.key()))]
    pub fn play(&mut self, pos: Position) -> Result<Snapshot, StoreError> {
        if self.state.winner().is_decided() {
            debug!(winner = %self.state.winner(), "Game already decided, ignoring move");
            return Ok(self.snapshot());
        }
        if !self.state.board().is_empty(pos) {
            debug!(%pos, "Square occupied, ignoring move");
            return Ok(self.snapshot());
        }

        let player = self.state.current_player();
        self.state = self.state.with_move(pos);

        info!(
            %player,
            %pos,
            status = %self.state.status(),
            winner = %self.state.winner(),
            "Move applied"
        );

        self.store.write(&self.state)?;
        Ok(self.snapshot())
    }

    /// Starts a new game and erases the persisted record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the record could not be erased. The
    /// in-memory game is reset regardless.
    #[instrument(skip(self), fields(key = %self.store.key()))]
    pub fn reset(&mut self) -> Result<Snapshot, StoreError> {
        self.state = GameState::new();
        info!("Game reset");
        self.store.erase()?;
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_storage::MemoryStorage;

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new(MemoryStorage::new()).expect("Valid game");
        let snapshot = game.snapshot();
        assert_eq!(*snapshot.status(), GameStatus::NotStarted);
        assert_eq!(*snapshot.current_player(), Player::X);
        assert_eq!(*snapshot.winner(), Winner::Undecided);
        assert!(snapshot.board().is_blank());
        assert_eq!(*snapshot.players().first(), Player::X);
        assert_eq!(*snapshot.players().second(), Player::O);
        assert_eq!(game.key(), GAME_KEY);
    }

    #[test]
    fn test_off_board_index_is_ignored() {
        let storage = MemoryStorage::new();
        let mut game = Game::new(storage.clone()).expect("Valid game");
        let before = game.snapshot();
        assert_eq!(game.apply_move(9).expect("No-op"), before);
        assert!(storage.is_empty());
    }
}
