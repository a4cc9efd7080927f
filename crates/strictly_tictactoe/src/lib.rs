//! Strictly Tic-Tac-Toe - rules and turn management with persistent state
//!
//! # Architecture
//!
//! - **Rules**: pure functions classifying any board ([`rules`])
//! - **State**: the persisted aggregate ([`GameState`])
//! - **Game**: the turn state machine ([`Game`]), holding a
//!   [`PersistentStore`](strictly_storage::PersistentStore) by composition
//!
//! # Example
//!
//! ```
//! use strictly_storage::MemoryStorage;
//! use strictly_tictactoe::{Game, GameStatus, Player, Winner};
//!
//! # fn example() -> Result<(), strictly_storage::StoreError> {
//! let mut game = Game::new(MemoryStorage::new())?;
//! for index in [0, 1, 3, 4, 6] {
//!     game.apply_move(index)?;
//! }
//! assert_eq!(game.state().status(), GameStatus::Won);
//! assert_eq!(game.state().winner(), Winner::Player(Player::X));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod outcome;
mod position;
pub mod rules;
mod state;
mod types;

pub use game::{GAME_KEY, Game, Players, Snapshot};
pub use outcome::{GameStatus, Winner};
pub use position::Position;
pub use state::GameState;
pub use types::{Board, Player, Square};
