//! Game status and winner.

use serde::{Deserialize, Serialize};

use super::Player;

/// Current status of the game.
///
/// Serialized with the record names front ends already understand:
/// `NOT_STARTED`, `STARTED`, `GAME_WON`, `GAME_TIED`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GameStatus {
    /// No move has been made yet.
    #[default]
    #[serde(rename = "NOT_STARTED")]
    #[strum(to_string = "Not started")]
    NotStarted,
    /// At least one move made, game undecided.
    #[serde(rename = "STARTED")]
    #[strum(to_string = "In progress")]
    Started,
    /// A player completed a line.
    #[serde(rename = "GAME_WON")]
    #[strum(to_string = "Won")]
    Won,
    /// Board full with no line.
    #[serde(rename = "GAME_TIED")]
    #[strum(to_string = "Tied")]
    Tied,
}

/// Who won, if anyone.
///
/// Three distinct states: the game is still undecided, it ended in a
/// tie, or a player won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Game ongoing.
    #[default]
    Undecided,
    /// Board filled without a line.
    Tie,
    /// The player completed a line.
    Player(Player),
}

impl Winner {
    /// True once the game has ended either way.
    pub fn is_decided(self) -> bool {
        !matches!(self, Winner::Undecided)
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Undecided => write!(f, "none yet"),
            Winner::Tie => write!(f, "tie"),
            Winner::Player(player) => write!(f, "{}", player),
        }
    }
}
