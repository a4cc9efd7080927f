//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand};

/// Strictly Games - tic-tac-toe that remembers where you left off
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Tic-tac-toe with a persistent board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Directory holding saved games
    #[arg(long, global = true)]
    pub storage_dir: Option<std::path::PathBuf>,

    /// Storage key of the game to play
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the board and game status
    Show,

    /// Place the current player's mark
    Move {
        /// Square index (0-8) or label such as "center" or "top-left"
        position: String,
    },

    /// Start a new game and erase the saved one
    Reset,

    /// Erase every saved game in the storage directory
    ClearAll,
}
