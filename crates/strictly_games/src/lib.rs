//! Strictly Games - terminal front end for persistent tic-tac-toe
//!
//! The game logic lives in `strictly_tictactoe`; this crate only parses
//! commands, resolves settings and prints the board.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;

pub use cli::{Cli, Command};
pub use commands::{execute, render};
pub use config::{ConfigError, KEY_VAR, STORAGE_DIR_VAR, Settings};
