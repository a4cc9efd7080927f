//! Command execution against a file-backed game.

use anyhow::{Result, bail};
use strictly_storage::{FileStorage, PersistentStore, Storage};
use strictly_tictactoe::{Game, GameState, GameStatus, Position, Snapshot, Winner};
use tracing::{info, instrument, warn};

use crate::{Command, Settings};

/// Runs `command` with the game described by `settings`.
///
/// Returns the text to print.
///
/// # Errors
///
/// Fails on configuration errors, unknown positions, and storage
/// failures other than a lost save after a move.
#[instrument(skip(settings), fields(key = %settings.key()))]
pub fn execute(command: &Command, settings: &Settings) -> Result<String> {
    let storage = FileStorage::new(settings.storage_dir());

    match command {
        Command::ClearAll => {
            PersistentStore::<GameState, _>::clear_all(&storage)?;
            info!(root = %storage.root().display(), "All saved games erased");
            Ok(format!("Cleared {}", storage.root().display()))
        }
        Command::Show => {
            let game = Game::with_key(storage, settings.key())?;
            Ok(render(&game.snapshot()))
        }
        Command::Reset => {
            let mut game = Game::with_key(storage, settings.key())?;
            let snapshot = game.reset()?;
            Ok(format!("New game.\n{}", render(&snapshot)))
        }
        Command::Move { position } => {
            let mut game = Game::with_key(storage, settings.key())?;
            play_move(&mut game, position)
        }
    }
}

/// Applies a move given as an index or a label.
fn play_move<S: Storage>(game: &mut Game<S>, position: &str) -> Result<String> {
    let before = game.snapshot();

    let result = if let Ok(index) = position.trim().parse::<usize>() {
        game.apply_move(index)
    } else if let Some(pos) = Position::from_label_or_number(position) {
        game.play(pos)
    } else {
        bail!("Unknown position {:?}, expected 0-8 or a label like \"center\"", position);
    };

    let (snapshot, saved) = match result {
        Ok(snapshot) => (snapshot, true),
        Err(e) => {
            warn!(error = %e, "Move applied but not saved");
            (game.snapshot(), false)
        }
    };

    let mut out = String::new();
    if snapshot == before {
        out.push_str("Move ignored.\n");
    }
    if !saved {
        out.push_str("Warning: move could not be saved.\n");
    }
    out.push_str(&render(&snapshot));
    Ok(out)
}

/// Formats a snapshot for the terminal.
pub fn render(snapshot: &Snapshot) -> String {
    let line = match (snapshot.status(), snapshot.winner()) {
        (GameStatus::Won, Winner::Player(player)) => {
            format!("Winner: {} {}", player, player.symbol())
        }
        (GameStatus::Tied, _) => "Result: tie".to_string(),
        (status, _) => {
            let next = snapshot.current_player();
            format!("Status: {}\nNext: {} {}", status, next, next.symbol())
        }
    };
    format!("{}\n\n{}", snapshot.board().display(), line)
}
