//! Front end settings.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_tictactoe::GAME_KEY;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`Settings::storage_dir`].
pub const STORAGE_DIR_VAR: &str = "STRICTLY_GAMES_STORAGE_DIR";

/// Environment variable overriding [`Settings::key`].
pub const KEY_VAR: &str = "STRICTLY_GAMES_KEY";

/// Where the game is stored.
///
/// Resolved in layers: defaults, then an optional TOML file, then
/// environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one JSON file per storage key.
    storage_dir: PathBuf,

    /// Storage key of the game record.
    key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".strictly_games"),
            key: GAME_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. Missing fields take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(key = %settings.key, storage_dir = %settings.storage_dir.display(), "Settings loaded");
        Ok(settings)
    }

    /// Loads the file if given, then applies process environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(settings.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Applies overrides from an environment lookup. Empty values are ignored.
    #[instrument(skip(self, lookup))]
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        self.with_overrides(non_empty(STORAGE_DIR_VAR).map(PathBuf::from), non_empty(KEY_VAR))
    }

    /// Applies explicit overrides, typically from command-line flags.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, storage_dir: Option<PathBuf>, key: Option<String>) -> Self {
        if let Some(storage_dir) = storage_dir {
            self.storage_dir = storage_dir;
        }
        if let Some(key) = key {
            self.key = key;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
