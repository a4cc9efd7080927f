//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Failure reported by a storage backend, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage fault: {} at {}:{}", message, file, line)]
pub struct StorageFault {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageFault {
    /// Creates a new storage fault with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StorageFault {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// What went wrong in a [`PersistentStore`](crate::PersistentStore) operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreErrorKind {
    /// The storage backend does not exist in this environment.
    #[display("Storage is not supported in this environment")]
    Unsupported,

    /// The key was empty.
    #[display("Missing storage key")]
    MissingKey,

    /// The key does not match `^[a-zA-Z_$][a-zA-Z0-9_$]*$`.
    #[display("Invalid format for storage key {:?}", _0)]
    InvalidKey(String),

    /// The default value does not serialize to an object.
    #[display("Invalid default state, must be an object: {}", _0)]
    InvalidDefault(String),

    /// A value passed to `write` does not serialize to an object.
    #[display("Invalid updated state, must be an object: {}", _0)]
    InvalidValue(String),

    /// The backend rejected a write.
    #[display("Failed to set the state in storage: {}", _0)]
    Write(String),

    /// The backend rejected a delete.
    #[display("Failed to delete the state from storage: {}", _0)]
    Delete(String),

    /// The backend failed to clear its namespace.
    #[display("Failed to clear storage: {}", _0)]
    Clear(String),
}

/// Error raised by the persistence adapter, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", kind, file, line)]
pub struct StoreError {
    /// Error kind.
    pub kind: StoreErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: StoreErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }

    /// True for errors raised while constructing an adapter.
    ///
    /// These are fatal and should not be retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::Unsupported
                | StoreErrorKind::MissingKey
                | StoreErrorKind::InvalidKey(_)
                | StoreErrorKind::InvalidDefault(_)
        )
    }
}

impl From<StoreErrorKind> for StoreError {
    #[track_caller]
    fn from(kind: StoreErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_kinds() {
        assert!(StoreError::new(StoreErrorKind::Unsupported).is_configuration());
        assert!(StoreError::new(StoreErrorKind::MissingKey).is_configuration());
        assert!(StoreError::new(StoreErrorKind::InvalidKey("a b".into())).is_configuration());
        assert!(!StoreError::new(StoreErrorKind::Write("full".into())).is_configuration());
        assert!(!StoreError::new(StoreErrorKind::Clear("nope".into())).is_configuration());
    }
}
