//! Typed persistence adapter over a [`Storage`] backend.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{Storage, StoreError, StoreErrorKind};

/// Checks a key against `^[a-zA-Z_$][a-zA-Z0-9_$]*$`.
///
/// Keys double as identifiers and file names, so no whitespace or
/// punctuation other than `_` and `$`.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Describes a JSON value's kind for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Durably stores exactly one named value of type `T`.
///
/// Reads never fail: an absent record, an unparsable record, or a backend
/// fault all yield a clone of the default value. Writes, erases and clears
/// report backend faults as [`StoreError`]s.
///
/// Values are stored as JSON and must serialize to an object.
#[derive(Debug, Clone)]
pub struct PersistentStore<T, S> {
    storage: S,
    key: String,
    default: T,
}

impl<T, S> PersistentStore<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: Storage,
{
    /// Creates an adapter for `key` over `storage`.
    ///
    /// No storage access happens here beyond the availability check.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`StoreError`] if the backend is unavailable,
    /// the key is empty or malformed, or `default` does not serialize to an
    /// object.
    #[instrument(skip(storage, default))]
    pub fn new(storage: S, key: &str, default: T) -> Result<Self, StoreError> {
        if !storage.is_available() {
            warn!("Storage backend unavailable");
            return Err(StoreError::new(StoreErrorKind::Unsupported));
        }
        if key.is_empty() {
            return Err(StoreError::new(StoreErrorKind::MissingKey));
        }
        if !is_valid_key(key) {
            warn!("Rejected malformed storage key");
            return Err(StoreError::new(StoreErrorKind::InvalidKey(key.to_string())));
        }

        match serde_json::to_value(&default) {
            Ok(value) if value.is_object() => {}
            Ok(value) => {
                return Err(StoreError::new(StoreErrorKind::InvalidDefault(format!(
                    "serialized as {}",
                    kind_of(&value)
                ))));
            }
            Err(e) => {
                return Err(StoreError::new(StoreErrorKind::InvalidDefault(e.to_string())));
            }
        }

        debug!("Persistent store created");
        Ok(Self {
            storage,
            key: key.to_string(),
            default,
        })
    }

    /// Loads the stored value, falling back to the default.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn read(&self) -> T {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored record, using default");
                return self.default.clone();
            }
            Err(fault) => {
                warn!(%fault, "Storage read failed, using default");
                return self.default.clone();
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("Stored record is null, using default");
                self.default.clone()
            }
            Err(e) => {
                warn!(error = %e, "Stored record unparsable, using default");
                self.default.clone()
            }
        }
    }

    /// Serializes `value` and stores it under the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::InvalidValue`] if `value` does not
    /// serialize to an object, or [`StoreErrorKind::Write`] if the backend
    /// rejects the write (quota exceeded, storage disabled).
    #[instrument(skip(self, value), fields(key = %self.key))]
    pub fn write(&self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_value(value)
            .map_err(|e| StoreError::new(StoreErrorKind::InvalidValue(e.to_string())))?;
        if !json.is_object() {
            return Err(StoreError::new(StoreErrorKind::InvalidValue(format!(
                "serialized as {}",
                kind_of(&json)
            ))));
        }

        let raw = json.to_string();
        self.storage
            .set_item(&self.key, &raw)
            .map_err(|fault| StoreError::new(StoreErrorKind::Write(fault.message)))?;

        debug!(len = raw.len(), "Record written");
        Ok(())
    }

    /// Removes the stored record. Later reads yield the default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::Delete`] on backend failure.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn erase(&self) -> Result<(), StoreError> {
        self.storage
            .remove_item(&self.key)
            .map_err(|fault| StoreError::new(StoreErrorKind::Delete(fault.message)))?;
        info!("Record erased");
        Ok(())
    }

    /// Clears the entire namespace of `storage`, not just one key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::Clear`] on backend failure.
    #[instrument(skip_all)]
    pub fn clear_all(storage: &S) -> Result<(), StoreError> {
        storage
            .clear()
            .map_err(|fault| StoreError::new(StoreErrorKind::Clear(fault.message)))?;
        info!("Storage namespace cleared");
        Ok(())
    }

    /// Reports whether `storage` exists in the current environment.
    #[instrument(skip_all)]
    pub fn is_supported(storage: &S) -> bool {
        storage.is_available()
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }
}
