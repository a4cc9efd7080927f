//! Storage backend contract.

use crate::StorageFault;

/// A string-keyed, string-valued persistent namespace.
///
/// This is the shape of browser local storage: every key lives in one
/// shared namespace, values are opaque strings, and all access is
/// synchronous. Implementations decide where the bytes actually go.
///
/// Backends are passed into [`PersistentStore`](crate::PersistentStore)
/// rather than looked up globally, so tests can substitute
/// [`MemoryStorage`](crate::MemoryStorage).
pub trait Storage {
    /// Reports whether the mechanism exists in the current environment.
    fn is_available(&self) -> bool;

    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageFault>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageFault>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageFault>;

    /// Removes every key in the namespace.
    fn clear(&self) -> Result<(), StorageFault>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StorageFault> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageFault> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageFault> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageFault> {
        (**self).clear()
    }
}
