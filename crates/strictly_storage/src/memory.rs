//! In-process storage backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument, warn};

use crate::{Storage, StorageFault};

/// In-memory [`Storage`] implementation.
///
/// Clones share one namespace, the same way every script on a page shares
/// one local storage. Besides plain storage it can simulate the failures a
/// browser produces: a missing storage object, a full quota, or storage
/// disabled mid-session.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug)]
struct MemoryInner {
    items: BTreeMap<String, String>,
    available: bool,
    failing: bool,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty, available namespace with no quota.
    #[instrument]
    pub fn new() -> Self {
        Self::from_inner(MemoryInner {
            items: BTreeMap::new(),
            available: true,
            failing: false,
            quota: None,
        })
    }

    /// Creates a namespace that reports itself as unavailable.
    #[instrument]
    pub fn unavailable() -> Self {
        Self::from_inner(MemoryInner {
            items: BTreeMap::new(),
            available: false,
            failing: false,
            quota: None,
        })
    }

    /// Creates a namespace limited to `bytes` of keys plus values.
    #[instrument]
    pub fn with_quota(bytes: usize) -> Self {
        Self::from_inner(MemoryInner {
            items: BTreeMap::new(),
            available: true,
            failing: false,
            quota: Some(bytes),
        })
    }

    fn from_inner(inner: MemoryInner) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Makes every subsequent operation fail (or succeed again).
    #[instrument(skip(self))]
    pub fn set_failing(&self, failing: bool) {
        match self.inner.lock() {
            Ok(mut inner) => inner.failing = failing,
            Err(_) => warn!("Memory storage lock poisoned"),
        }
    }

    /// Number of keys currently stored.
    #[instrument(skip(self))]
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.items.len()).unwrap_or(0)
    }

    /// True if no keys are stored.
    #[instrument(skip(self))]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locks the namespace for an operation, honouring the failure switch.
    fn lock(&self, op: &str) -> Result<MutexGuard<'_, MemoryInner>, StorageFault> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StorageFault::new("Memory storage lock poisoned"))?;
        if !inner.available {
            return Err(StorageFault::new(format!("{}: storage is not available", op)));
        }
        if inner.failing {
            return Err(StorageFault::new(format!("{}: storage is disabled", op)));
        }
        Ok(inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn is_available(&self) -> bool {
        self.inner.lock().map(|inner| inner.available).unwrap_or(false)
    }

    #[instrument(skip(self))]
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageFault> {
        let inner = self.lock("getItem")?;
        Ok(inner.items.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageFault> {
        let mut inner = self.lock("setItem")?;

        if let Some(quota) = inner.quota {
            let used: usize = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > quota {
                warn!(needed, quota, "Quota exceeded");
                return Err(StorageFault::new(format!(
                    "QuotaExceededError: {} bytes needed, quota is {}",
                    needed, quota
                )));
            }
        }

        inner.items.insert(key.to_string(), value.to_string());
        debug!("Item stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove_item(&self, key: &str) -> Result<(), StorageFault> {
        let mut inner = self.lock("removeItem")?;
        inner.items.remove(key);
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<(), StorageFault> {
        let mut inner = self.lock("clear")?;
        let count = inner.items.len();
        inner.items.clear();
        debug!(count, "Namespace cleared");
        Ok(())
    }
}
