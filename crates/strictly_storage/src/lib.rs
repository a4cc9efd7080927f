//! Strictly Storage - persistence adapter for browser-style key-value storage
//!
//! A [`Storage`] backend is a flat namespace of string keys and string
//! values. [`PersistentStore`] sits on top of one and stores a single typed
//! value under a validated key, falling back to a default whenever the
//! stored record is missing or unreadable.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use strictly_storage::{MemoryStorage, PersistentStore};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Save {
//!     lives: u32,
//! }
//!
//! # fn example() -> Result<(), strictly_storage::StoreError> {
//! let store = PersistentStore::new(MemoryStorage::new(), "MetalGear", Save { lives: 100 })?;
//! assert_eq!(store.read(), Save { lives: 100 });
//!
//! store.write(&Save { lives: 80 })?;
//! assert_eq!(store.read(), Save { lives: 80 });
//!
//! store.erase()?;
//! assert_eq!(store.read(), Save { lives: 100 });
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod error;
mod file;
mod memory;
mod store;

pub use backend::Storage;
pub use error::{StorageFault, StoreError, StoreErrorKind};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{PersistentStore, is_valid_key};
