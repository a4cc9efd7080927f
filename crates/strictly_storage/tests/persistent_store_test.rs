//! Tests for the persistence adapter over in-memory and file backends.

use serde::{Deserialize, Serialize};
use strictly_storage::{
    FileStorage, MemoryStorage, PersistentStore, Storage, StorageFault, StoreError, StoreErrorKind,
};
use std::cell::Cell;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Save {
    player_name: String,
    lives: u32,
}

fn default_save() -> Save {
    Save {
        player_name: "Solid Snake".to_string(),
        lives: 100,
    }
}

/// Backend that counts every access, to prove construction stays hands-off.
#[derive(Debug, Default)]
struct CountingStorage {
    accesses: Cell<usize>,
}

impl Storage for CountingStorage {
    fn is_available(&self) -> bool {
        true
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageFault> {
        self.accesses.set(self.accesses.get() + 1);
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageFault> {
        self.accesses.set(self.accesses.get() + 1);
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageFault> {
        self.accesses.set(self.accesses.get() + 1);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageFault> {
        self.accesses.set(self.accesses.get() + 1);
        Ok(())
    }
}

#[test]
fn test_read_defaults_when_absent() {
    let store = PersistentStore::new(MemoryStorage::new(), "MetalGear", default_save())
        .expect("Valid store");
    assert_eq!(store.read(), default_save());
}

#[test]
fn test_write_then_read() {
    let store = PersistentStore::new(MemoryStorage::new(), "MetalGear", default_save())
        .expect("Valid store");
    let updated = Save {
        player_name: "Solid Snake".to_string(),
        lives: 80,
    };
    store.write(&updated).expect("Write failed");
    assert_eq!(store.read(), updated);
}

#[test]
fn test_erase_restores_default() {
    let storage = MemoryStorage::new();
    let store =
        PersistentStore::new(storage.clone(), "MetalGear", default_save()).expect("Valid store");
    store
        .write(&Save {
            player_name: "Otacon".to_string(),
            lives: 1,
        })
        .expect("Write failed");
    store.erase().expect("Erase failed");

    assert_eq!(store.read(), default_save());
    assert!(storage.get_item("MetalGear").unwrap().is_none());
}

#[test]
fn test_key_with_space_rejected_before_storage_access() {
    let storage = CountingStorage::default();
    let err = PersistentStore::new(&storage, "Tic Tac Toe", default_save())
        .expect_err("Key with space must be rejected");

    assert!(err.is_configuration());
    assert_eq!(err.kind(), &StoreErrorKind::InvalidKey("Tic Tac Toe".to_string()));
    assert_eq!(storage.accesses.get(), 0);
}

#[test]
fn test_empty_key_is_missing() {
    let err = PersistentStore::new(MemoryStorage::new(), "", default_save())
        .expect_err("Empty key must be rejected");
    assert_eq!(err.kind(), &StoreErrorKind::MissingKey);
}

#[test]
fn test_unavailable_storage_rejected() {
    let err = PersistentStore::new(MemoryStorage::unavailable(), "MetalGear", default_save())
        .expect_err("Unavailable storage must be rejected");
    assert_eq!(err.kind(), &StoreErrorKind::Unsupported);
    assert!(err.is_configuration());
}

#[test]
fn test_non_object_default_rejected() {
    let err = PersistentStore::new(MemoryStorage::new(), "Score", 42u32)
        .expect_err("Number default must be rejected");
    assert!(matches!(err.kind(), StoreErrorKind::InvalidDefault(_)));
    assert!(err.is_configuration());
}

#[test]
fn test_non_object_write_rejected() {
    let store: PersistentStore<Option<Save>, _> =
        PersistentStore::new(MemoryStorage::new(), "MaybeSave", Some(default_save()))
            .expect("Object default is accepted");
    let err = store.write(&None).expect_err("null is not an object");
    assert!(matches!(err.kind(), StoreErrorKind::InvalidValue(_)));
    assert!(!err.is_configuration());
}

#[test]
fn test_corrupt_record_falls_back() {
    let storage = MemoryStorage::new();
    storage.set_item("MetalGear", "{not json").unwrap();
    let store = PersistentStore::new(storage, "MetalGear", default_save()).expect("Valid store");
    assert_eq!(store.read(), default_save());
}

#[test]
fn test_wrong_shape_falls_back() {
    let storage = MemoryStorage::new();
    storage.set_item("MetalGear", r#"{"lives":"many"}"#).unwrap();
    let store = PersistentStore::new(storage, "MetalGear", default_save()).expect("Valid store");
    assert_eq!(store.read(), default_save());
}

#[test]
fn test_null_record_falls_back() {
    let storage = MemoryStorage::new();
    storage.set_item("MetalGear", "null").unwrap();
    let store = PersistentStore::new(storage, "MetalGear", default_save()).expect("Valid store");
    assert_eq!(store.read(), default_save());
}

#[test]
fn test_read_fault_falls_back() {
    let storage = MemoryStorage::new();
    let store =
        PersistentStore::new(storage.clone(), "MetalGear", default_save()).expect("Valid store");
    store
        .write(&Save {
            player_name: "Raiden".to_string(),
            lives: 3,
        })
        .expect("Write failed");

    storage.set_failing(true);
    assert_eq!(store.read(), default_save());
}

#[test]
fn test_write_fault_reported() {
    let storage = MemoryStorage::with_quota(16);
    let store = PersistentStore::new(storage, "MetalGear", default_save()).expect("Valid store");
    let err = store.write(&default_save()).expect_err("Quota must be exceeded");
    match err.kind() {
        StoreErrorKind::Write(cause) => assert!(cause.contains("QuotaExceeded")),
        other => panic!("Unexpected kind: {other:?}"),
    }
}

#[test]
fn test_delete_fault_reported() {
    let storage = MemoryStorage::new();
    let store =
        PersistentStore::new(storage.clone(), "MetalGear", default_save()).expect("Valid store");
    storage.set_failing(true);
    let err = store.erase().expect_err("Erase must fail");
    assert!(matches!(err.kind(), StoreErrorKind::Delete(_)));
}

#[test]
fn test_clear_all_wipes_every_key() {
    let storage = MemoryStorage::new();
    let a = PersistentStore::new(storage.clone(), "GameA", default_save()).expect("Valid store");
    let b = PersistentStore::new(storage.clone(), "GameB", default_save()).expect("Valid store");
    a.write(&default_save()).expect("Write failed");
    b.write(&default_save()).expect("Write failed");
    storage.set_item("unrelated", "1").unwrap();

    PersistentStore::<Save, _>::clear_all(&storage).expect("Clear failed");
    assert!(storage.is_empty());
}

#[test]
fn test_clear_all_fault_reported() {
    let storage = MemoryStorage::new();
    storage.set_failing(true);
    let err = PersistentStore::<Save, _>::clear_all(&storage).expect_err("Clear must fail");
    assert!(matches!(err.kind(), StoreErrorKind::Clear(_)));
}

#[test]
fn test_is_supported() {
    assert!(PersistentStore::<Save, _>::is_supported(&MemoryStorage::new()));
    assert!(!PersistentStore::<Save, _>::is_supported(&MemoryStorage::unavailable()));
}

#[test]
fn test_file_storage_survives_new_adapter() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let updated = Save {
        player_name: "Big Boss".to_string(),
        lives: 7,
    };

    {
        let store = PersistentStore::new(FileStorage::new(dir.path()), "MetalGear", default_save())
            .expect("Valid store");
        store.write(&updated).expect("Write failed");
    }

    let store = PersistentStore::new(FileStorage::new(dir.path()), "MetalGear", default_save())
        .expect("Valid store");
    assert_eq!(store.read(), updated);
    assert!(dir.path().join("MetalGear.json").is_file());
}

#[test]
fn test_file_storage_clear_and_erase() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = FileStorage::new(dir.path().join("nested"));
    let store =
        PersistentStore::new(storage.clone(), "MetalGear", default_save()).expect("Valid store");

    store.write(&default_save()).expect("Write failed");
    storage.set_item("Other", "{}").expect("Write failed");

    store.erase().expect("Erase failed");
    assert!(storage.get_item("MetalGear").unwrap().is_none());
    assert_eq!(storage.get_item("Other").unwrap().as_deref(), Some("{}"));

    PersistentStore::<Save, _>::clear_all(&storage).expect("Clear failed");
    assert!(storage.get_item("Other").unwrap().is_none());
}

#[test]
fn test_file_storage_unavailable_when_root_is_a_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").expect("Failed to write blocker");

    let err = PersistentStore::new(FileStorage::new(&blocker), "MetalGear", default_save())
        .expect_err("File root is not a namespace");
    assert_eq!(err.kind(), &StoreErrorKind::Unsupported);
}

#[test]
fn test_file_storage_nested_under_file_unavailable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").expect("Failed to write blocker");

    assert!(!FileStorage::new(blocker.join("saves")).is_available());
}

#[test]
fn test_missing_root_available_without_creating_it() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().join("saves").join("nested");
    let storage = FileStorage::new(&root);

    assert!(storage.is_available());
    let store =
        PersistentStore::new(storage, "MetalGear", default_save()).expect("Valid store");
    assert_eq!(store.read(), default_save());
    assert!(!dir.path().join("saves").exists());

    store.write(&default_save()).expect("Write failed");
    assert!(root.join("MetalGear.json").is_file());
}

#[test]
fn test_malformed_key_leaves_missing_root_untouched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().join("saves");

    for key in ["my game", ""] {
        let err = PersistentStore::new(FileStorage::new(&root), key, default_save())
            .expect_err("Malformed key must be rejected");
        assert!(err.is_configuration());
        assert!(!root.exists(), "Rejected key {key:?} created {}", root.display());
    }
}

#[test]
fn test_error_records_caller_location() {
    let line = line!() + 1;
    let err = StoreError::new(StoreErrorKind::MissingKey);
    assert!(err.file.ends_with("persistent_store_test.rs"), "{}", err.file);
    assert_eq!(err.line, line);
    assert!(err.to_string().contains("Missing storage key"));
}

#[test]
fn test_construction_error_located_in_adapter() {
    let err = PersistentStore::new(MemoryStorage::new(), "", default_save())
        .expect_err("Empty key must be rejected");
    assert!(err.file.ends_with("store.rs"), "{}", err.file);
    assert!(!err.file.ends_with("error.rs"));
}
