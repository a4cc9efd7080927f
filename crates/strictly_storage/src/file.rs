//! Directory-backed storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{Storage, StorageFault};

/// File extension for stored items.
const ITEM_EXTENSION: &str = "json";

/// [`Storage`] backed by a directory, one `<key>.json` file per key.
///
/// The backend is available when the root is a directory, or when it is
/// missing and its nearest existing ancestor is a directory. Checking
/// availability never touches the filesystem; the root is created by the
/// first write.
///
/// The directory is the namespace: [`Storage::clear`] removes every item
/// file in it. Writes go through a temporary file and a rename so a crash
/// never leaves a half-written record behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `root`. The directory is created lazily.
    #[instrument(skip(root), fields(root = %root.as_ref().display()))]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the namespace directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageFault> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageFault::new(format!("Key {:?} is not a valid file name", key)));
        }
        Ok(self.root.join(format!("{}.{}", key, ITEM_EXTENSION)))
    }
}

impl Storage for FileStorage {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn is_available(&self) -> bool {
        if self.root.exists() {
            return self.root.is_dir();
        }
        // Missing root: usable if its nearest existing ancestor is a directory.
        self.root
            .ancestors()
            .skip(1)
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                }
            })
            .find(|dir| dir.exists())
            .is_some_and(Path::is_dir)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageFault> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No item file");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(root = %self.root.display(), len = value.len()))]
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageFault> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        let tmp = path.with_extension(format!("{}.tmp", ITEM_EXTENSION));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), "Item written");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove_item(&self, key: &str) -> Result<(), StorageFault> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn clear(&self) -> Result<(), StorageFault> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == ITEM_EXTENSION) {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        info!(removed, "Storage directory cleared");
        Ok(())
    }
}
