//! Local key-value storage.
//!
//! String values keyed by name, one file per key, all I/O through the
//! `FileSystem` port:
//!
//! ```text
//! <root>/
//!   └── local-storage/
//!         ├── work-logs
//!         └── ...
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ports::FileSystem;

const DIR: &str = "local-storage";

/// A persistent string-to-string map.
pub struct LocalStorage<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
}

impl<'a> LocalStorage<'a> {
    /// Storage under `<root>/local-storage`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: &Path) -> Self {
        Self { fs, dir: root.join(DIR) }
    }

    /// Value stored under `key`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid key or an unreadable file.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        self.fs
            .read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::port(format!("Failed to read storage key {key}"), e))
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid key or a failed write.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        self.fs
            .write(&path, value)
            .map_err(|e| Error::port(format!("Failed to write storage key {key}"), e))
    }

    /// Deletes `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid key or a failed removal.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        self.fs
            .remove_file(&path)
            .map_err(|e| Error::port(format!("Failed to remove storage key {key}"), e))
    }

    /// All stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be listed.
    pub fn keys(&self) -> Result<Vec<String>> {
        if !self.fs.exists(&self.dir) {
            return Ok(Vec::new());
        }
        let names = self
            .fs
            .list_dir(&self.dir)
            .map_err(|e| Error::port("Failed to list storage", e))?;
        Ok(names.into_iter().filter(|name| valid_key(name)).collect())
    }

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or any removal fails.
    pub fn clear(&self) -> Result<()> {
        for key in self.keys()? {
            self.remove_item(&key)?;
        }
        Ok(())
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        if valid_key(key) {
            Ok(self.dir.join(key))
        } else {
            Err(Error::InvalidStorageKey(key.to_string()))
        }
    }
}

fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::ports::PortError;

    /// In-memory filesystem for exercising storage without touching disk.
    #[derive(Default)]
    pub(crate) struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> std::result::Result<String, PortError> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn write(&self, path: &Path, contents: &str) -> std::result::Result<(), PortError> {
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn remove_file(&self, path: &Path) -> std::result::Result<(), PortError> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            let files = self.files.lock().unwrap();
            files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
        }

        fn list_dir(&self, path: &Path) -> std::result::Result<Vec<String>, PortError> {
            let files = self.files.lock().unwrap();
            let mut names: Vec<String> = files
                .keys()
                .filter(|k| k.parent() == Some(path))
                .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect();
            names.sort();
            Ok(names)
        }
    }

    #[test]
    fn set_get_remove() {
        let fs = MemFs::default();
        let storage = LocalStorage::new(&fs, Path::new("/desk"));

        assert_eq!(storage.get_item("theme").unwrap(), None);
        storage.set_item("theme", "dark").unwrap();
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert!(fs.exists(Path::new("/desk/local-storage/theme")));

        storage.remove_item("theme").unwrap();
        assert_eq!(storage.get_item("theme").unwrap(), None);
        storage.remove_item("theme").unwrap();
    }

    #[test]
    fn keys_and_clear() {
        let fs = MemFs::default();
        let storage = LocalStorage::new(&fs, Path::new("/desk"));
        assert!(storage.keys().unwrap().is_empty());

        storage.set_item("b", "2").unwrap();
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let fs = MemFs::default();
        let storage = LocalStorage::new(&fs, Path::new("/desk"));
        for key in ["", "../x", "a/b", ".hidden", "sp ace"] {
            let err = storage.set_item(key, "v").unwrap_err();
            assert!(matches!(err, Error::InvalidStorageKey(_)), "{key:?}");
        }
    }
}
