//! Live filesystem adapter using `std::fs`.

use std::io::ErrorKind;
use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            if let Some(name) = entry?.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_list_remove() {
        let dir = std::env::temp_dir().join("devdesk_live_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        let file = dir.join("sub").join("b.txt");

        LiveFileSystem.write(&file, "hello").unwrap();
        LiveFileSystem.write(&dir.join("sub").join("a.txt"), "x").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&file).unwrap(), "hello");
        assert_eq!(LiveFileSystem.list_dir(&dir.join("sub")).unwrap(), vec!["a.txt", "b.txt"]);

        LiveFileSystem.remove_file(&file).unwrap();
        assert!(!LiveFileSystem.exists(&file));
        LiveFileSystem.remove_file(&file).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
