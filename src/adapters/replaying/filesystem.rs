//! Replaying adapter for the `FileSystem` port.

use std::path::Path;

use super::{next_output, replay_result, replay_value};
use crate::cassette::config::SharedReplayer;
use crate::ports::{FileSystem, PortError};

/// Serves recorded filesystem results without touching disk.
pub struct ReplayingFileSystem {
    replayer: Option<SharedReplayer>,
}

impl ReplayingFileSystem {
    /// Backed by `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// No cassette; panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }

    fn output(&self, method: &str) -> serde_json::Value {
        next_output(self.replayer.as_ref(), "fs", method)
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        replay_result(self.output("read_to_string"))
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        replay_result(self.output("write"))
    }

    fn remove_file(&self, _path: &Path) -> Result<(), PortError> {
        replay_result(self.output("remove_file"))
    }

    fn exists(&self, _path: &Path) -> bool {
        replay_value(self.output("exists"), "fs::exists")
    }

    fn list_dir(&self, _path: &Path) -> Result<Vec<String>, PortError> {
        replay_result(self.output("list_dir"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::testing::replayer;

    #[test]
    fn replays_reads_errors_and_exists() {
        let fs = ReplayingFileSystem::new(replayer(vec![
            ("fs", "read_to_string", json!({"Ok": "contents"})),
            ("fs", "read_to_string", json!({"Err": "file not found"})),
            ("fs", "exists", json!(true)),
            ("fs", "write", json!({"Ok": null})),
        ]));

        assert_eq!(fs.read_to_string(Path::new("/a")).unwrap(), "contents");
        let err = fs.read_to_string(Path::new("/b")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
        assert!(fs.exists(Path::new("/a")));
        fs.write(Path::new("/a"), "x").unwrap();
    }
}
