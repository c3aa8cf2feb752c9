//! Recording session with one cassette recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Shared handle to a recorder, as held by recording adapters.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders writing into a timestamped directory.
pub struct RecordingSession {
    /// Recorder for HTTP interactions.
    pub http: SharedRecorder,
    /// Recorder for chat model interactions.
    pub llm: SharedRecorder,
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    /// Recorder for ID generator interactions.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<base>/<timestamp>/<port>.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self {
            http: make_recorder("http"),
            llm: make_recorder("llm"),
            fs: make_recorder("fs"),
            clock: make_recorder("clock"),
            id_gen: make_recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port cassette that recorded at least one interaction.
    ///
    /// All adapters holding recorders must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(shared: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                return Ok(());
            }
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.http, "http")?;
        finish_one(self.llm, "llm")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.clock, "clock")?;
        finish_one(self.id_gen, "id_gen")?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_only_ports_that_were_used() {
        let base = std::env::temp_dir().join("devdesk_session_test");
        let session = RecordingSession::new(&base).unwrap();
        assert!(session.output_dir().exists());

        session.clock.lock().unwrap().record("clock", "now", json!(null), json!("t"));

        let dir = session.finish().unwrap();
        assert!(dir.join("clock.cassette.yaml").exists());
        assert!(!dir.join("http.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn finish_fails_while_recorder_is_shared() {
        let base = std::env::temp_dir().join("devdesk_session_shared_test");
        let session = RecordingSession::new(&base).unwrap();
        let _held = Arc::clone(&session.llm);

        let err = session.finish().unwrap_err();
        assert!(err.contains("llm still has references"));

        let _ = std::fs::remove_dir_all(&base);
    }
}
