//! Per-port cassette configuration for composable replay.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Shared handle to a replayer, as held by replaying adapters.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Per-port cassette file paths. Ports left as `None` panic if called
/// during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// HTTP port cassette.
    pub http: Option<PathBuf>,
    /// Chat model port cassette.
    pub llm: Option<PathBuf>,
    /// Filesystem port cassette.
    pub fs: Option<PathBuf>,
    /// Clock port cassette.
    pub clock: Option<PathBuf>,
    /// ID generator port cassette.
    pub id_gen: Option<PathBuf>,
}

/// Loaded per-port replayers.
#[derive(Default)]
pub struct PortReplayers {
    /// Replayer for the HTTP port.
    pub http: Option<SharedReplayer>,
    /// Replayer for the chat model port.
    pub llm: Option<SharedReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<SharedReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<SharedReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<SharedReplayer>,
}

impl CassetteConfig {
    /// A config with no cassettes: every port panics when used.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Load one cassette file into a shared replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<SharedReplayer, String> {
        let cassette = Cassette::load(path)?;
        Ok(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    /// Load every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(Self::load_cassette).transpose();
        Ok(PortReplayers {
            http: load(&self.http)?,
            llm: load(&self.llm)?,
            fs: load(&self.fs)?,
            clock: load(&self.clock)?,
            id_gen: load(&self.id_gen)?,
        })
    }
}

impl PortReplayers {
    /// Serve every port from one monolithic cassette.
    #[must_use]
    pub fn monolithic(cassette: &Cassette) -> Self {
        let shared = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self {
            http: Some(Arc::clone(&shared)),
            llm: Some(Arc::clone(&shared)),
            fs: Some(Arc::clone(&shared)),
            clock: Some(Arc::clone(&shared)),
            id_gen: Some(shared),
        }
    }
}
