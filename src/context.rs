//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{
    LiveClock, LiveFileSystem, LiveHttpClient, LiveIdGenerator, LiveLlmClient,
};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingHttpClient, RecordingIdGenerator,
    RecordingLlmClient,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingHttpClient, ReplayingIdGenerator,
    ReplayingLlmClient,
};
use crate::cassette::config::{CassetteConfig, PortReplayers};
use crate::cassette::format::Cassette;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::ports::{Clock, FileSystem, HttpClient, IdGenerator, LlmClient};

/// Bundles one implementation of every port.
///
/// Constructors wire up live, recording or replaying adapters; the
/// utilities only ever see the trait objects.
pub struct ServiceContext {
    /// Clock for timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem behind the local key-value store.
    pub fs: Box<dyn FileSystem>,
    /// HTTP client for the GitHub API.
    pub http: Box<dyn HttpClient>,
    /// ID generator for stored records.
    pub id_gen: Box<dyn IdGenerator>,
    /// Chat-completion client.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Real adapters for every port.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            http: Box::new(LiveHttpClient::new()),
            id_gen: Box::new(LiveIdGenerator),
            llm: Box::new(LiveLlmClient::new(&config.chat_url, config.chat_api_key.clone())),
        }
    }

    /// Live adapters wrapped in recorders writing under `dir`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(config: &Config, dir: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let live = Self::live(config);
        let ctx = Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(live.fs, Arc::clone(&session.fs))),
            http: Box::new(RecordingHttpClient::new(live.http, Arc::clone(&session.http))),
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, Arc::clone(&session.id_gen))),
            llm: Box::new(RecordingLlmClient::new(live.llm, Arc::clone(&session.llm))),
        };
        Ok((ctx, session))
    }

    /// Every port served from one monolithic cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::from_replayers(PortReplayers::monolithic(&cassette)))
    }

    /// Ports served from per-port cassettes; unconfigured ports panic when used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        Ok(Self::from_replayers(config.load_all()?))
    }

    fn from_replayers(replayers: PortReplayers) -> Self {
        Self {
            clock: Box::new(
                replayers.clock.map_or_else(ReplayingClock::unconfigured, ReplayingClock::new),
            ),
            fs: Box::new(
                replayers
                    .fs
                    .map_or_else(ReplayingFileSystem::unconfigured, ReplayingFileSystem::new),
            ),
            http: Box::new(
                replayers
                    .http
                    .map_or_else(ReplayingHttpClient::unconfigured, ReplayingHttpClient::new),
            ),
            id_gen: Box::new(
                replayers
                    .id_gen
                    .map_or_else(ReplayingIdGenerator::unconfigured, ReplayingIdGenerator::new),
            ),
            llm: Box::new(
                replayers
                    .llm
                    .map_or_else(ReplayingLlmClient::unconfigured, ReplayingLlmClient::new),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::cassette::format::Interaction;
    use crate::ports::HttpRequest;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn replaying_context_from_monolithic_cassette() {
        let dir = std::env::temp_dir().join("devdesk_ctx_test_mono");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");
        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "http".into(),
                    method: "get".into(),
                    input: json!({"url": "https://api.github.com/x"}),
                    output: json!({"Ok": {"status": 404, "status_text": "Not Found", "body": ""}}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let response = ctx.http.get(&HttpRequest::get("https://api.github.com/x")).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified()).unwrap();
        let _ = ctx.clock.now();
    }

    #[test]
    fn recording_context_writes_used_ports() {
        let base = std::env::temp_dir().join("devdesk_ctx_test_recording");
        let (ctx, session) = ServiceContext::recording_at(&Config::default(), &base).unwrap();
        let _ = ctx.id_gen.generate_id();
        drop(ctx);

        let dir = session.finish().unwrap();
        assert!(dir.join("id_gen.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&base);
    }
}
