//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first (existing
//! variables win), then each setting falls back to its default.

use std::path::PathBuf;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
/// Default vcpkg registry repository (`owner/name`).
pub const DEFAULT_VCPKG_REPO: &str = "microsoft/vcpkg";
/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "mistral/ministral-8b";
/// Default store directory, relative to the working directory.
pub const DEFAULT_STORE: &str = ".devdesk";

/// Resolved settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of the local key-value store.
    pub store_root: PathBuf,
    /// GitHub REST API base URL, without trailing slash.
    pub github_api: String,
    /// vcpkg registry repository as `owner/name`.
    pub vcpkg_repo: String,
    /// Optional GitHub token sent as a bearer token.
    pub github_token: Option<String>,
    /// Chat completions endpoint.
    pub chat_url: String,
    /// Chat model identifier.
    pub chat_model: String,
    /// API key for the chat endpoint.
    pub chat_api_key: Option<String>,
    /// When set, port interactions are recorded under this directory.
    pub record_dir: Option<PathBuf>,
    /// When set, port interactions are replayed from this cassette.
    pub replay_cassette: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            store_root: PathBuf::from(get("DEVDESK_STORE").unwrap_or_else(|| DEFAULT_STORE.into())),
            github_api: get("DEVDESK_GITHUB_API")
                .unwrap_or_else(|| DEFAULT_GITHUB_API.into())
                .trim_end_matches('/')
                .to_string(),
            vcpkg_repo: get("DEVDESK_VCPKG_REPO").unwrap_or_else(|| DEFAULT_VCPKG_REPO.into()),
            github_token: get("GITHUB_TOKEN"),
            chat_url: get("DEVDESK_CHAT_URL").unwrap_or_else(|| DEFAULT_CHAT_URL.into()),
            chat_model: get("DEVDESK_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.into()),
            chat_api_key: get("OPENROUTER_API_KEY"),
            record_dir: get("DEVDESK_RECORD").map(PathBuf::from),
            replay_cassette: get("DEVDESK_REPLAY").map(PathBuf::from),
        }
    }
}
