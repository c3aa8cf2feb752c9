//! The three-step resolution pipeline over the GitHub REST API.

use serde::de::DeserializeOwned;

use super::control::parse_control;
use super::model::{
    find_metadata_file, find_version_entry, GitTree, Metadata, Resolution, Step1Result,
    Step2Result, Step3Result, VersionEntry, VersionsFile,
};
use super::purl::parse_package_url;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ports::{HttpClient, HttpRequest};

const RAW_ACCEPT: &str = "application/vnd.github.v3.raw";
const JSON_ACCEPT: &str = "application/vnd.github+json";

/// Where the registry lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// API base URL without trailing slash.
    pub api_base: String,
    /// Repository as `owner/name`.
    pub repo: String,
    /// Optional bearer token (raises GitHub's rate limit).
    pub token: Option<String>,
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self {
            api_base: config.github_api.clone(),
            repo: config.vcpkg_repo.clone(),
            token: config.github_token.clone(),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Looks up vcpkg port metadata. Holds no state between calls.
pub struct VcpkgService<'a> {
    http: &'a dyn HttpClient,
    settings: RegistrySettings,
}

impl<'a> VcpkgService<'a> {
    /// Creates a service issuing requests through `http`.
    #[must_use]
    pub fn new(http: &'a dyn HttpClient, settings: RegistrySettings) -> Self {
        Self { http, settings }
    }

    /// Fetches `versions/<first letter>-/<port>.json`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable port name, a failed request, a
    /// non-2xx status, or a body that is not a versions file.
    pub async fn fetch_versions(&self, port_name: &str) -> Result<VersionsFile> {
        let prefix = port_prefix(port_name)?;
        let url = self.repo_url(&format!("contents/versions/{prefix}-/{port_name}.json"));
        let body = self.fetch("versions", url, RAW_ACCEPT).await?;
        parse_json(&body, "versions file")
    }

    /// Fetches the git tree `sha`.
    ///
    /// # Errors
    ///
    /// Returns an error for a failed request, a non-2xx status, or an
    /// unexpected body.
    pub async fn fetch_git_tree(&self, sha: &str) -> Result<GitTree> {
        let url = self.repo_url(&format!("git/trees/{sha}"));
        let body = self.fetch("git tree", url, JSON_ACCEPT).await?;
        parse_json(&body, "git tree")
    }

    /// Fetches the raw text of blob `sha`.
    ///
    /// # Errors
    ///
    /// Returns an error for a failed request or a non-2xx status.
    pub async fn fetch_file_blob(&self, sha: &str) -> Result<String> {
        let url = self.repo_url(&format!("git/blobs/{sha}"));
        self.fetch("file blob", url, RAW_ACCEPT).await
    }

    /// Step 1: parse the purl and find its version's git tree.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid purl, a purl without version, a failed
    /// fetch, or a version the port never published.
    pub async fn execute_step1(&self, purl: &str) -> Result<Step1Result> {
        let parsed = parse_package_url(purl)?;
        let version = parsed.version.ok_or(Error::MissingVersion)?;

        let versions_file = self.fetch_versions(&parsed.name).await?;
        let entry = find_version_entry(&versions_file.versions, &version).ok_or_else(|| {
            Error::VersionNotFound { version: version.clone(), port: parsed.name.clone() }
        })?;
        tracing::debug!(port = %parsed.name, %version, git_tree = %entry.git_tree, "step 1 done");

        Ok(Step1Result {
            port_name: parsed.name,
            version,
            git_tree: entry.git_tree.clone(),
            all_versions: versions_file.versions,
        })
    }

    /// Step 2: list the git tree and pick out the metadata file.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be fetched.
    pub async fn execute_step2(&self, git_tree_sha: &str) -> Result<Step2Result> {
        let tree = self.fetch_git_tree(git_tree_sha).await?;
        if tree.truncated {
            tracing::warn!(sha = git_tree_sha, "git tree listing was truncated");
        }
        let metadata_file = find_metadata_file(&tree.tree).cloned();
        tracing::debug!(
            sha = git_tree_sha,
            entries = tree.tree.len(),
            metadata = metadata_file.as_ref().map_or("none", |f| f.path.as_str()),
            "step 2 done"
        );

        Ok(Step2Result {
            git_tree: git_tree_sha.to_string(),
            tree_entries: tree.tree,
            metadata_file,
        })
    }

    /// Step 3: fetch the metadata blob and parse it.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be fetched or a `vcpkg.json` is not JSON.
    pub async fn execute_step3(
        &self,
        metadata_file_sha: &str,
        file_name: &str,
    ) -> Result<Step3Result> {
        let content = self.fetch_file_blob(metadata_file_sha).await?;
        let metadata = parse_metadata(&content, file_name)?;
        tracing::debug!(file = file_name, name = ?metadata.name(), "step 3 done");

        Ok(Step3Result { metadata, raw_content: content, file_name: file_name.to_string() })
    }

    /// Runs steps 1 to 3.
    ///
    /// # Errors
    ///
    /// Returns the first step's error, or [`Error::MetadataFileNotFound`] when
    /// the tree holds neither `vcpkg.json` nor `CONTROL`.
    pub async fn resolve(&self, purl: &str) -> Result<Resolution> {
        let step1 = self.execute_step1(purl).await?;
        let step2 = self.execute_step2(&step1.git_tree).await?;
        let file = step2
            .metadata_file
            .clone()
            .ok_or_else(|| Error::MetadataFileNotFound(step2.git_tree.clone()))?;
        let step3 = self.execute_step3(&file.sha, &file.path).await?;
        Ok(Resolution { step1, step2, step3 })
    }

    /// Every published version of `port_name`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_versions`].
    pub async fn list_versions(&self, port_name: &str) -> Result<Vec<VersionEntry>> {
        Ok(self.fetch_versions(port_name).await?.versions)
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{path}", self.settings.api_base, self.settings.repo)
    }

    async fn fetch(&self, what: &'static str, url: String, accept: &str) -> Result<String> {
        let mut request = HttpRequest::get(url).header("Accept", accept);
        if let Some(token) = &self.settings.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = self
            .http
            .get(&request)
            .await
            .map_err(|e| Error::port(format!("Failed to fetch {what}"), e))?;

        if !response.is_success() {
            return Err(Error::HttpStatus {
                what,
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response.body)
    }
}

/// Parses a metadata file: `vcpkg.json` as JSON, anything else as CONTROL.
///
/// # Errors
///
/// Returns an error if a `vcpkg.json` is not a JSON object.
pub fn parse_metadata(content: &str, file_name: &str) -> Result<Metadata> {
    if file_name == "vcpkg.json" {
        parse_json(content, "vcpkg.json")
    } else {
        Ok(parse_control(content))
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::json(what, e))
}

/// First character of the port name, lowercased, after checking the name
/// can be used as a path segment.
fn port_prefix(port_name: &str) -> Result<char> {
    let valid = port_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    match port_name.chars().next() {
        Some(first) if valid && first.is_ascii_alphanumeric() => Ok(first.to_ascii_lowercase()),
        _ => Err(Error::InvalidPortName(port_name.to_string())),
    }
}
