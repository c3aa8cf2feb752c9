//! Registry data shapes and the pure lookups over them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One published version of a port, from `versions/<x>-/<port>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionEntry {
    /// Relaxed version (`1.3.1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Date version (`2024-01-16`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_date: Option<String>,
    /// Semantic version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_semver: Option<String>,
    /// Free-form version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_string: Option<String>,
    /// Port revision; registries write it as a number, older files as a string.
    #[serde(
        default,
        deserialize_with = "deserialize_port_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_version: Option<u32>,
    /// Git tree object holding the port files for this version.
    pub git_tree: String,
}

impl VersionEntry {
    /// The version text, whichever of the four version fields is set.
    #[must_use]
    pub fn version_text(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.version_semver.as_deref())
            .or(self.version_date.as_deref())
            .or(self.version_string.as_deref())
    }

    /// `version#port-version` as vcpkg prints it (port-version 0 omitted).
    #[must_use]
    pub fn display_version(&self) -> String {
        let version = self.version_text().unwrap_or("?");
        match self.port_version {
            Some(port) if port > 0 => format!("{version}#{port}"),
            _ => version.to_string(),
        }
    }

    fn has_version(&self, target: &str) -> bool {
        [&self.version, &self.version_date, &self.version_semver, &self.version_string]
            .into_iter()
            .any(|v| v.as_deref() == Some(target))
    }
}

fn deserialize_port_version<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => {
            text.trim().parse().map(Some).map_err(serde::de::Error::custom)
        }
    }
}

/// A port's versions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsFile {
    /// Versions, newest first as the registry writes them.
    pub versions: Vec<VersionEntry>,
}

/// Git object kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// File.
    Blob,
    /// Directory.
    Tree,
    /// Submodule.
    Commit,
}

/// One entry of a git tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// File name within the tree.
    pub path: String,
    /// Git file mode (`100644`).
    pub mode: String,
    /// Object kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Object id.
    pub sha: String,
    /// Size in bytes, blobs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// API URL of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Response of `GET /repos/{repo}/git/trees/{sha}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitTree {
    /// Tree object id.
    pub sha: String,
    /// API URL of the tree.
    #[serde(default)]
    pub url: String,
    /// Entries.
    pub tree: Vec<TreeEntry>,
    /// Set when GitHub cut the listing short.
    #[serde(default)]
    pub truncated: bool,
}

/// Port metadata from `vcpkg.json` or `CONTROL`.
///
/// The document is kept as-is; accessors cover both the manifest field
/// names and the CONTROL ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub Map<String, Value>);

impl Metadata {
    /// Raw field lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.0.get(*key).and_then(Value::as_str))
            .find(|value| !value.is_empty())
    }

    /// Port name (`name`, or `Source` in CONTROL files).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.first_str(&["name", "Source"])
    }

    /// Version text from whichever version field is present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.first_str(&[
            "version",
            "version-semver",
            "version-date",
            "version-string",
            "Version",
        ])
    }

    /// Port revision, if recorded.
    #[must_use]
    pub fn port_version(&self) -> Option<u64> {
        match self.0.get("port-version").or_else(|| self.0.get("Port-Version"))? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Description; manifest arrays are joined with newlines.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        match self.0.get("description").or_else(|| self.0.get("Description"))? {
            Value::String(s) => Some(s.clone()),
            Value::Array(lines) => {
                Some(lines.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("\n"))
            }
            _ => None,
        }
    }

    /// Project homepage.
    #[must_use]
    pub fn homepage(&self) -> Option<&str> {
        self.first_str(&["homepage", "Homepage"])
    }

    /// SPDX license expression.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.first_str(&["license", "License"])
    }

    /// Names of the ports this one depends on.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        if let Some(Value::Array(deps)) = self.0.get("dependencies") {
            return deps
                .iter()
                .filter_map(|dep| match dep {
                    Value::String(name) => Some(name.clone()),
                    Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(String::from),
                    _ => None,
                })
                .collect();
        }
        self.0
            .get("Build-Depends")
            .and_then(Value::as_str)
            .map(split_build_depends)
            .unwrap_or_default()
    }

    /// Names of optional features.
    #[must_use]
    pub fn features(&self) -> Vec<String> {
        match self.0.get("features") {
            Some(Value::Object(features)) => features.keys().cloned().collect(),
            Some(Value::Array(features)) => features
                .iter()
                .filter_map(|f| f.get("name").and_then(Value::as_str).map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Splits a CONTROL `Build-Depends` list into port names, dropping
/// `[features]` and `(platform)` qualifiers.
#[must_use]
pub fn split_build_depends(list: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in list.chars() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_name(&mut names, &current);
                current.clear();
            }
            _ if depth == 0 => current.push(ch),
            _ => {}
        }
    }
    push_name(&mut names, &current);
    names
}

fn push_name(names: &mut Vec<String>, raw: &str) {
    let name = raw.trim();
    if !name.is_empty() {
        names.push(name.to_string());
    }
}

/// Finds the entry of `versions` matching `target`.
///
/// Matching order: `version#port` (both parts), then `version-date`, then
/// `port-version` as text, then `version`, then `version-semver`, then
/// `version-string`. The first entry satisfying the earliest rule wins.
#[must_use]
pub fn find_version_entry<'a>(
    versions: &'a [VersionEntry],
    target: &str,
) -> Option<&'a VersionEntry> {
    if let Some((version, port)) = target.rsplit_once('#') {
        if let Ok(port) = port.parse::<u32>() {
            let found = versions
                .iter()
                .find(|v| v.has_version(version) && v.port_version.unwrap_or(0) == port);
            if found.is_some() {
                return found;
            }
        }
    }

    versions
        .iter()
        .find(|v| v.version_date.as_deref() == Some(target))
        .or_else(|| {
            versions.iter().find(|v| v.port_version.is_some_and(|p| p.to_string() == target))
        })
        .or_else(|| versions.iter().find(|v| v.version.as_deref() == Some(target)))
        .or_else(|| versions.iter().find(|v| v.version_semver.as_deref() == Some(target)))
        .or_else(|| versions.iter().find(|v| v.version_string.as_deref() == Some(target)))
}

/// The `vcpkg.json` blob if present, else the `CONTROL` blob.
#[must_use]
pub fn find_metadata_file(entries: &[TreeEntry]) -> Option<&TreeEntry> {
    let blob = |name: &str| entries.iter().find(|e| e.path == name && e.kind == EntryKind::Blob);
    blob("vcpkg.json").or_else(|| blob("CONTROL"))
}

/// Outcome of step 1: the version lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step1Result {
    /// Port name from the purl.
    pub port_name: String,
    /// Version from the purl.
    pub version: String,
    /// Git tree of the matched version.
    pub git_tree: String,
    /// Every version in the versions file.
    pub all_versions: Vec<VersionEntry>,
}

/// Outcome of step 2: the git tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step2Result {
    /// Tree that was listed.
    pub git_tree: String,
    /// Its entries.
    pub tree_entries: Vec<TreeEntry>,
    /// The metadata file, if the tree has one.
    pub metadata_file: Option<TreeEntry>,
}

/// Outcome of step 3: the parsed metadata file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step3Result {
    /// Parsed metadata.
    pub metadata: Metadata,
    /// File text as fetched.
    pub raw_content: String,
    /// `vcpkg.json` or `CONTROL`.
    pub file_name: String,
}

/// All three steps of a resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Version lookup.
    pub step1: Step1Result,
    /// Tree listing.
    pub step2: Step2Result,
    /// Metadata.
    pub step3: Step3Result,
}
