//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name (`"http"`, `"llm"`, `"fs"`, `"clock"`, `"id_gen"`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Input passed to the port.
    pub input: serde_json::Value,
    /// Output returned by the port. Fallible methods use `{"Ok": v}` or `{"Err": msg}`.
    pub output: serde_json::Value,
}

/// An ordered sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Version of devdesk that recorded it.
    #[serde(default)]
    pub tool_version: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Loads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_tool_version_defaults_to_empty() {
        let yaml = "\
name: old
recorded_at: 2024-01-01T00:00:00Z
interactions:
  - seq: 0
    port: clock
    method: now
    input: {}
    output: 2024-01-01T00:00:00Z
";
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.tool_version, "");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].output, json!("2024-01-01T00:00:00Z"));
    }
}
