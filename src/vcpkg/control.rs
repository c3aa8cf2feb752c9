//! Parser for the legacy `CONTROL` metadata format.
//!
//! ```text
//! Source: curl
//! Version: 7.68.0
//! Build-Depends: zlib
//! Description: A library for transferring data with URLs
//!   over many protocols
//!
//! Feature: ssl
//! Description: SSL support
//! Build-Depends: openssl
//! ```
//!
//! The first paragraph holds the port's fields. Later paragraphs with a
//! `Feature` key describe features and are collected under `features`;
//! any other later paragraph is merged into the top level.

use serde_json::{json, Map, Value};

use super::model::{split_build_depends, Metadata};

/// Parses CONTROL text. Unrecognised lines are skipped, so this never fails.
#[must_use]
pub fn parse_control(content: &str) -> Metadata {
    let mut top = Map::new();
    let mut features = Map::new();

    for (index, paragraph) in paragraphs(content).into_iter().enumerate() {
        match paragraph.get("Feature").and_then(Value::as_str) {
            Some(feature) if index > 0 => {
                let description =
                    paragraph.get("Description").and_then(Value::as_str).unwrap_or_default();
                let dependencies = paragraph
                    .get("Build-Depends")
                    .and_then(Value::as_str)
                    .map(split_build_depends)
                    .unwrap_or_default();
                features.insert(
                    feature.to_string(),
                    json!({ "description": description, "dependencies": dependencies }),
                );
            }
            _ => top.extend(paragraph),
        }
    }

    if !features.is_empty() {
        top.insert("features".to_string(), Value::Object(features));
    }
    Metadata(top)
}

/// Splits the text into blank-line separated paragraphs of `Key: value` fields.
fn paragraphs(content: &str) -> Vec<Map<String, Value>> {
    let mut paragraphs = Vec::new();
    let mut current = Map::new();
    let mut current_key: Option<String> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            current_key = None;
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        let continues = line.starts_with([' ', '\t']);
        if let (true, Some(key)) = (continues, current_key.as_deref()) {
            if let Some(Value::String(value)) = current.get_mut(key) {
                value.push(' ');
                value.push_str(trimmed);
            }
            continue;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                current.insert(key.to_string(), Value::String(value.trim().to_string()));
                current_key = Some(key.to_string());
            }
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURL_CONTROL: &str = "\
# generated
Source: curl
Version: 7.68.0
Port-Version: 2
Build-Depends: zlib
Description: A library for transferring data with URLs
  over many protocols
Homepage: https://curl.se

Feature: ssl
Description: SSL support
Build-Depends: openssl (!windows)

Feature: http2
Description: HTTP2 support
Build-Depends: nghttp2, curl[ssl]
";

    #[test]
    fn reads_top_level_fields() {
        let metadata = parse_control(CURL_CONTROL);
        assert_eq!(metadata.name(), Some("curl"));
        assert_eq!(metadata.version(), Some("7.68.0"));
        assert_eq!(metadata.port_version(), Some(2));
        assert_eq!(metadata.homepage(), Some("https://curl.se"));
        assert_eq!(metadata.dependencies(), vec!["zlib"]);
    }

    #[test]
    fn continuation_lines_join_with_a_space() {
        let metadata = parse_control(CURL_CONTROL);
        assert_eq!(
            metadata.description().unwrap(),
            "A library for transferring data with URLs over many protocols"
        );
    }

    #[test]
    fn feature_paragraphs_become_features() {
        let metadata = parse_control(CURL_CONTROL);
        assert_eq!(metadata.features(), vec!["http2", "ssl"]);
        let http2 = &metadata.get("features").unwrap()["http2"];
        assert_eq!(http2["description"], "HTTP2 support");
        assert_eq!(http2["dependencies"], serde_json::json!(["nghttp2", "curl"]));
    }

    #[test]
    fn value_may_contain_colons() {
        let metadata = parse_control("Source: x\nHomepage: https://example.com:8443/x\n");
        assert_eq!(metadata.homepage(), Some("https://example.com:8443/x"));
    }

    #[test]
    fn lines_without_key_are_ignored() {
        let metadata = parse_control(":orphan\nno colon here\nSource: y\n");
        assert_eq!(metadata.0.len(), 1);
        assert_eq!(metadata.name(), Some("y"));
    }

    #[test]
    fn leading_continuation_without_key_is_parsed_as_field() {
        let metadata = parse_control("  Source: z\n");
        assert_eq!(metadata.name(), Some("z"));
    }
}
