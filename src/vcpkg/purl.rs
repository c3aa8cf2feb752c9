//! Package URL parsing for the `vcpkg` type.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Components of a `pkg:vcpkg/...` package URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedPurl {
    /// Package type, always `vcpkg` after a successful parse.
    #[serde(rename = "type")]
    pub purl_type: String,
    /// Segments between the type and the name, joined with `/`.
    pub namespace: Option<String>,
    /// Port name.
    pub name: String,
    /// Requested version, if any.
    pub version: Option<String>,
    /// `?key=value` qualifiers, keys lowercased.
    pub qualifiers: BTreeMap<String, String>,
    /// `#sub/path` suffix.
    pub subpath: Option<String>,
}

/// Parses `pkg:vcpkg/[namespace/]name[@version][?qualifiers][#subpath]`.
///
/// The `pkg:` scheme is optional.
///
/// # Errors
///
/// Returns [`Error::InvalidPurlType`] for any type other than `vcpkg` and
/// [`Error::InvalidPurlFormat`] when the name is missing.
pub fn parse_package_url(purl: &str) -> Result<ParsedPurl> {
    let cleaned = purl.trim();
    let cleaned = cleaned.strip_prefix("pkg:").unwrap_or(cleaned);

    let (cleaned, subpath) = match cleaned.split_once('#') {
        Some((head, sub)) => {
            let sub = sub.trim_matches('/');
            (head, (!sub.is_empty()).then(|| percent_decode(sub)))
        }
        None => (cleaned, None),
    };
    let (cleaned, qualifiers) = match cleaned.split_once('?') {
        Some((head, query)) => (head, parse_qualifiers(query)),
        None => (cleaned, BTreeMap::new()),
    };

    let (purl_type, rest) = cleaned.split_once('/').unwrap_or((cleaned, ""));
    if purl_type != "vcpkg" {
        return Err(Error::InvalidPurlType(purl_type.to_string()));
    }

    let rest = rest.trim_matches('/');
    if rest.is_empty() {
        return Err(Error::InvalidPurlFormat);
    }

    let (path, version) = match rest.split_once('@') {
        Some((path, version)) => (path, Some(version)),
        None => (rest, None),
    };
    let (namespace, name) = match path.rsplit_once('/') {
        Some((ns, name)) => (Some(ns), name),
        None => (None, path),
    };
    if name.is_empty() {
        return Err(Error::InvalidPurlFormat);
    }

    Ok(ParsedPurl {
        purl_type: "vcpkg".to_string(),
        namespace: namespace.filter(|ns| !ns.is_empty()).map(percent_decode),
        name: percent_decode(name),
        version: version.filter(|v| !v.is_empty()).map(percent_decode),
        qualifiers,
        subpath,
    })
}

fn parse_qualifiers(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_ascii_lowercase(), percent_decode(value)))
        .collect()
}

/// Decodes `%XX` escapes; input that does not decode to UTF-8 is kept as written.
fn percent_decode(input: &str) -> String {
    urlencoding::decode(input).map_or_else(|_| input.to_string(), Cow::into_owned)
}
