//! Building a [`RelationshipGraph`] from an SPDX 2.x JSON document.

use std::collections::HashMap;

use serde::Deserialize;

use super::RelationshipGraph;
use crate::error::{Error, Result};

/// The subset of an SPDX JSON document used to build a graph.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDocument {
    /// Document element id, normally `SPDXRef-DOCUMENT`.
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// Elements the document describes.
    #[serde(default)]
    pub document_describes: Vec<String>,
    /// Packages listed in the document.
    #[serde(default)]
    pub packages: Vec<SpdxPackage>,
    /// Relationships between elements.
    #[serde(default)]
    pub relationships: Vec<SpdxRelationship>,
}

/// A package entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxPackage {
    /// Element id.
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    /// Package name.
    pub name: String,
    /// Package version, if recorded.
    #[serde(default)]
    pub version_info: Option<String>,
}

/// A relationship entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxRelationship {
    /// Source element.
    pub spdx_element_id: String,
    /// Target element.
    pub related_spdx_element: String,
    /// Relationship kind, e.g. `DEPENDS_ON`.
    pub relationship_type: String,
}

impl SpdxDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid SPDX JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json("SPDX document", e))
    }

    /// Graph rooted at the document: one edge per relationship plus one per
    /// `documentDescribes` entry.
    #[must_use]
    pub fn to_graph(&self) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new(&self.spdx_id);
        for described in &self.document_describes {
            graph.add_relationship(&self.spdx_id, described);
        }
        for rel in &self.relationships {
            graph.add_relationship(&rel.spdx_element_id, &rel.related_spdx_element);
        }
        graph
    }

    /// Display labels (`name@version`) keyed by element id.
    #[must_use]
    pub fn labels(&self) -> HashMap<&str, String> {
        let mut labels: HashMap<&str, String> = self
            .packages
            .iter()
            .map(|p| {
                let label = match &p.version_info {
                    Some(v) if !v.is_empty() => format!("{}@{v}", p.name),
                    _ => p.name.clone(),
                };
                (p.spdx_id.as_str(), label)
            })
            .collect();
        if !self.name.is_empty() {
            labels.insert(self.spdx_id.as_str(), self.name.clone());
        }
        labels
    }
}

impl RelationshipGraph {
    /// Shorthand for [`SpdxDocument::to_graph`].
    #[must_use]
    pub fn from_spdx(document: &SpdxDocument) -> Self {
        document.to_graph()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SBOM: &str = r#"{
        "spdxVersion": "SPDX-2.3",
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": "demo-sbom",
        "documentDescribes": ["SPDXRef-app"],
        "packages": [
            {"SPDXID": "SPDXRef-app", "name": "app", "versionInfo": "1.0.0"},
            {"SPDXID": "SPDXRef-zlib", "name": "zlib", "versionInfo": "1.3"},
            {"SPDXID": "SPDXRef-fmt", "name": "fmt"}
        ],
        "relationships": [
            {"spdxElementId": "SPDXRef-DOCUMENT", "relatedSpdxElement": "SPDXRef-app",
             "relationshipType": "DESCRIBES"},
            {"spdxElementId": "SPDXRef-app", "relatedSpdxElement": "SPDXRef-zlib",
             "relationshipType": "DEPENDS_ON"},
            {"spdxElementId": "SPDXRef-app", "relatedSpdxElement": "SPDXRef-fmt",
             "relationshipType": "DEPENDS_ON"}
        ]
    }"#;

    #[test]
    fn builds_graph_from_relationships() {
        let doc = SpdxDocument::from_json(SBOM).unwrap();
        let graph = RelationshipGraph::from_spdx(&doc);

        assert_eq!(graph.root(), "SPDXRef-DOCUMENT");
        assert_eq!(graph.children("SPDXRef-DOCUMENT"), ["SPDXRef-app".to_string()]);
        assert_eq!(
            graph.children("SPDXRef-app"),
            ["SPDXRef-zlib".to_string(), "SPDXRef-fmt".to_string()]
        );
    }

    #[test]
    fn labels_use_name_and_version() {
        let doc = SpdxDocument::from_json(SBOM).unwrap();
        let labels = doc.labels();
        assert_eq!(labels["SPDXRef-zlib"], "zlib@1.3");
        assert_eq!(labels["SPDXRef-fmt"], "fmt");
        assert_eq!(labels["SPDXRef-DOCUMENT"], "demo-sbom");
    }

    #[test]
    fn rejects_non_spdx_json() {
        let err = SpdxDocument::from_json(r#"{"hello": 1}"#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse SPDX document"));
    }
}
