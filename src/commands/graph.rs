//! `devdesk graph` command.

use std::collections::HashMap;
use std::path::Path;

use crate::context::ServiceContext;
use crate::graph::spdx::SpdxDocument;
use crate::graph::RelationshipGraph;

/// Execute the `graph` command.
///
/// Reads an SPDX JSON document and prints its relationship tree down to
/// `depth` levels below the document root.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn run(ctx: &ServiceContext, file: &Path, depth: usize) -> Result<(), String> {
    let text = ctx
        .fs
        .read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let document = SpdxDocument::from_json(&text).map_err(|e| e.to_string())?;
    let graph = RelationshipGraph::from_spdx(&document);
    tracing::info!(nodes = graph.len(), depth, "loaded SPDX graph");

    print!("{}", render_tree(&graph, &document.labels(), depth));
    Ok(())
}

/// One line per visited node, indented two spaces per level.
fn render_tree(graph: &RelationshipGraph, labels: &HashMap<&str, String>, depth: usize) -> String {
    let mut out = String::new();
    let mut path: Vec<String> = Vec::new();

    graph.traverse(depth, |node, parent| {
        // Pre-order: the parent is always the nearest matching ancestor on the path.
        while path.last().map(String::as_str) != parent && !path.is_empty() {
            path.pop();
        }
        let label = labels.get(node).map_or(node, String::as_str);
        out.push_str(&"  ".repeat(path.len()));
        out.push_str(label);
        out.push('\n');
        path.push(node.to_string());
    });
    out
}
