//! Relationship graph over string element ids.
//!
//! Edges are directed (`from → to`), deduplicated, and kept in insertion
//! order. Traversal is depth-bounded rather than cycle-checked: a cycle is
//! walked again on every pass until the depth limit cuts it off.

pub mod spdx;

use std::collections::HashMap;

pub use spdx::SpdxDocument;

/// Directed graph of element ids rooted at one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipGraph {
    root: String,
    edges: HashMap<String, Vec<String>>,
}

impl RelationshipGraph {
    /// Creates a graph containing only `root`.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut edges = HashMap::new();
        edges.insert(root.clone(), Vec::new());
        Self { root, edges }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Records `from → to`. Adding an existing edge again has no effect.
    pub fn add_relationship(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let to = to.into();
        let children = self.edges.entry(from.into()).or_default();
        if !children.contains(&to) {
            children.push(to);
        }
    }

    /// Direct children of `node`, in insertion order.
    #[must_use]
    pub fn children(&self, node: &str) -> &[String] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `node` has been added as a source of edges (or is the root).
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.edges.contains_key(node)
    }

    /// Number of nodes with an outgoing-edge entry (the root included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always `false`: a graph holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Depth-first pre-order walk from the root at level 0.
    ///
    /// `visit(node, parent)` is called for each node whose level is at most
    /// `max_level`; the root's parent is `None`.
    pub fn traverse<F>(&self, max_level: usize, mut visit: F)
    where
        F: FnMut(&str, Option<&str>),
    {
        self.traverse_from(&self.root, None, 0, max_level, &mut visit);
    }

    /// Depth-first pre-order walk from `node`, which sits at `level`.
    ///
    /// Uses an explicit stack, so the depth bound is limited by memory only.
    pub fn traverse_from<'a, F>(
        &'a self,
        node: &'a str,
        parent: Option<&'a str>,
        level: usize,
        max_level: usize,
        visit: &mut F,
    ) where
        F: FnMut(&str, Option<&str>),
    {
        let mut stack: Vec<(&str, Option<&str>, usize)> = vec![(node, parent, level)];
        while let Some((node, parent, level)) = stack.pop() {
            if level > max_level {
                continue;
            }
            visit(node, parent);
            // Reversed so the first child is popped first.
            for child in self.children(node).iter().rev() {
                stack.push((child.as_str(), Some(node), level + 1));
            }
        }
    }
}
