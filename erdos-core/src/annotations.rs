//! Per-node annotations derived from analysis and traversal results.
//!
//! Annotations are what gets persisted next to the graph: the component each
//! node belongs to and, for every BFS source, the node's distance from that
//! source and its tree parent.

use std::collections::HashMap;

use crate::{
    analysis::Components,
    graph::{Attributes, Graph},
    node::{AttributeValue, NodeId},
    traversal::BfsForest,
};

/// Key holding the component index.
pub const COMPONENT_KEY: &str = "component_id";

/// Derived per-node key/value pairs, kept apart from the graph's own
/// attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAnnotations {
    entries: HashMap<NodeId, Attributes>,
}

impl NodeAnnotations {
    /// Annotations attached to `node`.
    #[must_use]
    pub fn get(&self, node: &NodeId) -> Option<&Attributes> {
        self.entries.get(node)
    }

    /// Single annotation value.
    #[must_use]
    pub fn value(&self, node: &NodeId, key: &str) -> Option<&AttributeValue> {
        self.entries.get(node).and_then(|values| values.get(key))
    }

    /// Number of annotated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no node carries an annotation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, node: &NodeId, key: String, value: AttributeValue) {
        self.entries
            .entry(node.clone())
            .or_default()
            .insert(key, value);
    }
}

/// Key holding the distance from `source`.
#[must_use]
pub fn distance_key(source: &NodeId) -> String {
    format!("distance_from_{source}")
}

/// Key holding the BFS-tree parent relative to `source`.
#[must_use]
pub fn parent_key(source: &NodeId) -> String {
    format!("parent_from_{source}")
}

/// Builds annotations for every node of `graph`.
///
/// Each node receives [`COMPONENT_KEY`]. For every traversed source `s`,
/// reached nodes receive `distance_from_{s}` and, except for `s` itself,
/// `parent_from_{s}`.
///
/// # Examples
/// ```
/// use erdos_core::{AttributeValue, Graph, NodeId, analyze, annotate, multi_source_bfs};
///
/// let mut graph = Graph::with_node_count(3);
/// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
/// let analysis = analyze(&graph);
/// let forest = multi_source_bfs(&graph, &[NodeId::Int(0)]);
/// let annotations = annotate(&graph, analysis.components(), Some(&forest));
///
/// let one = NodeId::Int(1);
/// assert_eq!(annotations.value(&one, "distance_from_0"), Some(&AttributeValue::Int(1)));
/// assert_eq!(annotations.value(&one, "parent_from_0"), Some(&AttributeValue::Int(0)));
/// assert_eq!(annotations.value(&NodeId::Int(2), "component_id"), Some(&AttributeValue::Int(1)));
/// # Ok::<(), erdos_core::GraphError>(())
/// ```
#[must_use]
pub fn annotate(
    graph: &Graph,
    components: &Components,
    forest: Option<&BfsForest>,
) -> NodeAnnotations {
    let mut annotations = NodeAnnotations::default();

    for node in graph.nodes() {
        if let Some(component) = components.component_of(node) {
            let component = i64::try_from(component).unwrap_or(i64::MAX);
            annotations.insert(node, COMPONENT_KEY.to_owned(), AttributeValue::Int(component));
        }
    }

    for result in forest.into_iter().flatten() {
        let distance = distance_key(result.source());
        let parent = parent_key(result.source());
        for node in result.visited() {
            if let Some(level) = result.level(node) {
                let level = i64::try_from(level).unwrap_or(i64::MAX);
                annotations.insert(node, distance.clone(), AttributeValue::Int(level));
            }
            if let Some(predecessor) = result.parent(node) {
                annotations.insert(node, parent.clone(), node_value(predecessor));
            }
        }
    }

    annotations
}

fn node_value(node: &NodeId) -> AttributeValue {
    match node {
        NodeId::Int(value) => AttributeValue::Int(*value),
        NodeId::Label(label) => AttributeValue::Text(label.clone()),
    }
}
