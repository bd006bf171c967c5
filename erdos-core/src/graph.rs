//! In-memory simple undirected graph.
//!
//! Nodes are stored densely in insertion order; every algorithm in the crate
//! works on those dense indices and translates back to [`NodeId`]s at the
//! boundary. Adjacency sets are ordered by insertion index, so neighbour
//! enumeration is deterministic for a given construction sequence.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    Result,
    error::GraphError,
    node::{AttributeValue, NodeId},
};

/// Attribute map attached to each node.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Simple undirected graph: no self-loops and no parallel edges.
///
/// # Examples
/// ```
/// use erdos_core::{Graph, NodeId};
///
/// let mut graph = Graph::with_node_count(3);
/// assert!(graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?);
/// assert!(!graph.add_edge(&NodeId::Int(1), &NodeId::Int(0))?);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.degree(&NodeId::Int(2)), Some(0));
/// # Ok::<(), erdos_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<BTreeSet<usize>>,
    attributes: Vec<Attributes>,
    edge_count: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with nodes `0..count` and no edges.
    #[must_use]
    pub fn with_node_count(count: usize) -> Self {
        let mut graph = Self {
            ids: Vec::with_capacity(count),
            index: HashMap::with_capacity(count),
            adjacency: Vec::with_capacity(count),
            attributes: Vec::with_capacity(count),
            edge_count: 0,
        };
        for id in 0..count {
            graph.add_node(NodeId::from(id));
        }
        graph
    }

    /// Inserts `id`, returning `false` when it was already present.
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let position = self.ids.len();
        self.index.insert(id.clone(), position);
        self.ids.push(id);
        self.adjacency.push(BTreeSet::new());
        self.attributes.push(Attributes::new());
        true
    }

    /// Connects `left` and `right`, returning `false` when the edge already
    /// exists in either orientation.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when an endpoint is missing and
    /// [`GraphError::SelfLoop`] when both endpoints are the same node.
    pub fn add_edge(&mut self, left: &NodeId, right: &NodeId) -> Result<bool> {
        let left_index = self.require(left)?;
        let right_index = self.require(right)?;
        self.add_edge_by_index(left_index, right_index)
    }

    fn add_edge_by_index(&mut self, left: usize, right: usize) -> Result<bool> {
        if left == right {
            return Err(GraphError::SelfLoop {
                node: self.node_at(left).clone(),
            });
        }
        Ok(self.connect_distinct(left, right))
    }

    /// Links two distinct dense indices. Callers guarantee `left != right`.
    pub(crate) fn connect_distinct(&mut self, left: usize, right: usize) -> bool {
        debug_assert_ne!(left, right);
        let inserted = self
            .adjacency
            .get_mut(left)
            .is_some_and(|neighbours| neighbours.insert(right));
        if !inserted {
            return false;
        }
        if let Some(neighbours) = self.adjacency.get_mut(right) {
            neighbours.insert(left);
        }
        self.edge_count += 1;
        true
    }

    /// Returns whether `id` is a node of the graph.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns whether `left` and `right` are adjacent.
    #[must_use]
    pub fn contains_edge(&self, left: &NodeId, right: &NodeId) -> bool {
        match (self.index_of(left), self.index_of(right)) {
            (Some(l), Some(r)) => self
                .adjacency
                .get(l)
                .is_some_and(|neighbours| neighbours.contains(&r)),
            _ => false,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Degree of `id`, or `None` when the node is absent.
    #[must_use]
    pub fn degree(&self, id: &NodeId) -> Option<usize> {
        self.index_of(id).map(|index| self.degree_at(index))
    }

    /// Neighbours of `id` in adjacency order, or `None` when the node is
    /// absent.
    pub fn neighbours(&self, id: &NodeId) -> Option<impl Iterator<Item = &NodeId> + '_> {
        let index = self.index_of(id)?;
        Some(self.neighbour_indices(index).map(|n| self.node_at(n)))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.ids.iter()
    }

    /// Every edge exactly once; the first endpoint is the earlier-inserted
    /// node.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> + '_ {
        self.edge_indices()
            .map(|(left, right)| (self.node_at(left), self.node_at(right)))
    }

    /// Stores `value` under `key` on node `id`, returning the previous value.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when `id` is absent.
    pub fn set_attribute(
        &mut self,
        id: &NodeId,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<Option<AttributeValue>> {
        let index = self.require(id)?;
        Ok(self
            .attributes
            .get_mut(index)
            .and_then(|attributes| attributes.insert(key.into(), value.into())))
    }

    /// Looks up attribute `key` on node `id`.
    #[must_use]
    pub fn attribute(&self, id: &NodeId, key: &str) -> Option<&AttributeValue> {
        self.attributes(id)?.get(key)
    }

    /// All attributes of node `id`.
    #[must_use]
    pub fn attributes(&self, id: &NodeId) -> Option<&Attributes> {
        self.index_of(id).and_then(|index| self.attributes.get(index))
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the identifier stored at a dense index.
    ///
    /// Indices come from this graph's own enumeration, so they are always in
    /// range.
    pub(crate) fn node_at(&self, index: usize) -> &NodeId {
        &self.ids[index]
    }

    pub(crate) fn degree_at(&self, index: usize) -> usize {
        self.adjacency.get(index).map_or(0, BTreeSet::len)
    }

    pub(crate) fn neighbour_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(index).into_iter().flatten().copied()
    }

    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(left, neighbours)| {
                neighbours
                    .range(left + 1..)
                    .map(move |&right| (left, right))
            })
    }

    fn require(&self, id: &NodeId) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| GraphError::UnknownNode { node: id.clone() })
    }
}
