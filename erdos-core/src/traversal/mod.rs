//! Breadth-first traversal from one or more sources.
//!
//! [`multi_source_bfs`] runs an independent FIFO traversal per source and
//! collects the per-source [`BfsResult`]s into a [`BfsForest`]. Missing
//! sources are skipped with a warning; they never abort the remaining
//! traversals.
//!
//! Neighbours are expanded in the graph's adjacency order. Levels are
//! independent of that order, but when several shortest paths exist the
//! recorded parent (and therefore the reconstructed path) is whichever
//! neighbour discovered the node first.

use std::collections::{HashMap, VecDeque};

use tracing::{info, instrument, warn};

use crate::{graph::Graph, node::NodeId};

/// Outcome of a single-source breadth-first traversal.
///
/// # Examples
/// ```
/// use erdos_core::{Graph, NodeId, multi_source_bfs};
///
/// let mut graph = Graph::with_node_count(3);
/// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
/// let forest = multi_source_bfs(&graph, &[NodeId::Int(0)]);
/// let result = forest.get(&NodeId::Int(0)).expect("source was traversed");
/// assert_eq!(result.reachable_count(), 2);
/// assert_eq!(result.level(&NodeId::Int(1)), Some(1));
/// assert!(!result.is_visited(&NodeId::Int(2)));
/// # Ok::<(), erdos_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsResult {
    source: NodeId,
    order: Vec<NodeId>,
    parent: HashMap<NodeId, Option<NodeId>>,
    level: HashMap<NodeId, usize>,
}

impl BfsResult {
    /// Node the traversal started from.
    #[must_use]
    pub const fn source(&self) -> &NodeId {
        &self.source
    }

    /// Visited nodes in discovery order, starting with the source.
    pub fn visited(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.order.iter()
    }

    /// Whether `node` was reached from the source.
    #[must_use]
    pub fn is_visited(&self, node: &NodeId) -> bool {
        self.level.contains_key(node)
    }

    /// Number of reached nodes, the source included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.order.len()
    }

    /// Hop distance from the source, or `None` when `node` was not reached.
    #[must_use]
    pub fn level(&self, node: &NodeId) -> Option<usize> {
        self.level.get(node).copied()
    }

    /// Predecessor of `node` on its BFS path. `None` for the source and for
    /// unreached nodes.
    #[must_use]
    pub fn parent(&self, node: &NodeId) -> Option<&NodeId> {
        self.parent.get(node).and_then(Option::as_ref)
    }

    /// Greatest level reached, i.e. the source's eccentricity within its
    /// component.
    #[must_use]
    pub fn eccentricity(&self) -> usize {
        self.level.values().copied().max().unwrap_or(0)
    }

    /// BFS tree edges as `(parent, child)` pairs in discovery order.
    pub fn tree_edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> + '_ {
        self.order
            .iter()
            .filter_map(|node| self.parent(node).map(|parent| (parent, node)))
    }

    /// Reconstructs the shortest path from the source to `target`.
    ///
    /// Returns `None` when `target` was not reached.
    #[must_use]
    pub fn path_to(&self, target: &NodeId) -> Option<Vec<NodeId>> {
        let depth = self.level(target)?;
        let mut path = Vec::with_capacity(depth + 1);
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node.clone());
            current = self.parent(node);
        }
        path.reverse();
        Some(path)
    }
}

/// Per-source traversal results from one [`multi_source_bfs`] invocation.
///
/// Results keep the order in which sources were first listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BfsForest {
    results: Vec<BfsResult>,
    positions: HashMap<NodeId, usize>,
    skipped: Vec<NodeId>,
}

impl BfsForest {
    /// Result for `source`, if a traversal was run from it.
    #[must_use]
    pub fn get(&self, source: &NodeId) -> Option<&BfsResult> {
        self.positions
            .get(source)
            .and_then(|&position| self.results.get(position))
    }

    /// Shortest path from `source` to `target`.
    ///
    /// Returns `None` when no traversal was run from `source` or `target`
    /// is unreachable from it.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::{Graph, NodeId, multi_source_bfs};
    ///
    /// let mut graph = Graph::with_node_count(4);
    /// for (l, r) in [(0, 1), (1, 2), (2, 3)] {
    ///     graph.add_edge(&NodeId::Int(l), &NodeId::Int(r))?;
    /// }
    /// let forest = multi_source_bfs(&graph, &[NodeId::Int(0)]);
    /// let path = forest.path(&NodeId::Int(0), &NodeId::Int(3));
    /// assert_eq!(path, Some((0..4).map(NodeId::Int).collect()));
    /// assert_eq!(forest.path(&NodeId::Int(1), &NodeId::Int(3)), None);
    /// # Ok::<(), erdos_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn path(&self, source: &NodeId, target: &NodeId) -> Option<Vec<NodeId>> {
        self.get(source)?.path_to(target)
    }

    /// Results in source order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BfsResult> + '_ {
        self.results.iter()
    }

    /// Sources that were traversed, in order.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.results.iter().map(BfsResult::source)
    }

    /// Sources skipped because they are not in the graph.
    #[must_use]
    pub fn skipped(&self) -> &[NodeId] {
        &self.skipped
    }

    /// Number of traversed sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no source was traversed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a BfsForest {
    type Item = &'a BfsResult;
    type IntoIter = std::slice::Iter<'a, BfsResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Runs a breadth-first traversal from every source in `sources`.
///
/// An empty `sources` slice yields an empty forest. Sources absent from the
/// graph are skipped with a warning and listed in [`BfsForest::skipped`].
/// Repeated sources are traversed once.
#[instrument(name = "core.multi_source_bfs", skip_all, fields(sources = sources.len()))]
pub fn multi_source_bfs(graph: &Graph, sources: &[NodeId]) -> BfsForest {
    let mut forest = BfsForest::default();
    if sources.is_empty() {
        warn!("no source nodes provided for BFS");
        return forest;
    }

    for source in sources {
        if forest.positions.contains_key(source) {
            continue;
        }
        let Some(start) = graph.index_of(source) else {
            warn!(source = %source, "source node not in graph, skipping");
            forest.skipped.push(source.clone());
            continue;
        };
        let result = traverse(graph, start);
        info!(
            source = %source,
            reached = result.reachable_count(),
            eccentricity = result.eccentricity(),
            "bfs completed"
        );
        forest.positions.insert(source.clone(), forest.results.len());
        forest.results.push(result);
    }
    forest
}

fn traverse(graph: &Graph, start: usize) -> BfsResult {
    let mut levels = LevelScan::new(graph.node_count());
    let mut parents: Vec<Option<usize>> = vec![None; graph.node_count()];
    levels.run(graph, start, |node, parent| {
        if let Some(slot) = parents.get_mut(node) {
            *slot = Some(parent);
        }
    });
    let order = levels.order();

    let mut parent = HashMap::with_capacity(order.len());
    let mut level = HashMap::with_capacity(order.len());
    for &node in order {
        let id = graph.node_at(node).clone();
        let predecessor = parents
            .get(node)
            .copied()
            .flatten()
            .map(|p| graph.node_at(p).clone());
        parent.insert(id.clone(), predecessor);
        level.insert(id, levels.level(node).unwrap_or(0));
    }

    BfsResult {
        source: graph.node_at(start).clone(),
        order: order.iter().map(|&n| graph.node_at(n).clone()).collect(),
        parent,
        level,
    }
}

/// Reusable index-based BFS used by the traversal and analysis passes.
///
/// Keeps its level, queue and visit-order buffers between runs so all-pairs
/// scans allocate once.
#[derive(Debug)]
pub(crate) struct LevelScan {
    level: Vec<Option<usize>>,
    queue: VecDeque<usize>,
    order: Vec<usize>,
}

impl LevelScan {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            level: vec![None; node_count],
            queue: VecDeque::with_capacity(node_count),
            order: Vec::with_capacity(node_count),
        }
    }

    /// Traverses from `start`, calling `on_discover(node, parent)` for every
    /// newly reached node. The visit order is available from [`Self::order`].
    pub(crate) fn run<F>(&mut self, graph: &Graph, start: usize, mut on_discover: F)
    where
        F: FnMut(usize, usize),
    {
        self.level.iter_mut().for_each(|slot| *slot = None);
        self.queue.clear();
        self.order.clear();

        if let Some(slot) = self.level.get_mut(start) {
            *slot = Some(0);
            self.queue.push_back(start);
        }

        while let Some(node) = self.queue.pop_front() {
            self.order.push(node);
            let next = self.level(node).unwrap_or(0) + 1;
            for neighbour in graph.neighbour_indices(node) {
                let Some(slot) = self.level.get_mut(neighbour) else {
                    continue;
                };
                if slot.is_some() {
                    continue;
                }
                *slot = Some(next);
                on_discover(neighbour, node);
                self.queue.push_back(neighbour);
            }
        }
    }

    /// Nodes reached by the most recent run, in visit order.
    pub(crate) fn order(&self) -> &[usize] {
        &self.order
    }

    /// Level assigned during the most recent run.
    pub(crate) fn level(&self, node: usize) -> Option<usize> {
        self.level.get(node).copied().flatten()
    }
}
