//! Structural analysis of a [`Graph`].
//!
//! A single [`Analyzer::analyze`] pass computes connected components,
//! isolated nodes, the cycle flag with a bounded cycle sample, density,
//! degree statistics, and the average shortest-path length.
//!
//! The average shortest-path length is only defined for a connected node set.
//! When the graph is disconnected the whole-graph value is unavailable and the
//! value is computed over the largest component instead, labelled with
//! [`PathLengthScope::LargestComponent`].

mod cycles;
mod paths;
mod union_find;

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::{graph::Graph, node::NodeId};

use self::union_find::DisjointSet;

/// Default number of cycles sampled for diagnostics.
pub const DEFAULT_CYCLE_SAMPLE_LIMIT: usize = 5;

/// Configures and constructs [`Analyzer`] instances.
///
/// # Examples
/// ```
/// use erdos_core::AnalyzerBuilder;
///
/// let analyzer = AnalyzerBuilder::new().with_cycle_sample_limit(2).build();
/// assert_eq!(analyzer.cycle_sample_limit(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder {
    cycle_sample_limit: usize,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            cycle_sample_limit: DEFAULT_CYCLE_SAMPLE_LIMIT,
        }
    }
}

impl AnalyzerBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of concrete cycles reported. Zero disables sampling.
    #[must_use]
    pub const fn with_cycle_sample_limit(mut self, limit: usize) -> Self {
        self.cycle_sample_limit = limit;
        self
    }

    /// Constructs the analyzer.
    #[must_use]
    pub const fn build(self) -> Analyzer {
        Analyzer {
            cycle_sample_limit: self.cycle_sample_limit,
        }
    }
}

/// Runs the structural analysis pass.
#[derive(Debug, Clone)]
pub struct Analyzer {
    cycle_sample_limit: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        AnalyzerBuilder::default().build()
    }
}

impl Analyzer {
    /// Maximum number of sampled cycles.
    #[must_use]
    pub const fn cycle_sample_limit(&self) -> usize {
        self.cycle_sample_limit
    }

    /// Analyses the current state of `graph`. Never fails.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::{Analyzer, Graph, NodeId};
    ///
    /// let mut graph = Graph::with_node_count(3);
    /// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
    /// let result = Analyzer::default().analyze(&graph);
    /// assert_eq!(result.components().len(), 2);
    /// assert_eq!(result.isolated_nodes(), &[NodeId::Int(2)]);
    /// assert!(!result.has_cycle());
    /// # Ok::<(), erdos_core::GraphError>(())
    /// ```
    #[instrument(
        name = "core.analyze",
        skip_all,
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn analyze(&self, graph: &Graph) -> AnalysisResult {
        let partition = Partition::build(graph);
        let has_cycle = partition.has_cycle();

        let isolated = (0..graph.node_count())
            .filter(|&node| graph.degree_at(node) == 0)
            .map(|node| graph.node_at(node).clone())
            .collect();

        let cycle_sample = cycles::sample_cycles(graph, self.cycle_sample_limit)
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|n| graph.node_at(n).clone()).collect())
            .collect();

        let degrees: Vec<(NodeId, usize)> = (0..graph.node_count())
            .map(|node| (graph.node_at(node).clone(), graph.degree_at(node)))
            .collect();

        let average_path_length = partition.average_path_length(graph);
        let components = partition.into_components(graph);

        let result = AnalysisResult {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: density(graph.node_count(), graph.edge_count()),
            degree_stats: DegreeStats::from_degrees(degrees.iter().map(|(_, d)| *d)),
            components,
            isolated,
            has_cycle,
            cycle_sample,
            degrees,
            average_path_length,
        };
        info!(
            components = result.components.len(),
            isolated = result.isolated.len(),
            has_cycle = result.has_cycle,
            density = result.density,
            "analysis completed"
        );
        result
    }
}

/// Analyses `graph` with the default [`Analyzer`] configuration.
#[must_use]
pub fn analyze(graph: &Graph) -> AnalysisResult {
    Analyzer::default().analyze(graph)
}

/// Component membership computed with union-find, kept in dense indices.
struct Partition {
    /// Component of each node, numbered by first appearance.
    membership: Vec<usize>,
    members: Vec<Vec<usize>>,
    edges: Vec<usize>,
}

impl Partition {
    fn build(graph: &Graph) -> Self {
        let count = graph.node_count();
        let mut set = DisjointSet::new(count);
        for (left, right) in graph.edge_indices() {
            set.union(left, right);
        }

        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut membership = Vec::with_capacity(count);
        let mut members: Vec<Vec<usize>> = Vec::new();
        for node in 0..count {
            let root = set.find(node);
            let component = *by_root.entry(root).or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            if let Some(group) = members.get_mut(component) {
                group.push(node);
            }
            membership.push(component);
        }

        let mut edges = vec![0; members.len()];
        for (left, _) in graph.edge_indices() {
            if let Some(count) = membership.get(left).and_then(|&c| edges.get_mut(c)) {
                *count += 1;
            }
        }

        Self {
            membership,
            members,
            edges,
        }
    }

    /// A component is a tree iff it has exactly `nodes - 1` edges; anything
    /// more closes a cycle.
    fn has_cycle(&self) -> bool {
        self.members
            .iter()
            .zip(&self.edges)
            .any(|(nodes, &edges)| edges >= nodes.len())
    }

    fn average_path_length(&self, graph: &Graph) -> AveragePathLength {
        if self.members.len() <= 1 {
            let all = self.members.first().map_or(&[][..], Vec::as_slice);
            return AveragePathLength {
                scope: PathLengthScope::WholeGraph,
                value: paths::average_shortest_path(graph, all),
            };
        }

        // `max_by_key` keeps the last maximum; iterate in reverse so ties go
        // to the earliest component.
        let largest = self
            .members
            .iter()
            .rev()
            .max_by_key(|members| members.len())
            .map_or(&[][..], Vec::as_slice);
        AveragePathLength {
            scope: PathLengthScope::LargestComponent {
                nodes: largest.len(),
            },
            value: paths::average_shortest_path(graph, largest),
        }
    }

    fn into_components(self, graph: &Graph) -> Components {
        let groups: Vec<Vec<NodeId>> = self
            .members
            .iter()
            .map(|group| group.iter().map(|&n| graph.node_at(n).clone()).collect())
            .collect();
        let membership = self
            .membership
            .iter()
            .enumerate()
            .map(|(node, &component)| (graph.node_at(node).clone(), component))
            .collect();
        Components {
            groups,
            edge_counts: self.edges,
            membership,
        }
    }
}

fn density(nodes: usize, edges: usize) -> f64 {
    if nodes <= 1 {
        return 0.0;
    }
    let max_edges = nodes as f64 * (nodes as f64 - 1.0) / 2.0;
    edges as f64 / max_edges
}

/// Connected components in order of their first node.
///
/// # Examples
/// ```
/// use erdos_core::{Graph, NodeId, analyze};
///
/// let mut graph = Graph::with_node_count(4);
/// graph.add_edge(&NodeId::Int(2), &NodeId::Int(3))?;
/// let result = analyze(&graph);
/// let components = result.components();
/// assert_eq!(components.len(), 3);
/// assert_eq!(components.component_of(&NodeId::Int(3)), Some(2));
/// # Ok::<(), erdos_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Components {
    groups: Vec<Vec<NodeId>>,
    edge_counts: Vec<usize>,
    membership: HashMap<NodeId, usize>,
}

impl Components {
    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no components (the graph is empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Component members, each in node insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[NodeId]> + '_ {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Members of component `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[NodeId]> {
        self.groups.get(index).map(Vec::as_slice)
    }

    /// Number of edges inside component `index`.
    #[must_use]
    pub fn edge_count(&self, index: usize) -> Option<usize> {
        self.edge_counts.get(index).copied()
    }

    /// Index of the component containing `node`.
    #[must_use]
    pub fn component_of(&self, node: &NodeId) -> Option<usize> {
        self.membership.get(node).copied()
    }
}

/// Minimum, maximum, and mean node degree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegreeStats {
    min: usize,
    max: usize,
    average: f64,
}

impl DegreeStats {
    fn from_degrees(degrees: impl Iterator<Item = usize>) -> Option<Self> {
        let mut count = 0_usize;
        let mut total = 0_usize;
        let mut min = usize::MAX;
        let mut max = 0_usize;
        for degree in degrees {
            count += 1;
            total += degree;
            min = min.min(degree);
            max = max.max(degree);
        }
        (count > 0).then(|| Self {
            min,
            max,
            average: total as f64 / count as f64,
        })
    }

    /// Smallest degree.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Largest degree.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Mean degree.
    #[must_use]
    pub const fn average(&self) -> f64 {
        self.average
    }
}

/// Node set the average shortest-path length was computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathLengthScope {
    /// The graph is connected (or empty); the value covers every node.
    WholeGraph,
    /// The graph is disconnected; the whole-graph value is unavailable and the
    /// value covers only the largest component.
    LargestComponent {
        /// Size of the component the value was computed over.
        nodes: usize,
    },
}

/// Average shortest-path length together with the scope it applies to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AveragePathLength {
    scope: PathLengthScope,
    value: Option<f64>,
}

impl AveragePathLength {
    /// Node set the value covers.
    #[must_use]
    pub const fn scope(&self) -> PathLengthScope {
        self.scope
    }

    /// Mean hop count, or `None` when the scope has fewer than two nodes.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// The whole-graph value; `None` when the graph is disconnected or too
    /// small.
    #[must_use]
    pub const fn whole_graph(&self) -> Option<f64> {
        match self.scope {
            PathLengthScope::WholeGraph => self.value,
            PathLengthScope::LargestComponent { .. } => None,
        }
    }
}

/// Immutable snapshot produced by one analysis pass.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    node_count: usize,
    edge_count: usize,
    components: Components,
    isolated: Vec<NodeId>,
    has_cycle: bool,
    cycle_sample: Vec<Vec<NodeId>>,
    density: f64,
    degree_stats: Option<DegreeStats>,
    degrees: Vec<(NodeId, usize)>,
    average_path_length: AveragePathLength,
}

impl AnalysisResult {
    /// Number of nodes at analysis time.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges at analysis time.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Connected components.
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Whether the graph forms a single component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.components.len() == 1
    }

    /// Nodes of degree zero in insertion order.
    #[must_use]
    pub fn isolated_nodes(&self) -> &[NodeId] {
        &self.isolated
    }

    /// Whether any component has at least as many edges as nodes.
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.has_cycle
    }

    /// Bounded sample of concrete cycles, each listed in traversal order.
    #[must_use]
    pub fn cycle_sample(&self) -> &[Vec<NodeId>] {
        &self.cycle_sample
    }

    /// Edge density in `[0, 1]`; `0.0` for graphs with at most one node.
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Degree statistics, absent for an empty graph.
    #[must_use]
    pub const fn degree_stats(&self) -> Option<DegreeStats> {
        self.degree_stats
    }

    /// Degree of every node in insertion order.
    #[must_use]
    pub fn degrees(&self) -> &[(NodeId, usize)] {
        &self.degrees
    }

    /// Average shortest-path length and the scope it was computed over.
    #[must_use]
    pub const fn average_path_length(&self) -> AveragePathLength {
        self.average_path_length
    }
}
