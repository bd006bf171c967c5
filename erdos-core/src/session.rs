//! Owns a graph together with the most recent derived results.

use crate::{
    analysis::{AnalysisResult, Analyzer},
    annotations::{NodeAnnotations, annotate},
    graph::Graph,
    node::NodeId,
    traversal::{BfsForest, multi_source_bfs},
};

/// Working context for one graph.
///
/// Derived results are cleared whenever the graph is replaced or borrowed
/// mutably, so they never describe a stale graph.
///
/// # Examples
/// ```
/// use erdos_core::{Graph, GraphSession, NodeId};
///
/// let mut graph = Graph::with_node_count(3);
/// graph.add_edge(&NodeId::Int(0), &NodeId::Int(1))?;
/// let mut session = GraphSession::new(graph);
/// session.run_bfs(&[NodeId::Int(0)]);
/// assert_eq!(
///     session.path(&NodeId::Int(0), &NodeId::Int(1)),
///     Some(vec![NodeId::Int(0), NodeId::Int(1)])
/// );
///
/// session.graph_mut().add_edge(&NodeId::Int(1), &NodeId::Int(2))?;
/// assert!(session.forest().is_none());
/// # Ok::<(), erdos_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphSession {
    graph: Graph,
    analyzer: Analyzer,
    forest: Option<BfsForest>,
    analysis: Option<AnalysisResult>,
}

impl GraphSession {
    /// Wraps `graph` with the default analyzer.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self::with_analyzer(graph, Analyzer::default())
    }

    /// Wraps `graph` with a configured analyzer.
    #[must_use]
    pub fn with_analyzer(graph: Graph, analyzer: Analyzer) -> Self {
        Self {
            graph,
            analyzer,
            forest: None,
            analysis: None,
        }
    }

    /// The current graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph; clears derived results.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.clear_derived();
        &mut self.graph
    }

    /// Swaps in a new graph and returns the old one.
    pub fn replace_graph(&mut self, graph: Graph) -> Graph {
        self.clear_derived();
        std::mem::replace(&mut self.graph, graph)
    }

    /// Consumes the session, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Runs multi-source BFS and keeps the forest.
    pub fn run_bfs(&mut self, sources: &[NodeId]) -> &BfsForest {
        self.forest.insert(multi_source_bfs(&self.graph, sources))
    }

    /// Reconstructs a path using the last forest.
    #[must_use]
    pub fn path(&self, source: &NodeId, target: &NodeId) -> Option<Vec<NodeId>> {
        self.forest.as_ref()?.path(source, target)
    }

    /// The last BFS forest, if any.
    #[must_use]
    pub const fn forest(&self) -> Option<&BfsForest> {
        self.forest.as_ref()
    }

    /// Runs the analysis pass and keeps the result.
    pub fn analyze(&mut self) -> &AnalysisResult {
        self.analysis.insert(self.analyzer.analyze(&self.graph))
    }

    /// The last analysis, if any.
    #[must_use]
    pub const fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Annotations for persistence.
    ///
    /// Components are always included, so the analysis pass runs here when it
    /// has not run yet.
    pub fn annotations(&mut self) -> NodeAnnotations {
        if self.analysis.is_none() {
            self.analyze();
        }
        let forest = self.forest.as_ref();
        match self.analysis.as_ref() {
            Some(analysis) => annotate(&self.graph, analysis.components(), forest),
            None => NodeAnnotations::default(),
        }
    }

    fn clear_derived(&mut self) {
        self.forest = None;
        self.analysis = None;
    }
}
