//! Benchmark parameter types, displayed as Criterion benchmark ids.

use std::fmt;

/// Shape of a generated benchmark graph.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Erdős–Rényi constant `c`.
    pub constant: f64,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},c={}", self.node_count, self.constant)
    }
}

/// A BFS run over a generated graph.
#[derive(Clone, Debug)]
pub struct BfsBenchParams {
    /// The graph to traverse.
    pub graph: GraphBenchParams,
    /// Number of BFS sources.
    pub sources: usize,
}

impl fmt::Display for BfsBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},sources={}", self.graph, self.sources)
    }
}
