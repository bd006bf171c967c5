use erdos_core::{Graph, NodeId};

/// Builds a graph over integer nodes `0..node_count` with the listed edges.
#[must_use]
pub fn graph_with_edges(node_count: usize, edges: &[(i64, i64)]) -> Graph {
    let mut graph = Graph::with_node_count(node_count);
    for &(left, right) in edges {
        graph
            .add_edge(&NodeId::Int(left), &NodeId::Int(right))
            .expect("fixture edges reference existing nodes");
    }
    graph
}

#[must_use]
pub fn ids(raw: &[i64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::Int).collect()
}
