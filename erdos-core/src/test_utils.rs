//! Shared test utilities for `erdos-core`.

use erdos_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{graph::Graph, node::NodeId};

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph with nodes `0..node_count` and the listed integer edges.
///
/// # Panics
/// Panics when an edge is invalid; fixtures are expected to be well formed.
#[must_use]
pub(crate) fn graph_from_edges(node_count: usize, edges: &[(i64, i64)]) -> Graph {
    let mut graph = Graph::with_node_count(node_count);
    for &(left, right) in edges {
        if let Err(err) = graph.add_edge(&NodeId::Int(left), &NodeId::Int(right)) {
            panic!("fixture edge ({left}, {right}) is invalid: {err}");
        }
    }
    graph
}

/// Path `0 - 1 - … - (node_count - 1)`.
#[must_use]
pub(crate) fn path_graph(node_count: usize) -> Graph {
    let last = i64::try_from(node_count).unwrap_or(i64::MAX);
    let edges: Vec<_> = (1..last).map(|right| (right - 1, right)).collect();
    graph_from_edges(node_count, &edges)
}
