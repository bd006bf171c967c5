//! Strategy builders producing [`GraphFixture`]s.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::graph::Graph;

use super::types::{GraphFixture, GraphTopology};

const MIN_NODES: usize = 3;
const MAX_NODES: usize = 40;

pub(super) fn graph_fixture() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphTopology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
        let graph = match topology {
            GraphTopology::Random => random_graph(node_count, &mut rng),
            GraphTopology::Tree => tree(node_count, &mut rng),
            GraphTopology::Forest => forest(node_count, &mut rng),
            GraphTopology::Ring => ring(node_count),
        };
        GraphFixture { topology, graph }
    })
}

fn random_graph(node_count: usize, rng: &mut SmallRng) -> Graph {
    let probability = rng.gen_range(0.0..0.5);
    let mut graph = Graph::with_node_count(node_count);
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(probability) {
                graph.connect_distinct(left, right);
            }
        }
    }
    graph
}

fn tree(node_count: usize, rng: &mut SmallRng) -> Graph {
    let mut graph = Graph::with_node_count(node_count);
    for node in 1..node_count {
        let parent = rng.gen_range(0..node);
        graph.connect_distinct(parent, node);
    }
    graph
}

fn forest(node_count: usize, rng: &mut SmallRng) -> Graph {
    let mut graph = Graph::with_node_count(node_count);
    let mut root = 0;
    for node in 1..node_count {
        // Start a new tree roughly every fifth node.
        if rng.gen_ratio(1, 5) {
            root = node;
            continue;
        }
        let parent = rng.gen_range(root..node);
        graph.connect_distinct(parent, node);
    }
    graph
}

fn ring(node_count: usize) -> Graph {
    let mut graph = Graph::with_node_count(node_count);
    for node in 0..node_count {
        graph.connect_distinct(node, (node + 1) % node_count);
    }
    graph
}
