//! Fixture types shared by the property strategies and tests.

use test_strategy::Arbitrary;

use crate::graph::Graph;

/// Shape of the graph produced by [`super::strategies::graph_fixture`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphTopology {
    /// Independent edges with a random probability.
    #[weight(3)]
    Random,
    /// A random spanning tree; connected and acyclic.
    #[weight(2)]
    Tree,
    /// Several random trees side by side.
    #[weight(2)]
    Forest,
    /// A single cycle through every node.
    #[weight(1)]
    Ring,
}

/// Generated graph plus the facts its topology guarantees.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    pub(super) topology: GraphTopology,
    pub(super) graph: Graph,
}

impl GraphFixture {
    /// Whether the topology guarantees an acyclic graph.
    pub(super) const fn is_acyclic(&self) -> bool {
        matches!(self.topology, GraphTopology::Tree | GraphTopology::Forest)
    }

    /// Whether the topology guarantees a connected graph.
    pub(super) const fn is_connected(&self) -> bool {
        matches!(self.topology, GraphTopology::Tree | GraphTopology::Ring)
    }
}
