//! Average shortest-path length over a connected node set.

use crate::{graph::Graph, traversal::LevelScan};

/// Mean hop count over all ordered pairs of distinct nodes in `component`.
///
/// `component` must be connected; returns `None` when it holds fewer than
/// two nodes. Runs one BFS per member, so the cost is O(k · (V + E)).
pub(super) fn average_shortest_path(graph: &Graph, component: &[usize]) -> Option<f64> {
    let size = component.len();
    if size < 2 {
        return None;
    }

    let mut scan = LevelScan::new(graph.node_count());
    let mut total: u128 = 0;
    for &start in component {
        scan.run(graph, start, |_, _| {});
        total += scan
            .order()
            .iter()
            .filter_map(|&node| scan.level(node))
            .map(|level| level as u128)
            .sum::<u128>();
    }

    let pairs = (size as u128) * (size as u128 - 1);
    Some(total as f64 / pairs as f64)
}
