//! Bounded cycle sampling.
//!
//! Builds a BFS spanning forest and turns each non-tree edge into its
//! fundamental cycle. Only the first `limit` cycles are produced, so the cost
//! stays linear in the graph size plus the length of the sampled cycles. The
//! sample is diagnostic output; the cycle flag is decided by edge counts.

use std::collections::VecDeque;

use crate::graph::Graph;

struct SpanningForest {
    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
}

impl SpanningForest {
    fn build(graph: &Graph) -> Self {
        let count = graph.node_count();
        let mut parent = vec![None; count];
        let mut depth = vec![0; count];
        let mut seen = vec![false; count];
        let mut queue = VecDeque::new();

        for root in 0..count {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            queue.push_back(root);
            while let Some(node) = queue.pop_front() {
                for neighbour in graph.neighbour_indices(node) {
                    if seen[neighbour] {
                        continue;
                    }
                    seen[neighbour] = true;
                    parent[neighbour] = Some(node);
                    depth[neighbour] = depth[node] + 1;
                    queue.push_back(neighbour);
                }
            }
        }
        Self { parent, depth }
    }

    fn is_tree_edge(&self, left: usize, right: usize) -> bool {
        self.parent[left] == Some(right) || self.parent[right] == Some(left)
    }

    /// Walks both endpoints up to their lowest common ancestor and joins the
    /// two halves into `left → … → ancestor → … → right`.
    fn fundamental_cycle(&self, left: usize, right: usize) -> Vec<usize> {
        let mut up_left = vec![left];
        let mut up_right = vec![right];
        let (mut a, mut b) = (left, right);

        while self.depth[a] > self.depth[b] {
            a = self.step(a);
            up_left.push(a);
        }
        while self.depth[b] > self.depth[a] {
            b = self.step(b);
            up_right.push(b);
        }
        while a != b {
            a = self.step(a);
            b = self.step(b);
            up_left.push(a);
            up_right.push(b);
        }

        // `up_right` ends with the shared ancestor already in `up_left`.
        up_right.pop();
        up_left.extend(up_right.into_iter().rev());
        up_left
    }

    fn step(&self, node: usize) -> usize {
        self.parent[node].unwrap_or(node)
    }
}

/// Returns at most `limit` simple cycles as dense node indices.
pub(super) fn sample_cycles(graph: &Graph, limit: usize) -> Vec<Vec<usize>> {
    if limit == 0 {
        return Vec::new();
    }
    let forest = SpanningForest::build(graph);
    graph
        .edge_indices()
        .filter(|&(left, right)| !forest.is_tree_edge(left, right))
        .take(limit)
        .map(|(left, right)| forest.fundamental_cycle(left, right))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::test_utils::{graph_from_edges, path_graph};

    #[rstest]
    fn trees_have_no_cycles() {
        assert!(sample_cycles(&path_graph(6), 5).is_empty());
    }

    #[rstest]
    fn triangle_yields_single_cycle() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let cycles = sample_cycles(&graph, 5);
        assert_eq!(cycles.len(), 1);
        let mut cycle = cycles.into_iter().next().expect("one cycle");
        cycle.sort_unstable();
        assert_eq!(cycle, vec![0, 1, 2]);
    }

    #[rstest]
    fn sampled_cycles_are_closed_walks() {
        let edges: Vec<_> = (0..6_i64)
            .flat_map(|l| ((l + 1)..6).map(move |r| (l, r)))
            .collect();
        let graph = graph_from_edges(6, &edges);
        let cycles = sample_cycles(&graph, 5);
        assert_eq!(cycles.len(), 5);
        for cycle in cycles {
            assert!(cycle.len() >= 3);
            let closing = (cycle.last().copied(), cycle.first().copied());
            let mut pairs: Vec<_> = cycle.windows(2).map(|w| (w[0], w[1])).collect();
            if let (Some(last), Some(first)) = closing {
                pairs.push((last, first));
            }
            for (left, right) in pairs {
                assert!(graph.neighbour_indices(left).any(|n| n == right));
            }
            let mut unique = cycle.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), cycle.len());
        }
    }

    #[rstest]
    fn zero_limit_disables_sampling() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        assert!(sample_cycles(&graph, 0).is_empty());
    }

    #[rstest]
    fn long_cycle_is_recovered_in_full() {
        let graph = graph_from_edges(
            7,
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 0)],
        );
        let cycles = sample_cycles(&graph, 5);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles.first().map(Vec::len), Some(7));
    }
}
