//! Property runners for traversal, analysis, and generation invariants.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use crate::{
    GeneratorBuilder,
    analysis::analyze,
    graph::Graph,
    node::NodeId,
    test_utils::suite_proptest_config,
    traversal::multi_source_bfs,
};

use super::{strategies::graph_fixture, types::GraphFixture};

fn check_bfs_tree(fixture: &GraphFixture, source_index: usize) -> Result<(), TestCaseError> {
    let graph = &fixture.graph;
    let source = graph.node_at(source_index % graph.node_count()).clone();
    let forest = multi_source_bfs(graph, std::slice::from_ref(&source));
    let result = forest
        .get(&source)
        .ok_or_else(|| TestCaseError::fail("source in graph must be traversed"))?;

    prop_assert_eq!(result.level(&source), Some(0));
    prop_assert_eq!(result.parent(&source), None);

    for node in result.visited() {
        let level = result
            .level(node)
            .ok_or_else(|| TestCaseError::fail("visited node without level"))?;
        if let Some(parent) = result.parent(node) {
            prop_assert!(graph.contains_edge(parent, node));
            prop_assert_eq!(result.level(parent), Some(level - 1));
        }

        let path = result
            .path_to(node)
            .ok_or_else(|| TestCaseError::fail("visited node must have a path"))?;
        prop_assert_eq!(path.len(), level + 1);
        prop_assert_eq!(path.first(), Some(&source));
        prop_assert_eq!(path.last(), Some(node));
        for pair in path.windows(2) {
            prop_assert!(graph.contains_edge(&pair[0], &pair[1]));
        }
    }

    let mut seen = result.visited().cloned().collect::<Vec<_>>();
    seen.sort();
    seen.dedup();
    prop_assert_eq!(seen.len(), result.reachable_count());

    if fixture.is_connected() {
        prop_assert_eq!(result.reachable_count(), graph.node_count());
    }
    Ok(())
}

fn check_analysis(fixture: &GraphFixture) -> Result<(), TestCaseError> {
    let graph = &fixture.graph;
    let result = analyze(graph);
    let components = result.components();

    let covered: usize = components.iter().map(<[NodeId]>::len).sum();
    prop_assert_eq!(covered, graph.node_count());
    for node in graph.nodes() {
        prop_assert!(components.component_of(node).is_some());
    }

    let forest_edges = graph.node_count() - components.len();
    prop_assert_eq!(result.has_cycle(), graph.edge_count() > forest_edges);
    if fixture.is_acyclic() {
        prop_assert!(!result.has_cycle());
    }
    prop_assert_eq!(result.is_connected(), components.len() == 1);
    if fixture.is_connected() {
        prop_assert!(result.is_connected());
    }

    for node in result.isolated_nodes() {
        prop_assert_eq!(graph.degree(node), Some(0));
    }
    prop_assert!((0.0..=1.0).contains(&result.density()));

    for cycle in result.cycle_sample() {
        prop_assert!(cycle.len() >= 3);
        let mut closed = cycle.clone();
        closed.extend(cycle.first().cloned());
        for pair in closed.windows(2) {
            prop_assert!(graph.contains_edge(&pair[0], &pair[1]));
        }
    }
    prop_assert_eq!(result.cycle_sample().is_empty(), !result.has_cycle());
    Ok(())
}

/// Component partition must match what a traversal from any member reaches.
fn check_component_partition(fixture: &GraphFixture) -> Result<(), TestCaseError> {
    let graph = &fixture.graph;
    let result = analyze(graph);
    for (index, members) in result.components().iter().enumerate() {
        let representative = members
            .first()
            .ok_or_else(|| TestCaseError::fail("components are never empty"))?;
        let forest = multi_source_bfs(graph, std::slice::from_ref(representative));
        let reached: BTreeSet<&NodeId> = forest
            .get(representative)
            .ok_or_else(|| TestCaseError::fail("representative must be traversed"))?
            .visited()
            .collect();
        let expected: BTreeSet<&NodeId> = members.iter().collect();
        prop_assert_eq!(&reached, &expected);
        for node in members {
            prop_assert_eq!(result.components().component_of(node), Some(index));
        }
    }
    Ok(())
}

/// Mean hop count over ordered pairs, via Floyd-Warshall.
fn all_pairs_mean(graph: &Graph) -> Option<f64> {
    let n = graph.node_count();
    if n < 2 {
        return None;
    }
    let index: HashMap<&NodeId, usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();
    let mut dist = vec![vec![usize::MAX; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0;
    }
    for (left, right) in graph.edges() {
        let (l, r) = (index[left], index[right]);
        dist[l][r] = 1;
        dist[r][l] = 1;
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k].saturating_add(dist[k][j]);
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    let total: usize = dist.iter().flatten().sum();
    Some(total as f64 / (n * (n - 1)) as f64)
}

fn check_average_path_length(fixture: &GraphFixture) -> Result<(), TestCaseError> {
    if !fixture.is_connected() {
        return Ok(());
    }
    let graph = &fixture.graph;
    let average = analyze(graph).average_path_length();
    let expected = all_pairs_mean(graph)
        .ok_or_else(|| TestCaseError::fail("fixtures have at least two nodes"))?;
    let actual = average
        .whole_graph()
        .ok_or_else(|| TestCaseError::fail("connected graph must report a whole-graph mean"))?;
    prop_assert!(
        (actual - expected).abs() < 1e-9,
        "average {actual} differs from all-pairs mean {expected}"
    );
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn bfs_builds_shortest_path_trees(fixture in graph_fixture(), source in any::<usize>()) {
        check_bfs_tree(&fixture, source)?;
    }

    #[test]
    fn analysis_is_consistent_with_edge_counts(fixture in graph_fixture()) {
        check_analysis(&fixture)?;
    }

    #[test]
    fn components_match_traversal_reach(fixture in graph_fixture()) {
        check_component_partition(&fixture)?;
    }

    #[test]
    fn average_path_length_matches_all_pairs_mean(fixture in graph_fixture()) {
        check_average_path_length(&fixture)?;
    }

    #[test]
    fn generated_graphs_are_simple(
        nodes in 1_usize..60,
        constant in 0.0_f64..4.0,
        seed in any::<u64>(),
    ) {
        let graph = GeneratorBuilder::new(nodes, constant)
            .with_rng_seed(seed)
            .build()
            .map_err(|err| TestCaseError::fail(err.to_string()))?
            .generate();

        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert!(graph.edge_count() <= nodes * (nodes - 1) / 2);
        for (left, right) in graph.edges() {
            prop_assert_ne!(left, right);
            prop_assert!(graph.contains_edge(right, left));
        }
    }

    #[test]
    fn clamped_generation_is_complete(nodes in 2_usize..30) {
        // c = 2n gives p = 2 ln n, which exceeds 1 from n = 2 upwards.
        let generator = GeneratorBuilder::new(nodes, 2.0 * nodes as f64)
            .build()
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert!(generator.is_clamped());
        prop_assert_eq!(generator.generate().edge_count(), nodes * (nodes - 1) / 2);
    }
}
