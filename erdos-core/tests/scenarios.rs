//! End-to-end scenarios across generation, traversal, and analysis.

mod common;

use common::{graph_with_edges, ids};
use erdos_core::{
    AttributeValue, GeneratorBuilder, Graph, GraphSession, NodeId, PathLengthScope, analyze,
    annotate, multi_source_bfs,
};
use rstest::rstest;

#[rstest]
fn seeded_generation_is_reproducible() {
    let build = || {
        GeneratorBuilder::new(40, 1.2)
            .with_rng_seed(2024)
            .build()
            .expect("valid parameters")
            .generate()
    };
    let first: Vec<_> = build().edges().map(|(l, r)| (l.clone(), r.clone())).collect();
    let second: Vec<_> = build().edges().map(|(l, r)| (l.clone(), r.clone())).collect();
    assert_eq!(first, second);
}

#[rstest]
fn generated_graph_feeds_traversal_and_analysis() {
    let graph = GeneratorBuilder::new(25, 3.0)
        .with_rng_seed(5)
        .build()
        .expect("valid parameters")
        .generate();
    let mut session = GraphSession::new(graph);

    let sources = ids(&[0, 24]);
    let forest = session.run_bfs(&sources);
    assert_eq!(forest.len(), 2);
    assert!(forest.skipped().is_empty());

    let analysis = session.analyze();
    assert_eq!(analysis.node_count(), 25);
    let annotations = session.annotations();
    assert_eq!(annotations.len(), 25);
}

#[rstest]
fn path_of_four_matches_reference_values() {
    let graph = graph_with_edges(4, &[(0, 1), (1, 2), (2, 3)]);
    let forest = multi_source_bfs(&graph, &ids(&[0]));
    assert_eq!(
        forest.path(&NodeId::Int(0), &NodeId::Int(3)),
        Some(ids(&[0, 1, 2, 3]))
    );

    let analysis = analyze(&graph);
    assert_eq!(analysis.components().len(), 1);
    assert!(!analysis.has_cycle());
    assert!((analysis.density() - 0.5).abs() < 1e-12);
    let average = analysis
        .average_path_length()
        .whole_graph()
        .expect("connected");
    assert!((average - 1.6667).abs() < 1e-4);
}

#[rstest]
fn missing_sources_do_not_stop_other_traversals() {
    let graph = graph_with_edges(3, &[(0, 1)]);
    let forest = multi_source_bfs(&graph, &[NodeId::Int(7), NodeId::Int(1)]);
    assert_eq!(forest.skipped(), &[NodeId::Int(7)]);
    assert_eq!(forest.sources().cloned().collect::<Vec<_>>(), ids(&[1]));
    assert_eq!(forest.path(&NodeId::Int(1), &NodeId::Int(2)), None);
}

#[rstest]
fn labelled_graph_is_analysed_like_an_integer_one() {
    let mut graph = Graph::new();
    for name in ["alpha", "beta", "gamma"] {
        graph.add_node(NodeId::from(name));
    }
    graph
        .add_edge(&NodeId::from("alpha"), &NodeId::from("beta"))
        .expect("nodes exist");

    let analysis = analyze(&graph);
    assert_eq!(analysis.isolated_nodes(), &[NodeId::from("gamma")]);
    assert_eq!(
        analysis.average_path_length().scope(),
        PathLengthScope::LargestComponent { nodes: 2 }
    );
    assert_eq!(analysis.average_path_length().value(), Some(1.0));

    let annotations = annotate(&graph, analysis.components(), None);
    assert_eq!(
        annotations.value(&NodeId::from("gamma"), "component_id"),
        Some(&AttributeValue::Int(1))
    );
}
