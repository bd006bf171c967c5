//! File output tests for the SVG renderer.

use std::fs;

use erdos_core::{Graph, NodeId, analyze, multi_source_bfs};
use erdos_providers_svg::{SvgError, SvgErrorCode, SvgRenderer};
use rstest::rstest;

fn triangle_with_tail() -> Graph {
    let mut graph = Graph::with_node_count(4);
    for (l, r) in [(0, 1), (1, 2), (2, 0), (2, 3)] {
        graph
            .add_edge(&NodeId::Int(l), &NodeId::Int(r))
            .expect("nodes exist");
    }
    graph
}

#[rstest]
fn writes_a_standalone_svg_file() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let path = dir.path().join("graph.svg");
    let graph = triangle_with_tail();
    let analysis = analyze(&graph);
    let forest = multi_source_bfs(&graph, &[NodeId::Int(3)]);

    SvgRenderer::new()
        .render_to_path(&graph, Some(&forest), analysis.components(), &path)
        .expect("render succeeds");

    let svg = fs::read_to_string(&path).expect("file exists");
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("4 nodes, 4 edges, 1 component<"));
    assert!(svg.contains("BFS from 3"));
}

#[rstest]
fn missing_directories_are_write_errors() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let path = dir.path().join("absent").join("graph.svg");
    let graph = triangle_with_tail();
    let analysis = analyze(&graph);

    let err = SvgRenderer::new()
        .render_to_path(&graph, None, analysis.components(), &path)
        .expect_err("parent directory does not exist");
    assert!(matches!(err, SvgError::Write { .. }));
    assert_eq!(err.code(), SvgErrorCode::Write);
    assert_eq!(err.code().as_str(), "SVG_WRITE");
}
