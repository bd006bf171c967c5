use erdos_core::{GraphError, GraphErrorCode, NodeId};
use rstest::rstest;

#[rstest]
#[case(
    GraphError::InvalidNodeCount { got: 0 },
    GraphErrorCode::InvalidNodeCount,
    "GRAPH_INVALID_NODE_COUNT",
    true,
)]
#[case(
    GraphError::NegativeProbability { constant: -1.0, probability: -0.2 },
    GraphErrorCode::NegativeProbability,
    "GRAPH_NEGATIVE_PROBABILITY",
    true,
)]
#[case(
    GraphError::NonFiniteProbability { constant: f64::NAN },
    GraphErrorCode::NonFiniteProbability,
    "GRAPH_NON_FINITE_PROBABILITY",
    true,
)]
#[case(
    GraphError::UnknownNode { node: NodeId::Int(4) },
    GraphErrorCode::UnknownNode,
    "GRAPH_UNKNOWN_NODE",
    false,
)]
#[case(
    GraphError::SelfLoop { node: NodeId::from("a") },
    GraphErrorCode::SelfLoop,
    "GRAPH_SELF_LOOP",
    false,
)]
fn returns_expected_graph_code(
    #[case] error: GraphError,
    #[case] expected: GraphErrorCode,
    #[case] code: &str,
    #[case] invalid_argument: bool,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), code);
    assert_eq!(expected.to_string(), code);
    assert_eq!(error.is_invalid_argument(), invalid_argument);
}

#[rstest]
fn messages_name_the_offending_node() {
    let err = GraphError::UnknownNode {
        node: NodeId::from("ghost"),
    };
    assert_eq!(err.to_string(), "node `ghost` is not in the graph");
}
