//! Benchmark support for the erdos crates.
//!
//! Provides seeded graph fixtures and parameter types shared by the Criterion
//! benchmarks for traversal and analysis.

pub mod error;
pub mod params;

use erdos_core::{GeneratorBuilder, Graph, NodeId};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Seed used for every generated benchmark graph.
pub const SEED: u64 = 42;

/// Generates the Erdős–Rényi graph described by `params` with [`SEED`].
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when the parameters are rejected by
/// the generator.
pub fn seeded_graph(params: &GraphBenchParams) -> Result<Graph, BenchSetupError> {
    let generator = GeneratorBuilder::new(params.node_count, params.constant)
        .with_rng_seed(SEED)
        .build()?;
    Ok(generator.generate())
}

/// `count` source nodes spread evenly over `0..node_count`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `count` is zero.
pub fn spread_sources(node_count: usize, count: usize) -> Result<Vec<NodeId>, BenchSetupError> {
    let step = node_count
        .checked_div(count)
        .ok_or(BenchSetupError::ZeroValue {
            context: "source count",
        })?
        .max(1);
    Ok((0..node_count).step_by(step).take(count).map(NodeId::from).collect())
}
