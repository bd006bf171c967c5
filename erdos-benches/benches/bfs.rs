//! Multi-source BFS benchmarks.
//!
//! Measures `multi_source_bfs` on seeded Erdős–Rényi graphs around the
//! connectivity threshold, with one and several sources.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use erdos_benches::{
    error::BenchSetupError,
    params::{BfsBenchParams, GraphBenchParams},
    seeded_graph, spread_sources,
};
use erdos_core::multi_source_bfs;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 1_000, 5_000];

/// Source counts per traversal.
const SOURCE_COUNTS: &[usize] = &[1, 8];

/// Erdős–Rényi constant; `c > 1` gives a connected graph with high probability.
const CONSTANT: f64 = 1.5;

fn multi_source_bfs_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("multi_source_bfs");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let graph_params = GraphBenchParams {
            node_count,
            constant: CONSTANT,
        };
        let graph = seeded_graph(&graph_params)?;

        for &source_count in SOURCE_COUNTS {
            let sources = spread_sources(node_count, source_count)?;
            let params = BfsBenchParams {
                graph: graph_params.clone(),
                sources: source_count,
            };
            group.bench_with_input(BenchmarkId::from_parameter(&params), &sources, |b, s| {
                b.iter(|| multi_source_bfs(&graph, s));
            });
        }
    }

    group.finish();
    Ok(())
}

fn multi_source_bfs_bench(c: &mut Criterion) {
    if let Err(err) = multi_source_bfs_impl(c) {
        panic!("multi-source BFS benchmark setup failed: {err}");
    }
}

criterion_group!(benches, multi_source_bfs_bench);
criterion_main!(benches);
