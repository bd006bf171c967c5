//! Command-line interface for the erdos graph pipeline.
//!
//! A run obtains one graph, from a GML file or the Erdős–Rényi generator,
//! then optionally traverses it from several BFS sources, analyses its
//! structure, saves it with annotations and draws it.

mod commands;

pub use commands::{
    Cli, CliError, ExecutionSummary, GraphOrigin, PathQuery, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
