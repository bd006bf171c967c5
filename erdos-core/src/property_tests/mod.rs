//! Property-based tests spanning generation, traversal, and analysis.
//!
//! Graphs are drawn from a handful of topologies so that connected,
//! disconnected, acyclic, and dense inputs are all exercised.

mod strategies;
mod tests;
mod types;
