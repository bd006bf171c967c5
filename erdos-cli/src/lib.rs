//! Library half of the `erdos` binary.
//!
//! Exposes the command pipeline and logging setup so tests and doctests can
//! drive a run without spawning a process.

pub mod cli;
pub mod logging;
