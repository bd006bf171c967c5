//! GML persistence for erdos graphs.
//!
//! [`GmlReader`] parses Graph Modelling Language markup into a simple
//! undirected [`erdos_core::Graph`]; [`GmlWriter`] writes a graph back out,
//! together with any derived node annotations.

mod errors;
mod reader;
mod syntax;
mod writer;

pub use errors::{GmlError, GmlErrorCode};
pub use reader::GmlReader;
pub use writer::GmlWriter;
