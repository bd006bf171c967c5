//! SVG rendering for erdos graphs.
//!
//! Nodes are placed with a seeded Fruchterman–Reingold spring layout, so the
//! same graph always renders to the same picture.

mod document;
mod errors;
mod layout;
mod renderer;

pub use errors::{SvgError, SvgErrorCode};
pub use renderer::SvgRenderer;
