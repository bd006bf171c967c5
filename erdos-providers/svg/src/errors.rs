use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors raised while rendering a graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SvgError {
    #[error("cannot visualise an empty graph")]
    EmptyGraph,
    #[error("failed to write image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SvgError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> SvgErrorCode {
        match self {
            Self::EmptyGraph => SvgErrorCode::EmptyGraph,
            Self::Write { .. } => SvgErrorCode::Write,
        }
    }
}

/// Stable codes describing [`SvgError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SvgErrorCode {
    EmptyGraph,
    Write,
}

impl SvgErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyGraph => "SVG_EMPTY_GRAPH",
            Self::Write => "SVG_WRITE",
        }
    }
}

impl fmt::Display for SvgErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
