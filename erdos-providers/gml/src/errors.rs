use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors raised while reading or writing GML.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GmlError {
    #[error("graph file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("malformed GML at line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("cannot save an empty graph")]
    EmptyGraph,
    #[error("failed to write graph file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl GmlError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> GmlErrorCode {
        match self {
            Self::NotFound { .. } => GmlErrorCode::NotFound,
            Self::Malformed { .. } => GmlErrorCode::Malformed,
            Self::EmptyGraph => GmlErrorCode::EmptyGraph,
            Self::Write { .. } => GmlErrorCode::Write,
            Self::Io(_) => GmlErrorCode::Io,
        }
    }
}

/// Stable codes describing [`GmlError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GmlErrorCode {
    NotFound,
    Malformed,
    EmptyGraph,
    Write,
    Io,
}

impl GmlErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "GML_NOT_FOUND",
            Self::Malformed => "GML_MALFORMED",
            Self::EmptyGraph => "GML_EMPTY_GRAPH",
            Self::Write => "GML_WRITE",
            Self::Io => "GML_IO",
        }
    }
}

impl fmt::Display for GmlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::not_found(GmlError::NotFound { path: "x.gml".into() }, "GML_NOT_FOUND")]
    #[case::malformed(GmlError::malformed(3, "boom"), "GML_MALFORMED")]
    #[case::empty(GmlError::EmptyGraph, "GML_EMPTY_GRAPH")]
    #[case::write(
        GmlError::Write { path: "out.gml".into(), source: io::Error::other("disk full") },
        "GML_WRITE",
    )]
    #[case::io(GmlError::from(io::Error::other("boom")), "GML_IO")]
    fn codes_are_stable(#[case] err: GmlError, #[case] expected: &str) {
        assert_eq!(err.code().as_str(), expected);
        assert_eq!(err.code().to_string(), expected);
    }

    #[rstest]
    fn malformed_messages_carry_the_line() {
        let err = GmlError::malformed(12, "unexpected `]`");
        assert_eq!(err.to_string(), "malformed GML at line 12: unexpected `]`");
    }
}
