//! Error types for the erdos core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::node::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when building, generating, or mutating a
/// [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// The generator was asked for a graph without nodes.
    #[error("node count must be at least 1 (got {got})")]
    InvalidNodeCount {
        /// The rejected node count.
        got: usize,
    },
    /// The constant `c` produced a negative edge probability.
    #[error("edge probability cannot be negative (c={constant} gives p={probability:.4})")]
    NegativeProbability {
        /// The constant supplied by the caller.
        constant: f64,
        /// The probability derived from `c`.
        probability: f64,
    },
    /// The constant `c` produced a NaN or infinite edge probability.
    #[error("edge probability must be finite (c={constant})")]
    NonFiniteProbability {
        /// The constant supplied by the caller.
        constant: f64,
    },
    /// An edge referenced a node that is not part of the graph.
    #[error("node `{node}` is not in the graph")]
    UnknownNode {
        /// The missing node identifier.
        node: NodeId,
    },
    /// An edge connected a node to itself.
    #[error("self-loop on node `{node}` is not allowed in a simple graph")]
    SelfLoop {
        /// The node both endpoints referred to.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The generator was asked for a graph without nodes.
        InvalidNodeCount => InvalidNodeCount { .. } => "GRAPH_INVALID_NODE_COUNT",
        /// The constant `c` produced a negative edge probability.
        NegativeProbability => NegativeProbability { .. } => "GRAPH_NEGATIVE_PROBABILITY",
        /// The constant `c` produced a NaN or infinite edge probability.
        NonFiniteProbability => NonFiniteProbability { .. } => "GRAPH_NON_FINITE_PROBABILITY",
        /// An edge referenced a node that is not part of the graph.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// An edge connected a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
    }
}

impl GraphError {
    /// Whether the error stems from invalid caller-supplied parameters rather
    /// than from the structure of a graph.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::GraphError;
    ///
    /// assert!(GraphError::InvalidNodeCount { got: 0 }.is_invalid_argument());
    /// ```
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidNodeCount { .. }
                | Self::NegativeProbability { .. }
                | Self::NonFiniteProbability { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
