//! Builder utilities for configuring Erdős–Rényi generation.
//!
//! Validates the node count and the constant `c` before constructing an
//! [`ErdosRenyi`] generator with a resolved edge probability.

use tracing::warn;

use crate::{Result, error::GraphError, generator::ErdosRenyi};

/// Configures and constructs [`ErdosRenyi`] generators.
///
/// The edge probability is `p = (c · ln n) / n`.
///
/// # Examples
/// ```
/// use erdos_core::GeneratorBuilder;
///
/// let generator = GeneratorBuilder::new(10, 2.0)
///     .with_rng_seed(7)
///     .build()
///     .expect("parameters are valid");
/// assert_eq!(generator.node_count(), 10);
/// assert!(generator.probability() > 0.0);
/// assert_eq!(generator.rng_seed(), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    node_count: usize,
    constant: f64,
    rng_seed: Option<u64>,
}

impl GeneratorBuilder {
    /// Creates a builder for `node_count` nodes and constant `constant`.
    #[must_use]
    pub const fn new(node_count: usize, constant: f64) -> Self {
        Self {
            node_count,
            constant,
            rng_seed: None,
        }
    }

    /// Fixes the random seed so generation is reproducible.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::GeneratorBuilder;
    ///
    /// let first = GeneratorBuilder::new(30, 1.5).with_rng_seed(9).build()?.generate();
    /// let second = GeneratorBuilder::new(30, 1.5).with_rng_seed(9).build()?.generate();
    /// assert_eq!(first.edge_count(), second.edge_count());
    /// # Ok::<(), erdos_core::GraphError>(())
    /// ```
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the configured constant `c`.
    #[must_use]
    pub const fn constant(&self) -> f64 {
        self.constant
    }

    /// Validates the configuration and resolves the edge probability.
    ///
    /// Probabilities above `1.0` are clamped with a warning.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeCount`] for zero nodes,
    /// [`GraphError::NonFiniteProbability`] when `c` is NaN or infinite (or
    /// yields a non-finite probability), and
    /// [`GraphError::NegativeProbability`] when the probability is negative.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::{GeneratorBuilder, GraphError};
    ///
    /// let err = GeneratorBuilder::new(10, -1.0).build().unwrap_err();
    /// assert!(matches!(err, GraphError::NegativeProbability { .. }));
    ///
    /// let clamped = GeneratorBuilder::new(4, 100.0).build()?;
    /// assert!(clamped.is_clamped());
    /// assert_eq!(clamped.probability(), 1.0);
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn build(self) -> Result<ErdosRenyi> {
        if self.node_count == 0 {
            return Err(GraphError::InvalidNodeCount {
                got: self.node_count,
            });
        }

        let raw = edge_probability(self.node_count, self.constant);
        if !raw.is_finite() {
            return Err(GraphError::NonFiniteProbability {
                constant: self.constant,
            });
        }
        if raw < 0.0 {
            return Err(GraphError::NegativeProbability {
                constant: self.constant,
                probability: raw,
            });
        }

        let clamped = raw > 1.0;
        if clamped {
            warn!(
                probability = raw,
                constant = self.constant,
                nodes = self.node_count,
                "edge probability exceeds 1, clamping to 1.0"
            );
        }
        let probability = if clamped { 1.0 } else { raw };

        Ok(ErdosRenyi::new(
            self.node_count,
            self.constant,
            probability,
            clamped,
            self.rng_seed,
        ))
    }
}

fn edge_probability(node_count: usize, constant: f64) -> f64 {
    let n = node_count as f64;
    constant * n.ln() / n
}
