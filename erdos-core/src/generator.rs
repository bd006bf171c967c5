//! Erdős–Rényi random graph generation.
//!
//! Provides the [`ErdosRenyi`] generator produced by
//! [`crate::GeneratorBuilder`]. Every unordered pair of nodes is connected
//! independently with the resolved probability.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::graph::Graph;

/// Validated Erdős–Rényi generator.
///
/// # Examples
/// ```
/// use erdos_core::GeneratorBuilder;
///
/// let graph = GeneratorBuilder::new(6, 100.0)
///     .build()
///     .expect("parameters are valid")
///     .generate();
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.edge_count(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    node_count: usize,
    constant: f64,
    probability: f64,
    clamped: bool,
    rng_seed: Option<u64>,
}

impl ErdosRenyi {
    pub(crate) const fn new(
        node_count: usize,
        constant: f64,
        probability: f64,
        clamped: bool,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            node_count,
            constant,
            probability,
            clamped,
            rng_seed,
        }
    }

    /// Number of nodes every generated graph contains.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// The constant `c` the probability was derived from.
    #[must_use]
    pub const fn constant(&self) -> f64 {
        self.constant
    }

    /// Edge probability in `[0, 1]` after clamping.
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Whether `(c · ln n) / n` exceeded `1` and was clamped.
    #[must_use]
    pub const fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// The fixed seed, if one was configured.
    #[must_use]
    pub const fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Generates a graph using the configured seed, or fresh entropy when no
    /// seed was supplied.
    #[must_use]
    pub fn generate(&self) -> Graph {
        let mut rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Generates a graph drawing edges from `rng`.
    ///
    /// # Examples
    /// ```
    /// use erdos_core::GeneratorBuilder;
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let generator = GeneratorBuilder::new(5, 0.0).build()?;
    /// let graph = generator.generate_with_rng(&mut SmallRng::seed_from_u64(1));
    /// assert_eq!(graph.edge_count(), 0);
    /// # Ok::<(), erdos_core::GraphError>(())
    /// ```
    #[instrument(
        name = "core.generate",
        skip(self, rng),
        fields(nodes = self.node_count, probability = self.probability, seed = ?self.rng_seed),
    )]
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph {
        let mut graph = Graph::with_node_count(self.node_count);
        for left in 0..self.node_count {
            for right in (left + 1)..self.node_count {
                if rng.gen_bool(self.probability) {
                    graph.connect_distinct(left, right);
                }
            }
        }
        info!(
            nodes = self.node_count,
            constant = self.constant,
            probability = self.probability,
            edges = graph.edge_count(),
            "generated Erdős–Rényi graph"
        );
        graph
    }
}
