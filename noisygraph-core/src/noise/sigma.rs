//! Compliance scores (σ) recorded during construction.

use std::collections::BTreeMap;

use crate::{node::NodeKey, stats, store::EdgeCounts};

/// σ for a node with the given counts: `(fake / real) / ftrp`.
///
/// Nodes only enter a construction through real edges, so `real` is never
/// zero when this is called.
#[expect(
    clippy::cast_precision_loss,
    reason = "degrees are far below 2^52 so the conversion is exact"
)]
pub(crate) fn sigma(counts: EdgeCounts, ftrp: f64) -> f64 {
    (counts.fake as f64 / counts.real as f64) / ftrp
}

/// Mean and population variance of the σ values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmaProfile {
    /// Mean σ across nodes.
    pub mean: f64,
    /// Population variance of σ across nodes.
    pub variance: f64,
}

/// Frozen snapshot of σ after construction.
///
/// Holds one entry per node that was processed. Nodes that only appeared as
/// someone's neighbour are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct SigmaTable<N> {
    values: BTreeMap<N, f64>,
}

impl<N: NodeKey> SigmaTable<N> {
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (N, f64)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Returns σ for `node`, if it was processed.
    #[must_use]
    pub fn get(&self, node: &N) -> Option<f64> {
        self.values.get(node).copied()
    }

    /// Iterates over `(node, σ)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.values.iter().map(|(node, &value)| (node, value))
    }

    /// Number of processed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no node was processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Counts nodes that met or exceeded their target (σ ≥ 1).
    #[must_use]
    pub fn compliant(&self) -> usize {
        self.values.values().filter(|&&value| value >= 1.0).count()
    }

    /// Summarises the table, or `None` when it is empty.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::{NoiseConstructor, NoiseParams};
    ///
    /// let adjacency = vec![(0, vec![1]), (1, vec![0])];
    /// let noisy = NoiseConstructor::new(NoiseParams::new(1.0)?).construct(adjacency)?;
    /// let profile = noisy.sigmas().profile().expect("two nodes were processed");
    /// assert_eq!(profile.mean, 0.0);
    /// # Ok::<(), noisygraph_core::NoiseError>(())
    /// ```
    #[must_use]
    pub fn profile(&self) -> Option<SigmaProfile> {
        let values: Vec<f64> = self.values.values().copied().collect();
        Some(SigmaProfile {
            mean: stats::mean(&values)?,
            variance: stats::population_variance(&values)?,
        })
    }
}
