//! Graph- and node-level uncertainty over an [`EdgeStore`].

use tracing::{debug, instrument};

use crate::{
    error::UncertaintyError,
    node::{NodeKey, describe},
    stats,
    store::{EdgeCounts, EdgeStore},
};

use super::{Knowledge, UncertaintyConfig, hypothesis_count, uncertainty};

/// Summary of per-node uncertainty across a graph.
///
/// Nodes without incident edges have undefined uncertainty; they are left out
/// of the statistics and tallied in [`Self::excluded`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UncertaintyProfile {
    /// Mean uncertainty over eligible nodes.
    pub mean: f64,
    /// Population standard deviation over eligible nodes.
    pub std_dev: f64,
    /// Smallest per-node uncertainty.
    pub min: f64,
    /// Largest per-node uncertainty.
    pub max: f64,
    /// Number of nodes that contributed.
    pub nodes: usize,
    /// Number of nodes skipped because they have no incident edges.
    pub excluded: usize,
}

fn totals(counts: EdgeCounts) -> (u64, u64) {
    (counts.total() as u64, counts.fake as u64)
}

impl<N: NodeKey> EdgeStore<N> {
    /// Counts the hypotheses about which of the graph's edges are fake.
    ///
    /// # Errors
    /// Returns [`UncertaintyError::HypothesisOverflow`] when the count does
    /// not fit in 128 bits.
    pub fn hypothesis_count(&self, knowledge: Knowledge) -> Result<u128, UncertaintyError> {
        let (total, fake) = totals(self.edge_counts());
        hypothesis_count(total, fake, knowledge)
    }

    /// Returns the graph-level uncertainty.
    ///
    /// # Errors
    /// Propagates [`uncertainty`] failures, which cannot occur for counts
    /// taken from a consistent store.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::{EdgeStatus, EdgeStore, UncertaintyConfig};
    ///
    /// let mut store = EdgeStore::from_edges([(0, 1), (1, 2)], EdgeStatus::Real)?;
    /// store.add_edge(0, 2, EdgeStatus::Fake)?;
    /// let bits = store.uncertainty(&UncertaintyConfig::default())?;
    /// assert!((bits - 3_f64.log2()).abs() < 1e-12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn uncertainty(&self, config: &UncertaintyConfig) -> Result<f64, UncertaintyError> {
        let (total, fake) = totals(self.edge_counts());
        uncertainty(total, fake, config)
    }

    /// Returns the uncertainty of `node`'s incident edges.
    ///
    /// `Ok(None)` marks a node without incident edges, whose uncertainty is
    /// undefined.
    ///
    /// # Errors
    /// Returns [`UncertaintyError::NodeNotFound`] for an unknown node.
    pub fn node_uncertainty(
        &self,
        node: &N,
        config: &UncertaintyConfig,
    ) -> Result<Option<f64>, UncertaintyError> {
        let counts = self
            .edge_counts_for(node)
            .ok_or_else(|| UncertaintyError::NodeNotFound {
                node: describe(node),
            })?;
        Self::uncertainty_of(counts, config)
    }

    fn uncertainty_of(
        counts: EdgeCounts,
        config: &UncertaintyConfig,
    ) -> Result<Option<f64>, UncertaintyError> {
        if counts.total() == 0 {
            return Ok(None);
        }
        let (total, fake) = totals(counts);
        uncertainty(total, fake, config).map(Some)
    }

    /// Returns every node with defined uncertainty, in insertion order.
    ///
    /// # Errors
    /// Propagates [`uncertainty`] failures.
    pub fn node_uncertainties(
        &self,
        config: &UncertaintyConfig,
    ) -> Result<Vec<(&N, f64)>, UncertaintyError> {
        let mut values = Vec::with_capacity(self.node_count());
        for node in self.nodes() {
            let counts = self.edge_counts_for(node).unwrap_or_default();
            if let Some(value) = Self::uncertainty_of(counts, config)? {
                values.push((node, value));
            }
        }
        Ok(values)
    }

    /// Summarises per-node uncertainty.
    ///
    /// Returns `Ok(None)` when no node has incident edges.
    ///
    /// # Errors
    /// Propagates [`uncertainty`] failures.
    #[instrument(
        name = "core.uncertainty_profile",
        err,
        skip(self),
        fields(nodes = self.node_count())
    )]
    pub fn uncertainty_profile(
        &self,
        config: &UncertaintyConfig,
    ) -> Result<Option<UncertaintyProfile>, UncertaintyError> {
        let values: Vec<f64> = self
            .node_uncertainties(config)?
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        let excluded = self.node_count() - values.len();
        let (Some(mean), Some(std_dev)) = (stats::mean(&values), stats::population_std_dev(&values))
        else {
            debug!(excluded, "no node has incident edges");
            return Ok(None);
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        debug!(mean, std_dev, excluded, "computed uncertainty profile");
        Ok(Some(UncertaintyProfile {
            mean,
            std_dev,
            min,
            max,
            nodes: values.len(),
            excluded,
        }))
    }
}
