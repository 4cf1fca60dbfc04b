//! Missing-edge enumeration and sampling.
//!
//! A missing edge is any pair of distinct registered nodes joined by neither
//! a real nor a fake edge. These helpers back the noise constructor's
//! candidate enumeration and the simpler uniform noise-injection strategies.

use std::collections::BTreeSet;

use rand::{Rng, seq::SliceRandom};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::GraphError,
    node::{Edge, EdgeStatus, NodeId, NodeKey},
};

use super::EdgeStore;

fn validate_fraction(fraction: f64) -> Result<f64, GraphError> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(fraction)
    } else {
        Err(GraphError::InvalidFraction { got: fraction })
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fraction is validated to [0, 1] so the product stays within 0..=len"
)]
fn scaled_count(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction).round() as usize).min(len)
}

impl<N: NodeKey> EdgeStore<N> {
    pub(crate) fn missing_neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count())
            .map(NodeId::new)
            .filter(move |&other| other != id && !self.is_adjacent(id, other))
    }

    fn missing_edges_of(&self, id: NodeId) -> BTreeSet<Edge<N>> {
        self.missing_neighbor_ids(id)
            .map(|other| self.canonical(id, other))
            .collect()
    }

    /// Returns the nodes `node` is not yet connected to, in insertion order.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::{EdgeStatus, EdgeStore};
    ///
    /// let store = EdgeStore::from_edges([(0, 1), (1, 2)], EdgeStatus::Real)?;
    /// let missing: Vec<_> = store.missing_neighbors(&0).expect("node exists");
    /// assert_eq!(missing, [&2]);
    /// # Ok::<(), noisygraph_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn missing_neighbors(&self, node: &N) -> Option<Vec<&N>> {
        let id = self.id_of(node)?;
        Some(
            self.missing_neighbor_ids(id)
                .map(|other| &self.nodes[other.index()])
                .collect(),
        )
    }

    /// Returns the canonical edges `node` is missing to reach every other node.
    #[must_use]
    pub fn missing_edges_for(&self, node: &N) -> Option<BTreeSet<Edge<N>>> {
        self.id_of(node).map(|id| self.missing_edges_of(id))
    }

    /// Returns every edge absent from the graph, i.e. the complement of the
    /// observed edge set.
    #[must_use]
    pub fn missing_edges(&self) -> BTreeSet<Edge<N>> {
        (0..self.node_count())
            .map(NodeId::new)
            .fold(BTreeSet::new(), |mut acc, id| {
                acc.extend(self.missing_edges_of(id));
                acc
            })
    }

    /// Parallel variant of [`Self::missing_edges`].
    ///
    /// Each node's missing edges are enumerated on the Rayon pool and merged
    /// by set union, so the result is identical to the sequential version.
    #[must_use]
    pub fn par_missing_edges(&self) -> BTreeSet<Edge<N>>
    where
        N: Send + Sync,
    {
        (0..self.node_count())
            .into_par_iter()
            .map(|index| self.missing_edges_of(NodeId::new(index)))
            .reduce(BTreeSet::new, |mut left, right| {
                left.extend(right);
                left
            })
    }

    /// Draws `round(|missing| × fraction)` distinct missing edges uniformly.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidFraction`] when `fraction` is outside
    /// `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::{EdgeStatus, EdgeStore};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let store = EdgeStore::from_edges([(0, 1), (1, 2), (1, 3), (3, 4)], EdgeStatus::Real)?;
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let sample = store.sample_missing_edges(0.5, &mut rng)?;
    /// assert_eq!(sample.len(), 3);
    /// # Ok::<(), noisygraph_core::GraphError>(())
    /// ```
    pub fn sample_missing_edges<R>(
        &self,
        fraction: f64,
        rng: &mut R,
    ) -> Result<Vec<Edge<N>>, GraphError>
    where
        R: Rng + ?Sized,
    {
        let fraction = validate_fraction(fraction)?;
        let missing: Vec<_> = self.missing_edges().into_iter().collect();
        let amount = scaled_count(missing.len(), fraction);
        Ok(missing.choose_multiple(rng, amount).cloned().collect())
    }

    /// Inserts a uniform sample of missing edges as fake edges.
    ///
    /// Returns the number of edges added.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidFraction`] when `fraction` is outside
    /// `[0, 1]`.
    pub fn add_random_missing_edges<R>(&mut self, fraction: f64, rng: &mut R) -> Result<usize, GraphError>
    where
        R: Rng + ?Sized,
    {
        let sample = self.sample_missing_edges(fraction, rng)?;
        let added = sample.len();
        self.add_edges_from(sample.into_iter().map(Edge::into_pair), EdgeStatus::Fake)?;
        debug!(added, fraction, "added random missing edges");
        Ok(added)
    }

    /// Picks enough of `node`'s missing edges for its fake degree to reach
    /// `round(fraction × real_degree)`.
    ///
    /// The amount is clamped to zero when the node already has enough fake
    /// edges and to the number of available missing edges.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] for an unknown node and
    /// [`GraphError::InvalidFraction`] when `fraction` is outside `[0, 1]`.
    pub fn fake_edges_ensuring_fraction<R>(
        &self,
        node: &N,
        fraction: f64,
        rng: &mut R,
    ) -> Result<Vec<Edge<N>>, GraphError>
    where
        R: Rng + ?Sized,
    {
        let fraction = validate_fraction(fraction)?;
        let id = self.require(node)?;
        let missing: Vec<_> = self.missing_edges_of(id).into_iter().collect();
        let counts = self.counts_of(id);
        let wanted = scaled_count(counts.real, fraction);
        let amount = wanted.saturating_sub(counts.fake).min(missing.len());
        Ok(missing.choose_multiple(rng, amount).cloned().collect())
    }

    /// Adds the edges chosen by [`Self::fake_edges_ensuring_fraction`] as
    /// fake edges, returning how many were added.
    ///
    /// # Errors
    /// Propagates the errors of [`Self::fake_edges_ensuring_fraction`].
    pub fn add_missing_edges_ensuring_fraction<R>(
        &mut self,
        node: &N,
        fraction: f64,
        rng: &mut R,
    ) -> Result<usize, GraphError>
    where
        R: Rng + ?Sized,
    {
        let edges = self.fake_edges_ensuring_fraction(node, fraction, rng)?;
        let added = edges.len();
        self.add_edges_from(edges.into_iter().map(Edge::into_pair), EdgeStatus::Fake)?;
        Ok(added)
    }

    /// Applies [`Self::add_missing_edges_ensuring_fraction`] to every node in
    /// insertion order, returning the total number of fake edges added.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidFraction`] when `fraction` is outside
    /// `[0, 1]`.
    pub fn add_missing_edges_per_node_ensuring_fraction<R>(
        &mut self,
        fraction: f64,
        rng: &mut R,
    ) -> Result<usize, GraphError>
    where
        R: Rng + ?Sized,
    {
        validate_fraction(fraction)?;
        let mut total = 0;
        for index in 0..self.node_count() {
            let node = self.nodes[index].clone();
            total += self.add_missing_edges_ensuring_fraction(&node, fraction, rng)?;
        }
        debug!(added = total, fraction, "ensured per-node fake fraction");
        Ok(total)
    }
}
