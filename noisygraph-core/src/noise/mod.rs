//! σ-guided stochastic construction of noisy graphs.
//!
//! [`NoiseConstructor`] replays a real graph node by node into an
//! [`EdgeStore`] and injects fake edges so that each node's fake/real ratio
//! approaches the target proportion (`ftrp`). A node's compliance score is
//! `σ = (fake / real) / ftrp`; σ ≥ 1 means the node has met its target.
//!
//! For every node, in processing order:
//!
//! 1. record its real edges and refresh σ for it and each neighbour;
//! 2. stop if σ(node) ≥ 1;
//! 3. draw the fake-edge budget `k` as one Bernoulli(ftrp) trial per real edge;
//! 4. rank the nodes it is not yet adjacent to by `(σ, node)` ascending;
//! 5. walk that fixed ranking adding fake edges until `k` edges were added,
//!    σ(node) ≥ 1, or the next candidate already has σ ≥ 1.

mod params;
mod sigma;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, info, instrument};

use crate::{
    error::{NoiseError, UncertaintyError},
    node::{EdgeStatus, NodeId, NodeKey, describe},
    simple_graph::SimpleGraph,
    store::EdgeStore,
    uncertainty::{UncertaintyConfig, UncertaintyProfile},
};

pub use self::{
    params::{NoiseParams, ParseProcessingOrderError, ProcessingOrder},
    sigma::{SigmaProfile, SigmaTable},
};

use self::sigma::sigma;

/// Why construction stopped adding fake edges for a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StopReason {
    /// σ(node) was already ≥ 1 after its real edges were recorded.
    AlreadyCompliant,
    /// The sampled budget was spent.
    BudgetSpent,
    /// σ(node) reached 1 while adding fake edges.
    NodeCompliant,
    /// The next candidate had σ ≥ 1 when the ranking was taken.
    CandidateCompliant,
    /// Every candidate received a fake edge.
    CandidatesExhausted,
}

/// Per-node record of a construction step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NodeOutcome {
    pub(crate) budget: usize,
    pub(crate) added: usize,
    pub(crate) stop: StopReason,
}

/// Tallies gathered while constructing a noisy graph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConstructionStats {
    /// Number of input nodes visited.
    pub nodes_processed: usize,
    /// Number of fake edges left in the finished graph.
    ///
    /// A fake edge that a later node declares as real is reclassified and no
    /// longer counted.
    pub fake_edges_added: usize,
    /// Number of processed nodes with σ ≥ 1 once construction finished.
    pub compliant_nodes: usize,
}

/// Builds noisy graphs from real adjacency enumerations.
///
/// # Examples
/// ```
/// use noisygraph_core::{EdgeStatus, NoiseConstructor, NoiseParams, SimpleGraph};
///
/// let graph = SimpleGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)])?;
/// let params = NoiseParams::new(0.5)?.with_rng_seed(42);
/// let noisy = NoiseConstructor::new(params).construct(graph.adjacency())?;
///
/// assert_eq!(noisy.store().edge_counts().real, 4);
/// assert_eq!(noisy.stats().nodes_processed, 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NoiseConstructor {
    params: NoiseParams,
}

impl NoiseConstructor {
    /// Creates a constructor with validated parameters.
    #[must_use]
    pub const fn new(params: NoiseParams) -> Self {
        Self { params }
    }

    /// Returns the parameters every run uses.
    #[rustfmt::skip]
    #[must_use]
    pub const fn params(&self) -> &NoiseParams { &self.params }

    /// Grows a noisy graph from `(node, real neighbours)` pairs.
    ///
    /// The whole input is validated before any edge is recorded.
    ///
    /// # Errors
    /// Returns [`NoiseError::IsolatedNode`] for a node with no neighbours and
    /// [`NoiseError::SelfLoop`] for a node listing itself.
    #[instrument(
        name = "core.construct",
        err,
        skip(self, adjacency),
        fields(
            ftrp = self.params.ftrp(),
            seed = self.params.rng_seed(),
            order = %self.params.processing_order(),
        ),
    )]
    pub fn construct<N, I, J>(&self, adjacency: I) -> Result<NoisyGraph<N>, NoiseError>
    where
        N: NodeKey,
        I: IntoIterator<Item = (N, J)>,
        J: IntoIterator<Item = N>,
    {
        let mut construction = Construction::new(self.params);
        let input = construction.prepare(adjacency)?;
        for (node, neighbours) in input {
            construction.process(node, neighbours);
        }
        Ok(construction.finish())
    }
}

/// Mutable state of a single construction run.
pub(crate) struct Construction<N> {
    params: NoiseParams,
    store: EdgeStore<N>,
    sigmas: Vec<f64>,
    processed: Vec<NodeId>,
    rng: SmallRng,
    stats: ConstructionStats,
}

impl<N: NodeKey> Construction<N> {
    pub(crate) fn new(params: NoiseParams) -> Self {
        Self {
            params,
            store: EdgeStore::new(),
            sigmas: Vec::new(),
            processed: Vec::new(),
            rng: SmallRng::seed_from_u64(params.rng_seed()),
            stats: ConstructionStats::default(),
        }
    }

    /// Collects, validates and orders the input.
    pub(crate) fn prepare<I, J>(&mut self, adjacency: I) -> Result<Vec<(N, Vec<N>)>, NoiseError>
    where
        I: IntoIterator<Item = (N, J)>,
        J: IntoIterator<Item = N>,
    {
        let mut input: Vec<(N, Vec<N>)> = adjacency
            .into_iter()
            .map(|(node, neighbours)| (node, neighbours.into_iter().collect()))
            .collect();
        for (position, (node, neighbours)) in input.iter().enumerate() {
            if neighbours.is_empty() {
                return Err(NoiseError::IsolatedNode {
                    node: describe(node),
                    position,
                });
            }
            if neighbours.contains(node) {
                return Err(NoiseError::SelfLoop {
                    node: describe(node),
                });
            }
        }
        match self.params.processing_order() {
            ProcessingOrder::AsSupplied => {}
            ProcessingOrder::Ascending => input.sort_by(|(a, _), (b, _)| a.cmp(b)),
            ProcessingOrder::Shuffled => input.shuffle(&mut self.rng),
        }
        Ok(input)
    }

    fn refresh(&mut self, id: NodeId) {
        let value = sigma(self.store.counts_of(id), self.params.ftrp());
        if id.index() >= self.sigmas.len() {
            self.sigmas.resize(id.index() + 1, 0.0);
        }
        self.sigmas[id.index()] = value;
    }

    fn link(&mut self, node: NodeId, other: NodeId, status: EdgeStatus) {
        self.store.link(node, other, status);
        self.refresh(node);
        self.refresh(other);
    }

    fn sample_budget(&mut self, real_degree: usize) -> usize {
        let ftrp = self.params.ftrp();
        (0..real_degree).filter(|_| self.rng.gen_bool(ftrp)).count()
    }

    fn ranked_candidates(&self, id: NodeId) -> Vec<(f64, NodeId)> {
        let mut candidates: Vec<(f64, NodeId)> = self
            .store
            .missing_neighbor_ids(id)
            .map(|other| (self.sigmas[other.index()], other))
            .collect();
        candidates.sort_by(|(left_sigma, left), (right_sigma, right)| {
            left_sigma.total_cmp(right_sigma).then_with(|| {
                let left_node = self.store.node(*left);
                let right_node = self.store.node(*right);
                left_node.cmp(&right_node)
            })
        });
        candidates
    }

    /// Runs the five construction steps for one node.
    pub(crate) fn process(&mut self, node: N, neighbours: Vec<N>) -> NodeOutcome {
        let id = self.store.add_node(node);
        for neighbour in neighbours {
            let other = self.store.add_node(neighbour);
            self.link(id, other, EdgeStatus::Real);
        }
        self.refresh(id);
        self.processed.push(id);
        self.stats.nodes_processed += 1;

        let outcome = self.inject_fake_edges(id);
        debug!(
            node = ?self.store.node(id),
            sigma = self.sigmas[id.index()],
            budget = outcome.budget,
            added = outcome.added,
            stop = ?outcome.stop,
            "processed node"
        );
        outcome
    }

    fn inject_fake_edges(&mut self, id: NodeId) -> NodeOutcome {
        let mut outcome = NodeOutcome {
            budget: 0,
            added: 0,
            stop: StopReason::AlreadyCompliant,
        };
        if self.sigmas[id.index()] >= 1.0 {
            return outcome;
        }

        outcome.budget = self.sample_budget(self.store.degree_of(id, EdgeStatus::Real));
        outcome.stop = StopReason::CandidatesExhausted;
        for (candidate_sigma, candidate) in self.ranked_candidates(id) {
            if outcome.added >= outcome.budget {
                outcome.stop = StopReason::BudgetSpent;
                break;
            }
            if self.sigmas[id.index()] >= 1.0 {
                outcome.stop = StopReason::NodeCompliant;
                break;
            }
            if candidate_sigma >= 1.0 {
                outcome.stop = StopReason::CandidateCompliant;
                break;
            }
            self.link(id, candidate, EdgeStatus::Fake);
            outcome.added += 1;
        }
        outcome
    }

    #[cfg(test)]
    pub(crate) fn sigma_of(&self, id: NodeId) -> Option<f64> {
        self.sigmas.get(id.index()).copied()
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &EdgeStore<N> {
        &self.store
    }

    pub(crate) fn finish(self) -> NoisyGraph<N> {
        let sigmas = SigmaTable::from_entries(self.processed.iter().filter_map(|&id| {
            let node = self.store.node(id)?.clone();
            Some((node, self.sigmas[id.index()]))
        }));
        let stats = ConstructionStats {
            fake_edges_added: self.store.edge_counts().fake,
            compliant_nodes: sigmas.compliant(),
            ..self.stats
        };
        info!(
            nodes = stats.nodes_processed,
            fake_edges = stats.fake_edges_added,
            compliant = stats.compliant_nodes,
            "noisy graph constructed"
        );
        NoisyGraph {
            store: self.store,
            sigmas,
            params: self.params,
            stats,
        }
    }
}

/// Result of a construction run: the populated store and its σ snapshot.
#[derive(Clone, Debug)]
pub struct NoisyGraph<N> {
    store: EdgeStore<N>,
    sigmas: SigmaTable<N>,
    params: NoiseParams,
    stats: ConstructionStats,
}

impl<N: NodeKey> NoisyGraph<N> {
    /// Returns the populated edge store.
    #[rustfmt::skip]
    #[must_use]
    pub const fn store(&self) -> &EdgeStore<N> { &self.store }

    /// Returns the frozen σ table.
    #[rustfmt::skip]
    #[must_use]
    pub const fn sigmas(&self) -> &SigmaTable<N> { &self.sigmas }

    /// Returns the parameters the graph was built with.
    #[rustfmt::skip]
    #[must_use]
    pub const fn params(&self) -> &NoiseParams { &self.params }

    /// Returns the tallies gathered during construction.
    #[rustfmt::skip]
    #[must_use]
    pub const fn stats(&self) -> ConstructionStats { self.stats }

    /// Consumes the graph and returns its store.
    #[must_use]
    pub fn into_store(self) -> EdgeStore<N> {
        self.store
    }

    /// Materialises real and fake edges as a plain graph.
    #[must_use]
    pub fn to_simple_graph(&self) -> SimpleGraph<N> {
        self.store.to_simple_graph()
    }

    /// Returns the graph-level uncertainty; see [`EdgeStore::uncertainty`].
    ///
    /// # Errors
    /// Propagates [`EdgeStore::uncertainty`] failures.
    pub fn uncertainty(&self, config: &UncertaintyConfig) -> Result<f64, UncertaintyError> {
        self.store.uncertainty(config)
    }

    /// Summarises per-node uncertainty; see [`EdgeStore::uncertainty_profile`].
    ///
    /// # Errors
    /// Propagates [`EdgeStore::uncertainty_profile`] failures.
    pub fn uncertainty_profile(
        &self,
        config: &UncertaintyConfig,
    ) -> Result<Option<UncertaintyProfile>, UncertaintyError> {
        self.store.uncertainty_profile(config)
    }
}
