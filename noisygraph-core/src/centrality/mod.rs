//! Centrality measures consumed by the distortion profiler.
//!
//! The profiler treats a centrality as an opaque, deterministic function from
//! a [`SimpleGraph`] to per-node scores. This module defines that seam as the
//! [`Centrality`] trait and ships the four classic measures behind it.

mod eigenvector;
mod paths;

use std::{collections::BTreeMap, fmt, marker::PhantomData};

use crate::{node::NodeKey, simple_graph::SimpleGraph};

pub use self::{
    eigenvector::EigenvectorCentrality,
    paths::{BetweennessCentrality, ClosenessCentrality},
};

/// Per-node scores keyed by node.
pub type Scores<N> = BTreeMap<N, f64>;

/// A deterministic per-node score over an undirected graph.
///
/// Implementations must score every node of the graph they are given.
pub trait Centrality<N: NodeKey> {
    /// Short name used in logs, errors and reports.
    fn name(&self) -> &str;

    /// Scores every node of `graph`.
    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N>;
}

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52 so the conversion is exact"
)]
pub(crate) fn as_f64(value: usize) -> f64 {
    value as f64
}

/// Degree divided by `n - 1`.
///
/// A graph with a single node scores it as `1.0`.
///
/// # Examples
/// ```
/// use noisygraph_core::{Centrality, DegreeCentrality, SimpleGraph};
///
/// let star = SimpleGraph::from_edges([(0, 1), (0, 2), (0, 3)])?;
/// let scores = DegreeCentrality.scores(&star);
/// assert_eq!(scores[&0], 1.0);
/// assert_eq!(scores[&1], 1.0 / 3.0);
/// # Ok::<(), noisygraph_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DegreeCentrality;

impl<N: NodeKey> Centrality<N> for DegreeCentrality {
    fn name(&self) -> &str {
        "degree"
    }

    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N> {
        let n = graph.node_count();
        if n <= 1 {
            return graph.nodes().map(|node| (node.clone(), 1.0)).collect();
        }
        let scale = as_f64(n - 1);
        graph
            .nodes()
            .map(|node| {
                let degree = graph.degree(node).unwrap_or_default();
                (node.clone(), as_f64(degree) / scale)
            })
            .collect()
    }
}

/// Adapts a closure into a [`Centrality`].
///
/// # Examples
/// ```
/// use noisygraph_core::{Centrality, FnCentrality, SimpleGraph};
///
/// let constant = FnCentrality::new("constant", |graph: &SimpleGraph<u8>| {
///     graph.nodes().map(|&node| (node, 1.0)).collect()
/// });
/// let graph = SimpleGraph::from_edges([(1, 2)])?;
/// assert_eq!(constant.name(), "constant");
/// assert_eq!(constant.scores(&graph).len(), 2);
/// # Ok::<(), noisygraph_core::GraphError>(())
/// ```
pub struct FnCentrality<N, F> {
    name: String,
    score: F,
    _nodes: PhantomData<fn(&SimpleGraph<N>)>,
}

impl<N, F> FnCentrality<N, F>
where
    N: NodeKey,
    F: Fn(&SimpleGraph<N>) -> Scores<N>,
{
    /// Wraps `score` under `name`.
    pub fn new(name: impl Into<String>, score: F) -> Self {
        Self {
            name: name.into(),
            score,
            _nodes: PhantomData,
        }
    }
}

impl<N, F> fmt::Debug for FnCentrality<N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCentrality")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<N, F> Centrality<N> for FnCentrality<N, F>
where
    N: NodeKey,
    F: Fn(&SimpleGraph<N>) -> Scores<N>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N> {
        (self.score)(graph)
    }
}

#[cfg(test)]
mod tests;
