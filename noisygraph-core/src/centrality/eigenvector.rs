//! Eigenvector centrality by power iteration.

use tracing::warn;

use crate::{node::NodeKey, simple_graph::SimpleGraph};

use super::{Centrality, Scores, as_f64};

/// Eigenvector centrality computed by power iteration on `A + I`.
///
/// Iteration starts from the uniform vector, normalises to unit L2 norm after
/// every step and stops once the L1 change drops below `n × tolerance`. If
/// the iteration budget runs out the last iterate is returned and a warning
/// is logged.
#[derive(Clone, Copy, Debug)]
pub struct EigenvectorCentrality {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for EigenvectorCentrality {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1.0e-6,
        }
    }
}

impl EigenvectorCentrality {
    /// Overrides the iteration budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Overrides the per-node convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn iterate<N: NodeKey>(&self, graph: &SimpleGraph<N>) -> Vec<f64> {
        let n = graph.node_count();
        let mut current = vec![1.0 / as_f64(n); n];
        let threshold = as_f64(n) * self.tolerance;
        for _ in 0..self.max_iterations {
            let mut next = current.clone();
            for (index, &weight) in current.iter().enumerate() {
                for &neighbour in graph.neighbour_indices(index) {
                    next[neighbour] += weight;
                }
            }
            let norm = next.iter().map(|value| value * value).sum::<f64>().sqrt();
            let scale = if norm == 0.0 { 1.0 } else { norm };
            for value in &mut next {
                *value /= scale;
            }
            let change: f64 = next
                .iter()
                .zip(&current)
                .map(|(after, before)| (after - before).abs())
                .sum();
            current = next;
            if change < threshold {
                return current;
            }
        }
        warn!(
            nodes = n,
            max_iterations = self.max_iterations,
            "eigenvector centrality did not converge; returning last iterate"
        );
        current
    }
}

impl<N: NodeKey> Centrality<N> for EigenvectorCentrality {
    fn name(&self) -> &str {
        "eigenvector"
    }

    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N> {
        if graph.node_count() == 0 {
            return Scores::new();
        }
        self.iterate(graph)
            .into_iter()
            .enumerate()
            .map(|(index, score)| (graph.node_at(index).clone(), score))
            .collect()
    }
}
