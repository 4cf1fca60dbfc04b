//! Centrality distortion profiling.
//!
//! Compares a centrality on the original graph with the same centrality on
//! the noisy graph (real and fake edges alike) through three statistics:
//!
//! - `distance`: 1-Wasserstein distance between the two score multisets;
//! - `correlation`: Spearman correlation of the scores paired by node;
//! - `mean_change`: `|mean(noisy) - mean(original)| / mean(original)`.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    centrality::{Centrality, Scores},
    error::{ProfileError, ScoreSide},
    node::{NodeKey, describe},
    noise::NoisyGraph,
    simple_graph::SimpleGraph,
    stats,
};

/// How far a centrality moved between the original and the noisy graph.
#[derive(Clone, Debug, PartialEq)]
pub struct DistortionProfile {
    /// Name of the centrality measure.
    pub centrality: Arc<str>,
    /// 1-Wasserstein distance between the score distributions.
    pub distance: f64,
    /// Spearman rank correlation; `None` when one ranking is constant and
    /// the other is not.
    pub correlation: Option<f64>,
    /// Relative change of the mean score; `None` when the original mean is
    /// zero.
    pub mean_change: Option<f64>,
}

fn check_side<N: NodeKey>(
    centrality: &Arc<str>,
    side: ScoreSide,
    scores: &Scores<N>,
) -> Result<(), ProfileError> {
    if scores.is_empty() {
        return Err(ProfileError::EmptyScores {
            centrality: Arc::clone(centrality),
            side,
        });
    }
    if let Some((node, _)) = scores.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ProfileError::NonFiniteScore {
            centrality: Arc::clone(centrality),
            side,
            node: describe(node),
        });
    }
    Ok(())
}

fn check_coverage<N: NodeKey>(
    centrality: &Arc<str>,
    present: &Scores<N>,
    other: &Scores<N>,
    other_side: ScoreSide,
) -> Result<(), ProfileError> {
    match present.keys().find(|node| !other.contains_key(*node)) {
        Some(node) => Err(ProfileError::MissingNode {
            centrality: Arc::clone(centrality),
            side: other_side,
            node: describe(node),
        }),
        None => Ok(()),
    }
}

/// Compares two precomputed score maps.
///
/// # Errors
/// Returns [`ProfileError::EmptyScores`] when a map is empty,
/// [`ProfileError::NonFiniteScore`] for NaN or infinite scores and
/// [`ProfileError::MissingNode`] when the maps cover different nodes.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use noisygraph_core::compare_scores;
///
/// let original = BTreeMap::from([(0, 1.0), (1, 2.0)]);
/// let noisy = BTreeMap::from([(0, 2.0), (1, 4.0)]);
/// let profile = compare_scores("demo", &original, &noisy)?;
/// assert_eq!(profile.correlation, Some(1.0));
/// assert_eq!(profile.mean_change, Some(1.0));
/// # Ok::<(), noisygraph_core::ProfileError>(())
/// ```
pub fn compare_scores<N: NodeKey>(
    centrality: &str,
    original: &Scores<N>,
    noisy: &Scores<N>,
) -> Result<DistortionProfile, ProfileError> {
    let name: Arc<str> = Arc::from(centrality);
    check_side(&name, ScoreSide::Original, original)?;
    check_side(&name, ScoreSide::Noisy, noisy)?;
    check_coverage(&name, original, noisy, ScoreSide::Noisy)?;
    check_coverage(&name, noisy, original, ScoreSide::Original)?;

    // Both maps hold the same keys, so their value orders pair up by node.
    let before: Vec<f64> = original.values().copied().collect();
    let after: Vec<f64> = noisy.values().copied().collect();

    let distance = stats::wasserstein_distance(&before, &after).unwrap_or_default();
    let correlation = stats::spearman_correlation(&before, &after);
    let mean_change = match (stats::mean(&before), stats::mean(&after)) {
        (Some(base), Some(moved)) if base != 0.0 => Some((moved - base).abs() / base),
        _ => None,
    };
    Ok(DistortionProfile {
        centrality: name,
        distance,
        correlation,
        mean_change,
    })
}

/// Profiles centralities of a noisy graph against its original.
///
/// The noisy side is materialised once as a [`SimpleGraph`] and reused for
/// every centrality.
#[derive(Debug)]
pub struct DistortionProfiler<'a, N> {
    original: &'a SimpleGraph<N>,
    noisy: SimpleGraph<N>,
}

impl<'a, N: NodeKey> DistortionProfiler<'a, N> {
    /// Compares `original` with an already materialised noisy graph.
    #[must_use]
    pub const fn new(original: &'a SimpleGraph<N>, noisy: SimpleGraph<N>) -> Self {
        Self { original, noisy }
    }

    /// Compares `original` with the real and fake edges of `noisy`.
    #[must_use]
    pub fn for_noisy_graph(original: &'a SimpleGraph<N>, noisy: &NoisyGraph<N>) -> Self {
        Self::new(original, noisy.to_simple_graph())
    }

    /// Returns the noisy graph as seen by the centralities.
    #[rustfmt::skip]
    #[must_use]
    pub const fn noisy(&self) -> &SimpleGraph<N> { &self.noisy }

    /// Profiles a single centrality.
    ///
    /// # Errors
    /// Propagates [`compare_scores`] failures.
    #[instrument(
        name = "core.distortion_profile",
        err,
        skip_all,
        fields(centrality = centrality.name()),
    )]
    pub fn profile<C>(&self, centrality: &C) -> Result<DistortionProfile, ProfileError>
    where
        C: Centrality<N> + ?Sized,
    {
        let original = centrality.scores(self.original);
        let noisy = centrality.scores(&self.noisy);
        let profile = compare_scores(centrality.name(), &original, &noisy)?;
        debug!(
            distance = profile.distance,
            correlation = ?profile.correlation,
            mean_change = ?profile.mean_change,
            "profiled centrality"
        );
        Ok(profile)
    }

    /// Profiles every centrality in order.
    ///
    /// # Errors
    /// Returns the first failing centrality's error.
    pub fn profile_all(
        &self,
        centralities: &[&dyn Centrality<N>],
    ) -> Result<Vec<DistortionProfile>, ProfileError> {
        centralities
            .iter()
            .map(|centrality| self.profile(*centrality))
            .collect()
    }
}

#[cfg(test)]
mod tests;
