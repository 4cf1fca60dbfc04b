//! Descriptive statistics and distribution comparisons.
//!
//! These primitives back the uncertainty profile and the distortion profiler.
//! They operate on plain `f64` slices and report undefined results as `None`
//! rather than `NaN`.

use std::cmp::Ordering;

#[expect(
    clippy::cast_precision_loss,
    reason = "sample sizes are far below 2^52 so the conversion is exact"
)]
fn len_as_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

/// Returns the arithmetic mean, or `None` for an empty slice.
///
/// # Examples
/// ```
/// use noisygraph_core::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / len_as_f64(values))
}

/// Returns the population variance, or `None` for an empty slice.
#[must_use]
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let centre = mean(values)?;
    let squared: f64 = values.iter().map(|value| (value - centre).powi(2)).sum();
    Some(squared / len_as_f64(values))
}

/// Returns the population standard deviation, or `None` for an empty slice.
#[must_use]
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Assigns 1-based ranks, averaging the ranks of tied values.
///
/// # Examples
/// ```
/// use noisygraph_core::stats::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 20.0, 10.0]), [1.5, 3.0, 1.5]);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "rank positions are far below 2^52 so the conversion is exact"
)]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].total_cmp(&values[order[start]]) == Ordering::Equal {
            end += 1;
        }
        // Positions start..end share the mean of ranks start+1..=end.
        let shared = (start + end + 1) as f64 / 2.0;
        for &position in &order[start..end] {
            ranks[position] = shared;
        }
        start = end;
    }
    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let mut covariance = 0.0;
    let mut spread_x = 0.0;
    let mut spread_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        spread_x += dx * dx;
        spread_y += dy * dy;
    }
    if spread_x == 0.0 || spread_y == 0.0 {
        return None;
    }
    Some((covariance / (spread_x.sqrt() * spread_y.sqrt())).clamp(-1.0, 1.0))
}

/// Computes the Spearman rank correlation of two paired samples.
///
/// Ties receive average ranks. Identical rankings yield exactly `1.0`, even
/// when every value is tied. Returns `None` when the samples differ in
/// length, are empty, or when exactly one side is constant.
///
/// # Examples
/// ```
/// use noisygraph_core::stats::spearman_correlation;
///
/// let rho = spearman_correlation(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]);
/// assert_eq!(rho, Some(1.0));
/// let reversed = spearman_correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
/// assert_eq!(reversed, Some(-1.0));
/// ```
#[must_use]
pub fn spearman_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let ranks_x = average_ranks(x);
    let ranks_y = average_ranks(y);
    if ranks_x == ranks_y {
        return Some(1.0);
    }
    pearson(&ranks_x, &ranks_y)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut copy = values.to_vec();
    copy.sort_by(f64::total_cmp);
    copy
}

fn empirical_cdf(sorted_sample: &[f64], at: f64) -> f64 {
    let below = sorted_sample.partition_point(|&value| value <= at);
    #[expect(
        clippy::cast_precision_loss,
        reason = "sample sizes are far below 2^52 so the conversion is exact"
    )]
    let fraction = below as f64 / sorted_sample.len() as f64;
    fraction
}

/// Computes the 1-Wasserstein (earth mover's) distance between two samples.
///
/// Both samples are treated as unordered multisets; the distance is the area
/// between their empirical cumulative distribution functions. Returns `None`
/// when either sample is empty.
///
/// # Examples
/// ```
/// use noisygraph_core::stats::wasserstein_distance;
///
/// let distance = wasserstein_distance(&[0.0, 1.0, 3.0], &[5.0, 6.0, 8.0]);
/// assert_eq!(distance, Some(5.0));
/// ```
#[must_use]
pub fn wasserstein_distance(u: &[f64], v: &[f64]) -> Option<f64> {
    if u.is_empty() || v.is_empty() {
        return None;
    }
    let u_sorted = sorted(u);
    let v_sorted = sorted(v);
    let mut all: Vec<f64> = u_sorted.iter().chain(&v_sorted).copied().collect();
    all.sort_by(f64::total_cmp);

    let distance = all
        .windows(2)
        .map(|pair| {
            let (left, right) = (pair[0], pair[1]);
            let gap = empirical_cdf(&u_sorted, left) - empirical_cdf(&v_sorted, left);
            gap.abs() * (right - left)
        })
        .sum();
    Some(distance)
}
