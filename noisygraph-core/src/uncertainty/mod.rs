//! Combinatorial uncertainty quantification.
//!
//! An observer who sees `T` edges and knows that `F` of them are fake must
//! entertain `C(T, F)` hypotheses about which edges to discard. When only an
//! upper bound `F` is known the count becomes `Σ_{i=0..F} C(T, i)`. The
//! uncertainty is the logarithm of that count in a configurable base.
//!
//! Counts are computed exactly in `u128`. The logarithm falls back to
//! log-space summation once the exact count no longer fits, so uncertainty is
//! finite for every valid input.

mod graph;

use crate::error::UncertaintyError;

pub use self::graph::UncertaintyProfile;

/// What the observer knows about the number of fake edges.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Knowledge {
    /// The exact number of fake edges is known.
    #[default]
    Exact,
    /// Only an upper bound on the number of fake edges is known.
    UpperBound,
}

/// Parameters shared by the uncertainty queries.
///
/// # Examples
/// ```
/// use noisygraph_core::{Knowledge, UncertaintyConfig};
///
/// let config = UncertaintyConfig::default()
///     .with_base(10.0)?
///     .with_knowledge(Knowledge::UpperBound);
/// assert_eq!(config.base(), 10.0);
/// assert_eq!(config.knowledge(), Knowledge::UpperBound);
/// # Ok::<(), noisygraph_core::UncertaintyError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UncertaintyConfig {
    base: f64,
    knowledge: Knowledge,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            base: 2.0,
            knowledge: Knowledge::Exact,
        }
    }
}

fn validate_base(base: f64) -> Result<f64, UncertaintyError> {
    if base.is_finite() && base > 0.0 && base != 1.0 {
        Ok(base)
    } else {
        Err(UncertaintyError::InvalidBase { got: base })
    }
}

impl UncertaintyConfig {
    /// Creates a configuration with an explicit base and knowledge model.
    ///
    /// # Errors
    /// Returns [`UncertaintyError::InvalidBase`] unless `base` is finite,
    /// positive and different from one.
    pub fn new(base: f64, knowledge: Knowledge) -> Result<Self, UncertaintyError> {
        Ok(Self {
            base: validate_base(base)?,
            knowledge,
        })
    }

    /// Replaces the logarithm base.
    ///
    /// # Errors
    /// Returns [`UncertaintyError::InvalidBase`] unless `base` is finite,
    /// positive and different from one.
    pub fn with_base(mut self, base: f64) -> Result<Self, UncertaintyError> {
        self.base = validate_base(base)?;
        Ok(self)
    }

    /// Replaces the knowledge model.
    #[must_use]
    pub const fn with_knowledge(mut self, knowledge: Knowledge) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Returns the logarithm base.
    #[rustfmt::skip]
    #[must_use]
    pub const fn base(&self) -> f64 { self.base }

    /// Returns the knowledge model.
    #[rustfmt::skip]
    #[must_use]
    pub const fn knowledge(&self) -> Knowledge { self.knowledge }
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    a
}

/// Exact binomial coefficient, `None` when it does not fit in `u128`.
fn binomial(n: u64, k: u64) -> Option<u128> {
    let k = k.min(n - k);
    let n = u128::from(n);
    let mut result: u128 = 1;
    for i in 0..u128::from(k) {
        // result = C(n, i); the next value C(n, i + 1) is integral, so
        // (i + 1) / g always divides (n - i).
        let step = i + 1;
        let g = gcd(result, step);
        result = (result / g).checked_mul((n - i) / (step / g))?;
    }
    Some(result)
}

fn check_counts(total: u64, fake: u64) -> Result<(), UncertaintyError> {
    if fake > total {
        Err(UncertaintyError::FakeExceedsTotal { total, fake })
    } else {
        Ok(())
    }
}

fn exact_count(total: u64, fake: u64, knowledge: Knowledge) -> Option<u128> {
    match knowledge {
        Knowledge::Exact => binomial(total, fake),
        Knowledge::UpperBound => (0..=fake).try_fold(0_u128, |acc, i| {
            binomial(total, i).and_then(|term| acc.checked_add(term))
        }),
    }
}

/// Counts the hypotheses an observer must entertain.
///
/// # Errors
/// Returns [`UncertaintyError::FakeExceedsTotal`] when `fake > total` and
/// [`UncertaintyError::HypothesisOverflow`] when the count does not fit in
/// 128 bits.
///
/// # Examples
/// ```
/// use noisygraph_core::{Knowledge, hypothesis_count};
///
/// assert_eq!(hypothesis_count(12, 6, Knowledge::Exact)?, 924);
/// assert_eq!(hypothesis_count(12, 6, Knowledge::UpperBound)?, 2510);
/// # Ok::<(), noisygraph_core::UncertaintyError>(())
/// ```
pub fn hypothesis_count(total: u64, fake: u64, knowledge: Knowledge) -> Result<u128, UncertaintyError> {
    check_counts(total, fake)?;
    exact_count(total, fake, knowledge).ok_or(UncertaintyError::HypothesisOverflow { total, fake })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "inputs are edge counts that f64 represents well enough for logarithms"
)]
fn ln_u64(value: u64) -> f64 {
    (value as f64).ln()
}

/// Natural logarithm of every `C(total, i)` for `i` in `0..=fake`.
fn ln_binomials(total: u64, fake: u64) -> impl Iterator<Item = f64> {
    (0..=fake).scan(0.0, move |ln_c, i| {
        let current = *ln_c;
        if i < total {
            *ln_c += ln_u64(total - i) - ln_u64(i + 1);
        }
        Some(current)
    })
}

fn ln_count(total: u64, fake: u64, knowledge: Knowledge) -> f64 {
    if let Some(count) = exact_count(total, fake, knowledge) {
        #[expect(
            clippy::cast_precision_loss,
            reason = "the logarithm tolerates rounding of very large counts"
        )]
        let approx = count as f64;
        return approx.ln();
    }
    match knowledge {
        Knowledge::Exact => ln_binomials(total, fake).last().unwrap_or(0.0),
        Knowledge::UpperBound => {
            let terms: Vec<f64> = ln_binomials(total, fake).collect();
            let peak = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let scaled: f64 = terms.iter().map(|term| (term - peak).exp()).sum();
            peak + scaled.ln()
        }
    }
}

/// Returns `log_base` of the hypothesis count.
///
/// # Errors
/// Returns [`UncertaintyError::FakeExceedsTotal`] when `fake > total` and
/// [`UncertaintyError::InvalidBase`] for an unusable base.
pub fn log_hypothesis_count(
    total: u64,
    fake: u64,
    knowledge: Knowledge,
    base: f64,
) -> Result<f64, UncertaintyError> {
    check_counts(total, fake)?;
    let base = validate_base(base)?;
    Ok(ln_count(total, fake, knowledge) / base.ln())
}

/// Returns the uncertainty of observing `total` edges of which `fake` are
/// fake, under `config`.
///
/// # Errors
/// Returns [`UncertaintyError::FakeExceedsTotal`] when `fake > total`.
///
/// # Examples
/// ```
/// use noisygraph_core::{UncertaintyConfig, uncertainty};
///
/// let bits = uncertainty(4, 2, &UncertaintyConfig::default())?;
/// assert!((bits - 6_f64.log2()).abs() < 1e-12);
/// # Ok::<(), noisygraph_core::UncertaintyError>(())
/// ```
pub fn uncertainty(total: u64, fake: u64, config: &UncertaintyConfig) -> Result<f64, UncertaintyError> {
    log_hypothesis_count(total, fake, config.knowledge, config.base)
}
