//! Parameters for noisy graph construction.

use std::{fmt, str::FromStr};

use crate::error::NoiseError;

/// Order in which the constructor visits input nodes.
///
/// Construction is order-sensitive: each node ranks its candidates by the σ
/// values other nodes hold at that moment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ProcessingOrder {
    /// Visit nodes in the order the caller enumerates them.
    #[default]
    AsSupplied,
    /// Visit nodes in ascending node order.
    Ascending,
    /// Visit nodes in an order shuffled with the seeded RNG.
    Shuffled,
}

impl ProcessingOrder {
    /// Returns the kebab-case name used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AsSupplied => "as-supplied",
            Self::Ascending => "ascending",
            Self::Shuffled => "shuffled",
        }
    }
}

impl fmt::Display for ProcessingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ProcessingOrder`] name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown processing order `{0}`; expected as-supplied, ascending, or shuffled")]
pub struct ParseProcessingOrderError(String);

impl FromStr for ProcessingOrder {
    type Err = ParseProcessingOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "as-supplied" => Ok(Self::AsSupplied),
            "ascending" => Ok(Self::Ascending),
            "shuffled" => Ok(Self::Shuffled),
            other => Err(ParseProcessingOrderError(other.to_owned())),
        }
    }
}

/// Validated configuration for [`NoiseConstructor`](crate::NoiseConstructor).
///
/// # Examples
/// ```
/// use noisygraph_core::{NoiseParams, ProcessingOrder};
///
/// let params = NoiseParams::new(0.5)?
///     .with_rng_seed(7)
///     .with_processing_order(ProcessingOrder::Ascending);
/// assert_eq!(params.ftrp(), 0.5);
/// assert_eq!(params.rng_seed(), 7);
/// # Ok::<(), noisygraph_core::NoiseError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    ftrp: f64,
    rng_seed: u64,
    order: ProcessingOrder,
}

impl NoiseParams {
    /// Creates parameters targeting `ftrp` fake edges per real edge.
    ///
    /// # Errors
    /// Returns [`NoiseError::InvalidFtrp`] unless `ftrp` lies in `(0, 1]`.
    pub fn new(ftrp: f64) -> Result<Self, NoiseError> {
        if !(ftrp > 0.0 && ftrp <= 1.0) {
            return Err(NoiseError::InvalidFtrp { got: ftrp });
        }
        Ok(Self {
            ftrp,
            rng_seed: 0x5EED_CAFE,
            order: ProcessingOrder::default(),
        })
    }

    /// Seeds the construction RNG so runs are reproducible.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Chooses the node processing order.
    #[must_use]
    pub const fn with_processing_order(mut self, order: ProcessingOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the target fake-to-real proportion.
    #[rustfmt::skip]
    #[must_use]
    pub const fn ftrp(&self) -> f64 { self.ftrp }

    /// Returns the RNG seed.
    #[rustfmt::skip]
    #[must_use]
    pub const fn rng_seed(&self) -> u64 { self.rng_seed }

    /// Returns the node processing order.
    #[rustfmt::skip]
    #[must_use]
    pub const fn processing_order(&self) -> ProcessingOrder { self.order }
}
