//! Error types for the noisygraph core library.
//!
//! Every concern owns a `thiserror` enum paired with a stable
//! machine-readable code so callers can branch on failures without matching
//! on display strings.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised by [`crate::EdgeStore`] mutations and lookups.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// An edge joined a node to itself.
    #[error("self-loop on node {node} is not allowed")]
    SelfLoop {
        /// Rendering of the offending node.
        node: Arc<str>,
    },
    /// The requested node is not part of the graph.
    #[error("node {node} is not part of the graph")]
    NodeNotFound {
        /// Rendering of the missing node.
        node: Arc<str>,
    },
    /// A sampling fraction fell outside `[0, 1]`.
    #[error("fraction must lie in [0, 1] (got {got})")]
    InvalidFraction {
        /// The rejected fraction.
        got: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The requested node is not part of the graph.
        NodeNotFound => NodeNotFound { .. } => "GRAPH_NODE_NOT_FOUND",
        /// A sampling fraction fell outside `[0, 1]`.
        InvalidFraction => InvalidFraction { .. } => "GRAPH_INVALID_FRACTION",
    }
}

/// Errors raised while growing a noisy graph from a real one.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NoiseError {
    /// The fake-to-real target ratio was outside `(0, 1]`.
    #[error("fake-to-real proportion must lie in (0, 1] (got {got})")]
    InvalidFtrp {
        /// The rejected ratio.
        got: f64,
    },
    /// A node was supplied without any real neighbour.
    #[error("node {node} at position {position} has no real neighbours; prune isolates first")]
    IsolatedNode {
        /// Rendering of the isolated node.
        node: Arc<str>,
        /// Position of the node within the processing order.
        position: usize,
    },
    /// A node listed itself as a neighbour.
    #[error("node {node} lists itself as a neighbour")]
    SelfLoop {
        /// Rendering of the offending node.
        node: Arc<str>,
    },
    /// The underlying store rejected an operation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`NoiseError`] variants.
    enum NoiseErrorCode for NoiseError {
        /// The fake-to-real target ratio was outside `(0, 1]`.
        InvalidFtrp => InvalidFtrp { .. } => "NOISE_INVALID_FTRP",
        /// A node was supplied without any real neighbour.
        IsolatedNode => IsolatedNode { .. } => "NOISE_ISOLATED_NODE",
        /// A node listed itself as a neighbour.
        SelfLoop => SelfLoop { .. } => "NOISE_SELF_LOOP",
        /// The underlying store rejected an operation.
        GraphFailure => Graph(..) => "NOISE_GRAPH_FAILURE",
    }
}

impl NoiseError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in the store.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Errors raised while quantifying uncertainty.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UncertaintyError {
    /// More fake edges were reported than edges observed.
    #[error("fake edge count {fake} exceeds total edge count {total}")]
    FakeExceedsTotal {
        /// Total number of observed edges.
        total: u64,
        /// Number of fake edges claimed.
        fake: u64,
    },
    /// The hypothesis count does not fit in 128 bits.
    #[error("hypothesis count for C({total}, {fake}) overflows 128 bits")]
    HypothesisOverflow {
        /// Total number of observed edges.
        total: u64,
        /// Number of fake edges.
        fake: u64,
    },
    /// The logarithm base was not a finite value above zero other than one.
    #[error("logarithm base must be finite, positive, and not 1 (got {got})")]
    InvalidBase {
        /// The rejected base.
        got: f64,
    },
    /// The requested node is not part of the graph.
    #[error("node {node} is not part of the graph")]
    NodeNotFound {
        /// Rendering of the missing node.
        node: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`UncertaintyError`] variants.
    enum UncertaintyErrorCode for UncertaintyError {
        /// More fake edges were reported than edges observed.
        FakeExceedsTotal => FakeExceedsTotal { .. } => "UNCERTAINTY_FAKE_EXCEEDS_TOTAL",
        /// The hypothesis count does not fit in 128 bits.
        HypothesisOverflow => HypothesisOverflow { .. } => "UNCERTAINTY_HYPOTHESIS_OVERFLOW",
        /// The logarithm base was invalid.
        InvalidBase => InvalidBase { .. } => "UNCERTAINTY_INVALID_BASE",
        /// The requested node is not part of the graph.
        NodeNotFound => NodeNotFound { .. } => "UNCERTAINTY_NODE_NOT_FOUND",
    }
}

/// Which centrality map lacked a node during profiling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreSide {
    /// Scores computed on the original graph.
    Original,
    /// Scores computed on the noisy graph.
    Noisy,
}

impl fmt::Display for ScoreSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Original => "original",
            Self::Noisy => "noisy",
        })
    }
}

/// Errors raised while comparing centrality distributions.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ProfileError {
    /// A node scored on one side has no score on the other.
    #[error("centrality `{centrality}` has no {side} score for node {node}")]
    MissingNode {
        /// Name of the centrality measure.
        centrality: Arc<str>,
        /// Side whose map lacked the node.
        side: ScoreSide,
        /// Rendering of the missing node.
        node: Arc<str>,
    },
    /// A centrality produced no scores at all.
    #[error("centrality `{centrality}` produced no {side} scores")]
    EmptyScores {
        /// Name of the centrality measure.
        centrality: Arc<str>,
        /// Side that produced no scores.
        side: ScoreSide,
    },
    /// A centrality produced a NaN or infinite score.
    #[error("centrality `{centrality}` produced a non-finite {side} score for node {node}")]
    NonFiniteScore {
        /// Name of the centrality measure.
        centrality: Arc<str>,
        /// Side that produced the score.
        side: ScoreSide,
        /// Rendering of the node.
        node: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`ProfileError`] variants.
    enum ProfileErrorCode for ProfileError {
        /// A node scored on one side has no score on the other.
        MissingNode => MissingNode { .. } => "PROFILE_MISSING_NODE",
        /// A centrality produced no scores at all.
        EmptyScores => EmptyScores { .. } => "PROFILE_EMPTY_SCORES",
        /// A centrality produced a NaN or infinite score.
        NonFiniteScore => NonFiniteScore { .. } => "PROFILE_NON_FINITE_SCORE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(NoiseError::InvalidFtrp { got: 0.0 }, "NOISE_INVALID_FTRP")]
    #[case(
        NoiseError::IsolatedNode { node: Arc::from("3"), position: 1 },
        "NOISE_ISOLATED_NODE"
    )]
    #[case(NoiseError::SelfLoop { node: Arc::from("1") }, "NOISE_SELF_LOOP")]
    #[case(
        NoiseError::Graph(GraphError::SelfLoop { node: Arc::from("1") }),
        "NOISE_GRAPH_FAILURE"
    )]
    fn noise_error_codes_are_stable(#[case] error: NoiseError, #[case] expected: &str) {
        assert_eq!(error.code().as_str(), expected);
    }

    #[test]
    fn noise_error_exposes_graph_code() {
        let error = NoiseError::from(GraphError::NodeNotFound {
            node: Arc::from("9"),
        });
        assert_eq!(error.graph_code(), Some(GraphErrorCode::NodeNotFound));
        assert_eq!(NoiseError::InvalidFtrp { got: 2.0 }.graph_code(), None);
    }

    #[test]
    fn profile_error_mentions_side() {
        let error = ProfileError::MissingNode {
            centrality: Arc::from("degree"),
            side: ScoreSide::Noisy,
            node: Arc::from("4"),
        };
        assert_eq!(
            error.to_string(),
            "centrality `degree` has no noisy score for node 4"
        );
        assert_eq!(error.code().to_string(), "PROFILE_MISSING_NODE");
    }
}
