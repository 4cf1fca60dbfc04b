//! Node identifiers, canonical edges, and edge status.

use std::{fmt, hash::Hash, sync::Arc};

/// Requirements placed on node identifiers stored in a graph.
///
/// Nodes must be hashable for lookup and totally ordered so undirected edges
/// have a canonical `(min, max)` form. Domains without a natural order can
/// wrap their identifiers in an ordered surrogate (for example an insertion
/// index) before handing them to the graph.
///
/// The trait is implemented for every type satisfying the bounds.
pub trait NodeKey: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + fmt::Debug {}

/// Dense index assigned to a node when it is first registered in a store.
///
/// Identifiers follow insertion order and stay stable for the life of the
/// store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[rustfmt::skip]
    pub(crate) const fn new(index: usize) -> Self { Self(index) }

    /// Returns the underlying insertion index.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::EdgeStore;
    ///
    /// let mut store = EdgeStore::new();
    /// let id = store.add_node("a");
    /// assert_eq!(id.index(), 0);
    /// ```
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

/// Whether an edge belongs to the ground truth or was injected as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStatus {
    /// Ground-truth edge.
    Real,
    /// Synthetically injected edge.
    Fake,
}

impl EdgeStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Real => Self::Fake,
            Self::Fake => Self::Real,
        }
    }
}

impl fmt::Display for EdgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Real => "real",
            Self::Fake => "fake",
        })
    }
}

/// Undirected edge stored in canonical `(min, max)` order.
///
/// # Examples
/// ```
/// use noisygraph_core::Edge;
///
/// let edge = Edge::new(5, 2);
/// assert_eq!(edge.source(), &2);
/// assert_eq!(edge.target(), &5);
/// assert_eq!(edge, Edge::new(2, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<N> {
    source: N,
    target: N,
}

impl<N: Ord> Edge<N> {
    /// Builds the canonical form of the undirected edge between `a` and `b`.
    #[must_use]
    pub fn new(a: N, b: N) -> Self {
        if a <= b {
            Self {
                source: a,
                target: b,
            }
        } else {
            Self {
                source: b,
                target: a,
            }
        }
    }
}

impl<N> Edge<N> {
    /// Returns the smaller endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub const fn source(&self) -> &N { &self.source }

    /// Returns the larger endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub const fn target(&self) -> &N { &self.target }

    /// Consumes the edge and returns its endpoints in canonical order.
    #[must_use]
    pub fn into_pair(self) -> (N, N) {
        (self.source, self.target)
    }
}

impl<N: Ord> From<(N, N)> for Edge<N> {
    fn from((a, b): (N, N)) -> Self {
        Self::new(a, b)
    }
}

/// Renders a node for inclusion in error payloads.
pub(crate) fn describe<N: fmt::Debug>(node: &N) -> Arc<str> {
    Arc::from(format!("{node:?}"))
}
