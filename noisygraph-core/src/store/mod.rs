//! Dual-edge-set graph storage.
//!
//! [`EdgeStore`] keeps one adjacency relation for real edges and one for
//! fake edges. Nodes are interned into dense [`NodeId`]s on first sight so
//! adjacency lives in flat vectors, while callers keep working with their own
//! node identifiers.
//!
//! The store maintains three invariants after every mutation:
//!
//! - every registered node owns a (possibly empty) real set and fake set;
//! - each relation is symmetric (`v ∈ real[u] ⟺ u ∈ real[v]`);
//! - a pair is never present in both relations at once.

mod missing;

use std::collections::{BTreeSet, HashMap};

use crate::{
    error::GraphError,
    node::{Edge, EdgeStatus, NodeId, NodeKey, describe},
    simple_graph::SimpleGraph,
};

/// Outcome of [`EdgeStore::add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// The pair was not connected before.
    Added,
    /// The pair was connected with the opposite status and has been moved.
    Reclassified,
    /// The pair already carried the requested status.
    Unchanged,
}

/// Real and fake edge tallies for a graph or a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCounts {
    /// Number of real edges.
    pub real: usize,
    /// Number of fake edges.
    pub fake: usize,
}

impl EdgeCounts {
    /// Returns the number of observed edges regardless of status.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::EdgeCounts;
    ///
    /// let counts = EdgeCounts { real: 6, fake: 6 };
    /// assert_eq!(counts.total(), 12);
    /// ```
    #[must_use]
    pub const fn total(self) -> usize {
        self.real + self.fake
    }
}

/// Undirected graph whose edges are either real or fake.
///
/// # Examples
/// ```
/// use noisygraph_core::{Edge, EdgeInsert, EdgeStatus, EdgeStore};
///
/// let mut store = EdgeStore::new();
/// assert_eq!(store.add_edge(1, 2, EdgeStatus::Real)?, EdgeInsert::Added);
/// assert_eq!(store.add_edge(2, 1, EdgeStatus::Fake)?, EdgeInsert::Reclassified);
/// assert!(store.edges_where(EdgeStatus::Real).is_empty());
/// assert!(store.edges_where(EdgeStatus::Fake).contains(&Edge::new(1, 2)));
/// # Ok::<(), noisygraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgeStore<N> {
    nodes: Vec<N>,
    index: HashMap<N, NodeId>,
    real: Vec<BTreeSet<NodeId>>,
    fake: Vec<BTreeSet<NodeId>>,
}

impl<N> Default for EdgeStore<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            real: Vec::new(),
            fake: Vec::new(),
        }
    }
}

impl<N: NodeKey> EdgeStore<N> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `edges`, all recorded under `status`.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when an edge joins a node to itself.
    ///
    /// # Examples
    /// ```
    /// use noisygraph_core::{EdgeStatus, EdgeStore};
    ///
    /// let store = EdgeStore::from_edges([(0, 1), (1, 2)], EdgeStatus::Real)?;
    /// assert_eq!(store.node_count(), 3);
    /// assert_eq!(store.edge_counts().real, 2);
    /// # Ok::<(), noisygraph_core::GraphError>(())
    /// ```
    pub fn from_edges<I>(edges: I, status: EdgeStatus) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut store = Self::new();
        store.add_edges_from(edges, status)?;
        Ok(store)
    }

    /// Registers `node`, returning its identifier. Re-adding is a no-op.
    pub fn add_node(&mut self, node: N) -> NodeId {
        if let Some(&id) = self.index.get(&node) {
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.index.insert(node.clone(), id);
        self.nodes.push(node);
        self.real.push(BTreeSet::new());
        self.fake.push(BTreeSet::new());
        id
    }

    /// Records an undirected edge between `u` and `v` under `status`.
    ///
    /// Missing endpoints are registered first. An existing edge with the
    /// opposite status is reclassified; an existing edge with the same status
    /// is left untouched.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `u == v`.
    pub fn add_edge(&mut self, u: N, v: N, status: EdgeStatus) -> Result<EdgeInsert, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop {
                node: describe(&u),
            });
        }
        let left = self.add_node(u);
        let right = self.add_node(v);
        Ok(self.link(left, right, status))
    }

    /// Records every edge in `edges` under `status`.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] on the first self-loop; edges before it
    /// remain recorded.
    pub fn add_edges_from<I>(&mut self, edges: I, status: EdgeStatus) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v, status)?;
        }
        Ok(())
    }

    pub(crate) fn link(&mut self, left: NodeId, right: NodeId, status: EdgeStatus) -> EdgeInsert {
        let (same, other) = match status {
            EdgeStatus::Real => (&mut self.real, &mut self.fake),
            EdgeStatus::Fake => (&mut self.fake, &mut self.real),
        };
        let reclassified = other[left.index()].remove(&right);
        other[right.index()].remove(&left);
        let inserted = same[left.index()].insert(right);
        same[right.index()].insert(left);
        match (inserted, reclassified) {
            (true, true) => EdgeInsert::Reclassified,
            (true, false) => EdgeInsert::Added,
            (false, _) => EdgeInsert::Unchanged,
        }
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no node has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns whether `node` is registered.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Returns the identifier assigned to `node`, if registered.
    #[must_use]
    pub fn id_of(&self, node: &N) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    /// Returns the node registered under `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.index())
    }

    pub(crate) fn require(&self, node: &N) -> Result<NodeId, GraphError> {
        self.id_of(node).ok_or_else(|| GraphError::NodeNotFound {
            node: describe(node),
        })
    }

    fn relation(&self, status: EdgeStatus) -> &[BTreeSet<NodeId>] {
        match status {
            EdgeStatus::Real => &self.real,
            EdgeStatus::Fake => &self.fake,
        }
    }

    /// Returns the status of the edge between `u` and `v`, if any.
    #[must_use]
    pub fn status_of(&self, u: &N, v: &N) -> Option<EdgeStatus> {
        let left = self.id_of(u)?;
        let right = self.id_of(v)?;
        [EdgeStatus::Real, EdgeStatus::Fake]
            .into_iter()
            .find(|&status| self.relation(status)[left.index()].contains(&right))
    }

    /// Iterates over the neighbours of `node` joined by `status` edges.
    ///
    /// Returns `None` when `node` is not registered.
    pub fn neighbors(&self, node: &N, status: EdgeStatus) -> Option<impl Iterator<Item = &N> + '_> {
        let id = self.id_of(node)?;
        Some(
            self.relation(status)[id.index()]
                .iter()
                .map(|other| &self.nodes[other.index()]),
        )
    }

    /// Iterates over every neighbour of `node`, real ones first.
    pub fn neighbors_any(&self, node: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let real = self.neighbors(node, EdgeStatus::Real)?;
        let fake = self.neighbors(node, EdgeStatus::Fake)?;
        Some(real.chain(fake))
    }

    /// Returns the number of `status` edges incident to `node`.
    #[must_use]
    pub fn degree(&self, node: &N, status: EdgeStatus) -> Option<usize> {
        self.id_of(node).map(|id| self.degree_of(id, status))
    }

    /// Returns the number of edges incident to `node` regardless of status.
    #[must_use]
    pub fn total_degree(&self, node: &N) -> Option<usize> {
        self.edge_counts_for(node).map(EdgeCounts::total)
    }

    pub(crate) fn degree_of(&self, id: NodeId, status: EdgeStatus) -> usize {
        self.relation(status)[id.index()].len()
    }

    pub(crate) fn counts_of(&self, id: NodeId) -> EdgeCounts {
        EdgeCounts {
            real: self.degree_of(id, EdgeStatus::Real),
            fake: self.degree_of(id, EdgeStatus::Fake),
        }
    }

    pub(crate) fn is_adjacent(&self, left: NodeId, right: NodeId) -> bool {
        self.real[left.index()].contains(&right) || self.fake[left.index()].contains(&right)
    }

    /// Returns the real and fake degrees of `node`.
    #[must_use]
    pub fn edge_counts_for(&self, node: &N) -> Option<EdgeCounts> {
        self.id_of(node).map(|id| self.counts_of(id))
    }

    /// Returns real and fake edge totals for the whole graph.
    #[must_use]
    pub fn edge_counts(&self) -> EdgeCounts {
        let half_sum = |relation: &[BTreeSet<NodeId>]| {
            relation.iter().map(BTreeSet::len).sum::<usize>() / 2
        };
        EdgeCounts {
            real: half_sum(&self.real),
            fake: half_sum(&self.fake),
        }
    }

    fn canonical(&self, left: NodeId, right: NodeId) -> Edge<N> {
        Edge::new(
            self.nodes[left.index()].clone(),
            self.nodes[right.index()].clone(),
        )
    }

    /// Returns every edge carrying `status` in canonical form.
    #[must_use]
    pub fn edges_where(&self, status: EdgeStatus) -> BTreeSet<Edge<N>> {
        self.relation(status)
            .iter()
            .enumerate()
            .flat_map(|(index, neighbours)| {
                let left = NodeId::new(index);
                neighbours
                    .iter()
                    .filter(move |right| left < **right)
                    .map(move |&right| (left, right))
            })
            .map(|(left, right)| self.canonical(left, right))
            .collect()
    }

    /// Returns every edge in canonical form, real and fake alike.
    #[must_use]
    pub fn all_edges(&self) -> BTreeSet<Edge<N>> {
        let mut edges = self.edges_where(EdgeStatus::Real);
        edges.extend(self.edges_where(EdgeStatus::Fake));
        edges
    }

    /// Returns the canonical edges incident to `node`.
    #[must_use]
    pub fn adjacency(&self, node: &N) -> Option<BTreeSet<Edge<N>>> {
        let id = self.id_of(node)?;
        Some(
            self.real[id.index()]
                .iter()
                .chain(&self.fake[id.index()])
                .map(|&other| self.canonical(id, other))
                .collect(),
        )
    }

    /// Drops every fake edge while keeping nodes and real edges.
    pub fn clear_fake_edges(&mut self) {
        for neighbours in &mut self.fake {
            neighbours.clear();
        }
    }

    /// Materialises all edges as a plain graph, forgetting their status.
    ///
    /// Every registered node is carried over, including nodes without edges.
    #[must_use]
    pub fn to_simple_graph(&self) -> SimpleGraph<N> {
        let mut graph = SimpleGraph::new();
        for node in &self.nodes {
            graph.add_node(node.clone());
        }
        for edge in self.all_edges() {
            let (left, right) = edge.into_pair();
            graph.insert_edge(left, right);
        }
        graph
    }
}

#[cfg(test)]
mod tests;
