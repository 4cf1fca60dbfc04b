//! Plain undirected simple graph.
//!
//! [`SimpleGraph`] is the status-free view consumed by centrality measures
//! and the adjacency enumeration consumed by
//! [`NoiseConstructor`](crate::NoiseConstructor). Nodes keep insertion order
//! and are addressed internally by dense indices so centrality algorithms can
//! use flat buffers.

use std::collections::{BTreeSet, HashMap};

use crate::{
    error::GraphError,
    node::{Edge, NodeKey, describe},
};

/// Undirected graph without edge status, self-loops, or parallel edges.
///
/// # Examples
/// ```
/// use noisygraph_core::SimpleGraph;
///
/// let graph = SimpleGraph::from_edges([(0, 1), (1, 2)])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(&1), Some(2));
/// # Ok::<(), noisygraph_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SimpleGraph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<BTreeSet<usize>>,
}

impl<N> Default for SimpleGraph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }
}

impl<N: NodeKey> SimpleGraph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when an edge joins a node to itself.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Registers `node` and returns its dense index. Re-adding is a no-op.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&index) = self.index.get(&node) {
            return index;
        }
        let index = self.nodes.len();
        self.index.insert(node.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(BTreeSet::new());
        index
    }

    /// Adds an undirected edge, registering missing endpoints.
    ///
    /// Returns `true` when the edge was not present before.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `u == v`.
    pub fn add_edge(&mut self, u: N, v: N) -> Result<bool, GraphError> {
        if u == v {
            return Err(GraphError::SelfLoop {
                node: describe(&u),
            });
        }
        Ok(self.insert_edge(u, v))
    }

    pub(crate) fn insert_edge(&mut self, u: N, v: N) -> bool {
        let left = self.add_node(u);
        let right = self.add_node(v);
        let inserted = self.adjacency[left].insert(right);
        self.adjacency[right].insert(left);
        inserted
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Returns whether `node` is part of the graph.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Iterates over the neighbours of `node`.
    pub fn neighbors(&self, node: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let index = *self.index.get(node)?;
        Some(self.adjacency[index].iter().map(|&other| &self.nodes[other]))
    }

    /// Returns the number of neighbours of `node`.
    #[must_use]
    pub fn degree(&self, node: &N) -> Option<usize> {
        self.index.get(node).map(|&index| self.adjacency[index].len())
    }

    /// Returns whether `u` and `v` are adjacent.
    #[must_use]
    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(&left), Some(&right)) => self.adjacency[left].contains(&right),
            _ => false,
        }
    }

    /// Returns every edge in canonical form.
    #[must_use]
    pub fn edges(&self) -> BTreeSet<Edge<N>> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(left, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |&&right| left < right)
                    .map(move |&right| (left, right))
            })
            .map(|(left, right)| Edge::new(self.nodes[left].clone(), self.nodes[right].clone()))
            .collect()
    }

    /// Enumerates `(node, neighbours)` pairs in insertion order.
    ///
    /// This is the input shape expected by
    /// [`NoiseConstructor::construct`](crate::NoiseConstructor::construct).
    #[must_use]
    pub fn adjacency(&self) -> Vec<(N, Vec<N>)> {
        self.nodes
            .iter()
            .zip(&self.adjacency)
            .map(|(node, neighbours)| {
                (
                    node.clone(),
                    neighbours.iter().map(|&other| self.nodes[other].clone()).collect(),
                )
            })
            .collect()
    }

    /// Returns the nodes without any neighbour.
    #[must_use]
    pub fn isolates(&self) -> Vec<&N> {
        self.nodes
            .iter()
            .zip(&self.adjacency)
            .filter(|(_, neighbours)| neighbours.is_empty())
            .map(|(node, _)| node)
            .collect()
    }

    /// Returns a copy of the graph with isolated nodes removed.
    #[must_use]
    pub fn without_isolates(&self) -> Self {
        let mut graph = Self::new();
        for (node, neighbours) in self.nodes.iter().zip(&self.adjacency) {
            if !neighbours.is_empty() {
                graph.add_node(node.clone());
            }
        }
        for edge in self.edges() {
            let (left, right) = edge.into_pair();
            graph.insert_edge(left, right);
        }
        graph
    }

    pub(crate) fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub(crate) fn node_at(&self, index: usize) -> &N {
        &self.nodes[index]
    }

    pub(crate) fn neighbour_indices(&self, index: usize) -> &BTreeSet<usize> {
        &self.adjacency[index]
    }
}
