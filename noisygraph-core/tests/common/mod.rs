#![allow(dead_code, reason = "each integration test binary uses a subset of the helpers")]

use noisygraph_core::{EdgeStatus, EdgeStore, SimpleGraph};
use noisygraph_test_support::fixtures::{
    HEXAGON_FAKE_EDGES, HEXAGON_REAL_EDGES, PATH_REAL_EDGES, barbell_edges,
};

/// Hexagon with real cycle edges and fake short diagonals.
#[must_use]
pub fn hexagon_store() -> EdgeStore<u32> {
    let mut store = EdgeStore::from_edges(HEXAGON_REAL_EDGES, EdgeStatus::Real)
        .expect("hexagon edges are valid");
    store
        .add_edges_from(HEXAGON_FAKE_EDGES, EdgeStatus::Fake)
        .expect("hexagon diagonals are valid");
    store
}

#[must_use]
pub fn path_store() -> EdgeStore<u32> {
    EdgeStore::from_edges(PATH_REAL_EDGES, EdgeStatus::Real).expect("path edges are valid")
}

#[must_use]
pub fn barbell_graph() -> SimpleGraph<u32> {
    SimpleGraph::from_edges(barbell_edges()).expect("barbell edges are valid")
}

/// Ring of `n` nodes where each node also links to the node `n / 3` ahead.
#[must_use]
pub fn chorded_ring(n: u32) -> SimpleGraph<u32> {
    let stride = (n / 3).max(2);
    let edges = (0..n).flat_map(|node| [(node, (node + 1) % n), (node, (node + stride) % n)]);
    SimpleGraph::from_edges(edges).expect("chorded ring has no self-loops")
}
