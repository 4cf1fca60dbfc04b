//! Unit tests for the dual-edge-set store.

use std::collections::BTreeSet;

use noisygraph_test_support::fixtures::{
    HEXAGON_FAKE_EDGES, HEXAGON_REAL_EDGES, PATH_MISSING_EDGES, PATH_REAL_EDGES,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use crate::{
    Edge, EdgeCounts, EdgeInsert, EdgeStatus, EdgeStore, GraphError, test_utils::suite_proptest_config,
};

#[fixture]
fn hexagon() -> EdgeStore<u32> {
    let mut store = EdgeStore::from_edges(HEXAGON_REAL_EDGES.iter().copied(), EdgeStatus::Real)
        .expect("hexagon edges are valid");
    store
        .add_edges_from(HEXAGON_FAKE_EDGES.iter().copied(), EdgeStatus::Fake)
        .expect("hexagon diagonals are valid");
    store
}

#[fixture]
fn path_like() -> EdgeStore<u32> {
    EdgeStore::from_edges(PATH_REAL_EDGES.iter().copied(), EdgeStatus::Real)
        .expect("path edges are valid")
}

fn edge_set(edges: &[(u32, u32)]) -> BTreeSet<Edge<u32>> {
    edges.iter().map(|&(a, b)| Edge::new(a, b)).collect()
}

fn assert_store_invariants(store: &EdgeStore<u32>) {
    let real = store.edges_where(EdgeStatus::Real);
    let fake = store.edges_where(EdgeStatus::Fake);
    assert!(real.is_disjoint(&fake), "real and fake sets overlap");
    let union: BTreeSet<_> = real.union(&fake).cloned().collect();
    assert_eq!(store.all_edges(), union);
    assert_eq!(store.edge_counts().real, real.len());
    assert_eq!(store.edge_counts().fake, fake.len());

    for node in store.nodes() {
        for status in [EdgeStatus::Real, EdgeStatus::Fake] {
            let neighbours = store.neighbors(node, status).expect("node is registered");
            for other in neighbours {
                let back: Vec<_> = store
                    .neighbors(other, status)
                    .expect("neighbour is registered")
                    .collect();
                assert!(back.contains(&node), "{status} edge {node}-{other} is one-way");
                assert_eq!(store.status_of(node, other), Some(status));
            }
        }
    }
}

#[test]
fn empty_store_has_no_nodes() {
    let store = EdgeStore::<u32>::new();
    assert!(store.is_empty());
    assert_eq!(store.edge_counts(), EdgeCounts::default());
    assert!(store.all_edges().is_empty());
}

#[test]
fn add_node_is_idempotent() {
    let mut store = EdgeStore::new();
    let first = store.add_node("a");
    let second = store.add_node("a");
    assert_eq!(first, second);
    assert_eq!(store.node_count(), 1);
    assert_eq!(store.degree(&"a", EdgeStatus::Real), Some(0));
    assert_eq!(store.degree(&"a", EdgeStatus::Fake), Some(0));
}

#[rstest]
#[case::real(EdgeStatus::Real)]
#[case::fake(EdgeStatus::Fake)]
fn add_edge_registers_missing_endpoints(#[case] status: EdgeStatus) {
    let mut store = EdgeStore::new();
    let outcome = store.add_edge(3, 1, status).expect("edge is valid");
    assert_eq!(outcome, EdgeInsert::Added);
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edges_where(status), edge_set(&[(1, 3)]));
    assert!(store.edges_where(status.opposite()).is_empty());
    assert_eq!(store.all_edges(), edge_set(&[(1, 3)]));
}

#[test]
fn add_edge_rejects_self_loops() {
    let mut store = EdgeStore::new();
    let err = store
        .add_edge(5, 5, EdgeStatus::Real)
        .expect_err("self-loop must fail");
    assert!(matches!(err, GraphError::SelfLoop { .. }));
    assert!(store.is_empty());
}

#[rstest]
fn readding_an_edge_is_unchanged(mut hexagon: EdgeStore<u32>) {
    let before = hexagon.edge_counts();
    let outcome = hexagon.add_edge(1, 0, EdgeStatus::Real).expect("edge is valid");
    assert_eq!(outcome, EdgeInsert::Unchanged);
    assert_eq!(hexagon.edge_counts(), before);
}

#[rstest]
fn reclassification_moves_edge_exactly_once(mut hexagon: EdgeStore<u32>) {
    let before = hexagon.edge_counts();
    let outcome = hexagon.add_edge(0, 1, EdgeStatus::Fake).expect("edge is valid");

    assert_eq!(outcome, EdgeInsert::Reclassified);
    assert!(!hexagon.edges_where(EdgeStatus::Real).contains(&Edge::new(0, 1)));
    let fake = hexagon.edges_where(EdgeStatus::Fake);
    assert_eq!(fake.iter().filter(|edge| **edge == Edge::new(0, 1)).count(), 1);

    let after = hexagon.edge_counts();
    assert_eq!(after.total(), before.total());
    assert_eq!(after.real, before.real - 1);
    assert_eq!(after.fake, before.fake + 1);
    assert_store_invariants(&hexagon);
}

#[rstest]
fn hexagon_counts_per_node(hexagon: EdgeStore<u32>) {
    assert_eq!(hexagon.edge_counts(), EdgeCounts { real: 6, fake: 6 });
    for node in 0..6 {
        assert_eq!(
            hexagon.edge_counts_for(&node),
            Some(EdgeCounts { real: 2, fake: 2 })
        );
        assert_eq!(hexagon.total_degree(&node), Some(4));
    }
    assert_eq!(hexagon.edge_counts_for(&10), None);
    assert_store_invariants(&hexagon);
}

#[rstest]
fn adjacency_splits_by_status(hexagon: EdgeStore<u32>) {
    let adjacency = hexagon.adjacency(&0).expect("node 0 exists");
    assert_eq!(adjacency, edge_set(&[(0, 1), (0, 5), (0, 2), (0, 4)]));
    let real: Vec<_> = hexagon
        .neighbors(&0, EdgeStatus::Real)
        .expect("node 0 exists")
        .copied()
        .collect();
    assert_eq!(real, [1, 5]);
    let all: BTreeSet<_> = hexagon
        .neighbors_any(&0)
        .expect("node 0 exists")
        .copied()
        .collect();
    assert_eq!(all, BTreeSet::from([1, 2, 4, 5]));
}

#[rstest]
fn clear_fake_edges_keeps_real_graph(mut hexagon: EdgeStore<u32>) {
    hexagon.clear_fake_edges();
    assert_eq!(hexagon.node_count(), 6);
    assert_eq!(hexagon.edges_where(EdgeStatus::Real), edge_set(&HEXAGON_REAL_EDGES));
    assert!(hexagon.edges_where(EdgeStatus::Fake).is_empty());
    assert_store_invariants(&hexagon);
}

#[rstest]
fn to_simple_graph_forgets_status(hexagon: EdgeStore<u32>) {
    let graph = hexagon.to_simple_graph();
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 12);
    assert_eq!(graph.edges(), hexagon.all_edges());
}

#[rstest]
#[case(0, &[(0, 2), (0, 3), (0, 4)])]
#[case(1, &[(1, 4)])]
#[case(2, &[(0, 2), (2, 3), (2, 4)])]
#[case(3, &[(0, 3), (2, 3)])]
#[case(4, &[(0, 4), (1, 4), (2, 4)])]
fn missing_edges_for_each_node(
    path_like: EdgeStore<u32>,
    #[case] node: u32,
    #[case] expected: &[(u32, u32)],
) {
    let missing = path_like.missing_edges_for(&node).expect("node exists");
    assert_eq!(missing, edge_set(expected));
}

#[rstest]
fn missing_neighbors_follow_insertion_order(path_like: EdgeStore<u32>) {
    let missing = path_like.missing_neighbors(&0).expect("node 0 exists");
    assert_eq!(missing, [&2, &3, &4]);
    assert!(path_like.missing_neighbors(&99).is_none());
}

#[rstest]
fn missing_edges_for_graph(path_like: EdgeStore<u32>) {
    let expected = edge_set(&PATH_MISSING_EDGES);
    assert_eq!(path_like.missing_edges(), expected);
    assert_eq!(path_like.par_missing_edges(), expected);
}

#[rstest]
fn hexagon_is_missing_only_long_diagonals(hexagon: EdgeStore<u32>) {
    assert_eq!(hexagon.missing_edges(), edge_set(&[(0, 3), (1, 4), (2, 5)]));
}

#[rstest]
fn sampling_half_the_missing_edges(path_like: EdgeStore<u32>) {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let sample = path_like
        .sample_missing_edges(0.5, &mut rng)
        .expect("fraction is valid");
    let unique: BTreeSet<_> = sample.iter().cloned().collect();
    assert_eq!(sample.len(), 3);
    assert_eq!(unique.len(), 3);
    assert!(unique.is_subset(&edge_set(&PATH_MISSING_EDGES)));
}

#[rstest]
fn adding_random_missing_edges_marks_them_fake(mut path_like: EdgeStore<u32>) {
    let missing = edge_set(&PATH_MISSING_EDGES);
    assert!(path_like.edges_where(EdgeStatus::Fake).is_empty());

    let mut rng = SmallRng::seed_from_u64(11);
    let added = path_like
        .add_random_missing_edges(0.5, &mut rng)
        .expect("fraction is valid");

    let fake = path_like.edges_where(EdgeStatus::Fake);
    assert_eq!(added, 3);
    assert_eq!(fake.intersection(&missing).count(), 3);
    assert_eq!(path_like.edges_where(EdgeStatus::Real), edge_set(&PATH_REAL_EDGES));
}

#[rstest]
#[case(-0.1)]
#[case(1.5)]
#[case(f64::NAN)]
fn sampling_rejects_invalid_fractions(path_like: EdgeStore<u32>, #[case] fraction: f64) {
    let mut rng = SmallRng::seed_from_u64(1);
    let err = path_like
        .sample_missing_edges(fraction, &mut rng)
        .expect_err("fraction must be rejected");
    assert!(matches!(err, GraphError::InvalidFraction { .. }));
}

#[rstest]
fn ensuring_fraction_tops_up_fake_degree(mut path_like: EdgeStore<u32>) {
    let mut rng = SmallRng::seed_from_u64(5);
    // Node 1 has three real edges and one missing neighbour (4).
    let edges = path_like
        .fake_edges_ensuring_fraction(&1, 1.0, &mut rng)
        .expect("node exists");
    assert_eq!(edges, [Edge::new(1, 4)]);

    let added = path_like
        .add_missing_edges_ensuring_fraction(&0, 1.0, &mut rng)
        .expect("node exists");
    assert_eq!(added, 1);
    assert_eq!(path_like.degree(&0, EdgeStatus::Fake), Some(1));

    let again = path_like
        .fake_edges_ensuring_fraction(&0, 1.0, &mut rng)
        .expect("node exists");
    assert!(again.is_empty());
}

#[rstest]
fn ensuring_fraction_rejects_unknown_nodes(path_like: EdgeStore<u32>) {
    let mut rng = SmallRng::seed_from_u64(5);
    let err = path_like
        .fake_edges_ensuring_fraction(&42, 0.5, &mut rng)
        .expect_err("unknown node must fail");
    assert!(matches!(err, GraphError::NodeNotFound { .. }));
}

#[rstest]
fn ensuring_fraction_per_node_reaches_target(mut path_like: EdgeStore<u32>) {
    let mut rng = SmallRng::seed_from_u64(9);
    let added = path_like
        .add_missing_edges_per_node_ensuring_fraction(1.0, &mut rng)
        .expect("fraction is valid");
    assert_eq!(added, path_like.edge_counts().fake);
    for node in 0..5 {
        let counts = path_like.edge_counts_for(&node).expect("node exists");
        let missing = path_like.missing_edges_for(&node).expect("node exists");
        assert!(counts.fake >= counts.real || missing.is_empty());
    }
    assert_store_invariants(&path_like);
}

fn operations() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
    prop::collection::vec((0_u8..12, 0_u8..12, any::<bool>()), 0..64)
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn invariants_hold_under_arbitrary_insertions(ops in operations()) {
        let mut store = EdgeStore::new();
        for (u, v, real) in ops {
            let status = if real { EdgeStatus::Real } else { EdgeStatus::Fake };
            let outcome = store.add_edge(u32::from(u), u32::from(v), status);
            prop_assert_eq!(outcome.is_err(), u == v);
        }
        assert_store_invariants(&store);

        let observed = store.all_edges().len();
        let n = store.node_count();
        prop_assert_eq!(observed + store.missing_edges().len(), n * n.saturating_sub(1) / 2);
    }
}
