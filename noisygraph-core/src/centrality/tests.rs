//! Unit tests for the bundled centrality measures.

use rstest::{fixture, rstest};

use super::*;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

fn assert_scores(scores: &Scores<u32>, expected: &[(u32, f64)]) {
    assert_eq!(scores.len(), expected.len());
    for &(node, value) in expected {
        let actual = scores[&node];
        assert!(close(actual, value), "node {node}: expected {value}, got {actual}");
    }
}

#[fixture]
fn path() -> SimpleGraph<u32> {
    SimpleGraph::from_edges([(0, 1), (1, 2), (2, 3)]).expect("edges are valid")
}

#[fixture]
fn star() -> SimpleGraph<u32> {
    SimpleGraph::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]).expect("edges are valid")
}

#[rstest]
fn degree_on_path(path: SimpleGraph<u32>) {
    let third = 1.0 / 3.0;
    assert_scores(
        &DegreeCentrality.scores(&path),
        &[(0, third), (1, 2.0 * third), (2, 2.0 * third), (3, third)],
    );
}

#[test]
fn degree_of_single_node_is_one() {
    let mut graph = SimpleGraph::new();
    graph.add_node(5_u32);
    assert_scores(&DegreeCentrality.scores(&graph), &[(5, 1.0)]);
}

#[rstest]
fn closeness_on_path(path: SimpleGraph<u32>) {
    // Endpoints: 3 / (1 + 2 + 3); inner nodes: 3 / (1 + 1 + 2).
    assert_scores(
        &ClosenessCentrality.scores(&path),
        &[(0, 0.5), (1, 0.75), (2, 0.75), (3, 0.5)],
    );
}

#[test]
fn closeness_scales_disconnected_components() {
    let mut graph = SimpleGraph::from_edges([(0_u32, 1)]).expect("edge is valid");
    graph.add_node(2);
    // Node 0 reaches one of two others at distance 1: (1 / 1) · (1 / 2).
    assert_scores(
        &ClosenessCentrality.scores(&graph),
        &[(0, 0.5), (1, 0.5), (2, 0.0)],
    );
}

#[rstest]
fn betweenness_on_path(path: SimpleGraph<u32>) {
    // Inner nodes each sit on two of the three pairs they are not part of.
    assert_scores(
        &BetweennessCentrality.scores(&path),
        &[(0, 0.0), (1, 2.0 / 3.0), (2, 2.0 / 3.0), (3, 0.0)],
    );
}

#[rstest]
fn betweenness_of_star_centre_is_one(star: SimpleGraph<u32>) {
    assert_scores(
        &BetweennessCentrality.scores(&star),
        &[(0, 1.0), (1, 0.0), (2, 0.0), (3, 0.0), (4, 0.0)],
    );
}

#[test]
fn betweenness_splits_over_equal_paths() {
    // A 4-cycle: every node lies on one of the two shortest paths between
    // its neighbours.
    let cycle = SimpleGraph::from_edges([(0_u32, 1), (1, 2), (2, 3), (3, 0)]).expect("edges are valid");
    let expected = 0.5 / 3.0;
    assert_scores(
        &BetweennessCentrality.scores(&cycle),
        &[(0, expected), (1, expected), (2, expected), (3, expected)],
    );
}

#[rstest]
fn eigenvector_on_star(star: SimpleGraph<u32>) {
    // Principal eigenvector of the star K1,4: the centre scores twice each
    // leaf, so leaves get 1/√8 and the centre 1/√2.
    let leaf = 8.0_f64.sqrt().recip();
    let centre = 2.0_f64.sqrt().recip();
    let scores = EigenvectorCentrality::default()
        .with_tolerance(1.0e-12)
        .scores(&star);
    assert_scores(
        &scores,
        &[(0, centre), (1, leaf), (2, leaf), (3, leaf), (4, leaf)],
    );
    let norm: f64 = scores.values().map(|value| value * value).sum();
    assert!(close(norm, 1.0));
}

#[test]
fn eigenvector_of_empty_graph_is_empty() {
    let graph = SimpleGraph::<u32>::new();
    assert!(EigenvectorCentrality::default().scores(&graph).is_empty());
}

#[rstest]
fn eigenvector_returns_last_iterate_when_budget_is_exhausted(star: SimpleGraph<u32>) {
    let scores = EigenvectorCentrality::default()
        .with_max_iterations(1)
        .with_tolerance(0.0)
        .scores(&star);
    assert_eq!(scores.len(), 5);
    assert!(scores[&0] > scores[&1]);
}

#[rstest]
fn fn_centrality_wraps_closures(path: SimpleGraph<u32>) {
    let ones = FnCentrality::new("ones", |graph: &SimpleGraph<u32>| {
        graph.nodes().map(|&node| (node, 1.0)).collect()
    });
    assert_eq!(ones.name(), "ones");
    assert_scores(&ones.scores(&path), &[(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0)]);
    assert!(format!("{ones:?}").contains("ones"));
}

#[rstest]
#[case::degree(&DegreeCentrality as &dyn Centrality<u32>, "degree")]
#[case::closeness(&ClosenessCentrality as &dyn Centrality<u32>, "closeness")]
#[case::betweenness(&BetweennessCentrality as &dyn Centrality<u32>, "betweenness")]
fn centralities_are_object_safe(#[case] centrality: &dyn Centrality<u32>, #[case] name: &str) {
    assert_eq!(centrality.name(), name);
}
