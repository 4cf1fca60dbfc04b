//! Unit tests for distortion profiling.

use std::collections::BTreeMap;

use rstest::rstest;

use super::*;
use crate::{
    BetweennessCentrality, ClosenessCentrality, DegreeCentrality, EigenvectorCentrality,
    FnCentrality, error::ProfileErrorCode,
};

fn ring(n: u32) -> SimpleGraph<u32> {
    SimpleGraph::from_edges((0..n).map(|node| (node, (node + 1) % n))).expect("ring is valid")
}

#[rstest]
#[case::degree(&DegreeCentrality as &dyn Centrality<u32>)]
#[case::closeness(&ClosenessCentrality as &dyn Centrality<u32>)]
#[case::betweenness(&BetweennessCentrality as &dyn Centrality<u32>)]
fn comparing_a_graph_with_itself_shows_no_distortion(#[case] centrality: &dyn Centrality<u32>) {
    let graph = SimpleGraph::from_edges([(0, 1), (1, 2), (1, 3), (3, 4), (4, 0)])
        .expect("edges are valid");
    let profiler = DistortionProfiler::new(&graph, graph.clone());
    let profile = profiler.profile(centrality).expect("scores cover every node");
    assert_eq!(profile.distance, 0.0);
    assert_eq!(profile.correlation, Some(1.0));
    assert_eq!(profile.mean_change, Some(0.0));
}

#[test]
fn self_comparison_holds_for_eigenvector_too() {
    let graph = ring(7);
    let profile = DistortionProfiler::new(&graph, graph.clone())
        .profile(&EigenvectorCentrality::default())
        .expect("scores cover every node");
    assert_eq!(profile.distance, 0.0);
    assert_eq!(profile.correlation, Some(1.0));
    assert_eq!(profile.mean_change, Some(0.0));
}

#[test]
fn adding_chords_raises_mean_degree() {
    let original = ring(6);
    let mut noisy = original.clone();
    noisy.add_edge(0, 3).expect("edge is valid");
    noisy.add_edge(1, 4).expect("edge is valid");
    noisy.add_edge(2, 5).expect("edge is valid");

    let profile = DistortionProfiler::new(&original, noisy)
        .profile(&DegreeCentrality)
        .expect("scores cover every node");
    // Every degree grows from 2/5 to 3/5.
    assert!((profile.distance - 0.2).abs() < 1e-12);
    assert!(profile.mean_change.is_some_and(|change| (change - 0.5).abs() < 1e-12));
    // Both rankings are constant and identical.
    assert_eq!(profile.correlation, Some(1.0));
}

#[test]
fn constant_original_against_varied_noisy_has_undefined_correlation() {
    let original = BTreeMap::from([(0, 1.0), (1, 1.0), (2, 1.0)]);
    let noisy = BTreeMap::from([(0, 1.0), (1, 2.0), (2, 3.0)]);
    let profile = compare_scores("custom", &original, &noisy).expect("maps agree on nodes");
    assert_eq!(profile.correlation, None);
    assert_eq!(&*profile.centrality, "custom");
}

#[test]
fn zero_original_mean_makes_mean_change_undefined() {
    let original = BTreeMap::from([(0, 0.0), (1, 0.0)]);
    let noisy = BTreeMap::from([(0, 0.5), (1, 0.0)]);
    let profile = compare_scores("zero", &original, &noisy).expect("maps agree on nodes");
    assert_eq!(profile.mean_change, None);
    assert!(profile.distance > 0.0);
}

#[rstest]
#[case::missing_in_noisy(&[(0, 1.0), (1, 1.0)], &[(0, 1.0)], ScoreSide::Noisy)]
#[case::missing_in_original(&[(0, 1.0)], &[(0, 1.0), (1, 1.0)], ScoreSide::Original)]
fn uncovered_nodes_are_errors(
    #[case] original: &[(u32, f64)],
    #[case] noisy: &[(u32, f64)],
    #[case] expected_side: ScoreSide,
) {
    let original: Scores<u32> = original.iter().copied().collect();
    let noisy: Scores<u32> = noisy.iter().copied().collect();
    let err = compare_scores("degree", &original, &noisy).expect_err("coverage differs");
    assert_eq!(
        err,
        ProfileError::MissingNode {
            centrality: Arc::from("degree"),
            side: expected_side,
            node: Arc::from("1"),
        }
    );
}

#[test]
fn empty_and_non_finite_scores_are_errors() {
    let empty = Scores::<u32>::new();
    let some = BTreeMap::from([(0, 1.0)]);
    let err = compare_scores("x", &empty, &some).expect_err("empty scores");
    assert_eq!(err.code(), ProfileErrorCode::EmptyScores);

    let broken = BTreeMap::from([(0, f64::NAN)]);
    let err = compare_scores("x", &some, &broken).expect_err("NaN score");
    assert_eq!(err.code(), ProfileErrorCode::NonFiniteScore);
}

#[test]
fn profile_surfaces_centralities_that_skip_nodes() {
    let graph = ring(4);
    let partial = FnCentrality::new("partial", |graph: &SimpleGraph<u32>| {
        graph.nodes().filter(|node| **node != 2).map(|&node| (node, 1.0)).collect()
    });
    let mut noisy = graph.clone();
    noisy.add_edge(0, 2).expect("edge is valid");
    let lopsided = FnCentrality::new("lopsided", |graph: &SimpleGraph<u32>| {
        if graph.edge_count() > 4 {
            graph.nodes().map(|&node| (node, 1.0)).collect()
        } else {
            graph.nodes().skip(1).map(|&node| (node, 1.0)).collect()
        }
    });

    let profiler = DistortionProfiler::new(&graph, noisy);
    assert!(profiler.profile(&partial).is_ok());
    let err = profiler
        .profile(&lopsided)
        .expect_err("original side lacks node 0");
    assert!(matches!(
        err,
        ProfileError::MissingNode {
            side: ScoreSide::Original,
            ..
        }
    ));
}

#[test]
fn profile_all_keeps_centrality_order() {
    let original = ring(5);
    let mut noisy = original.clone();
    noisy.add_edge(0, 2).expect("edge is valid");
    let profiler = DistortionProfiler::new(&original, noisy);
    let profiles = profiler
        .profile_all(&[&DegreeCentrality, &ClosenessCentrality, &BetweennessCentrality])
        .expect("scores cover every node");
    let names: Vec<_> = profiles.iter().map(|profile| &*profile.centrality).collect();
    assert_eq!(names, ["degree", "closeness", "betweenness"]);
    assert!(profiles.iter().all(|profile| profile.distance >= 0.0));
}
