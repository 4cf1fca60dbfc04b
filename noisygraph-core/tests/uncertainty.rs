mod common;

use noisygraph_core::{
    EdgeStatus, EdgeStore, Knowledge, UncertaintyConfig, UncertaintyErrorCode, hypothesis_count,
    log_hypothesis_count, uncertainty,
};
use rstest::rstest;

use common::{hexagon_store, path_store};

#[test]
fn hexagon_graph_uncertainty_is_log_of_924() {
    let store = hexagon_store();
    let config = UncertaintyConfig::default();
    assert_eq!(store.hypothesis_count(Knowledge::Exact), Ok(924));
    let value = store.uncertainty(&config).expect("counts are consistent");
    assert!((value - 924_f64.log2()).abs() < 1e-12);
}

#[test]
fn hexagon_nodes_share_the_same_uncertainty() {
    let store = hexagon_store();
    let config = UncertaintyConfig::default();
    let profile = store
        .uncertainty_profile(&config)
        .expect("counts are consistent")
        .expect("every node has edges");
    assert!((profile.mean - 6_f64.log2()).abs() < 1e-12);
    assert!(profile.std_dev.abs() < 1e-12);
    assert_eq!(profile.min, profile.max);
    assert_eq!((profile.nodes, profile.excluded), (6, 0));
}

#[test]
fn real_only_graph_has_zero_uncertainty() {
    let store = path_store();
    let config = UncertaintyConfig::default();
    assert_eq!(store.uncertainty(&config), Ok(0.0));
    for (_, value) in store.node_uncertainties(&config).expect("nodes are known") {
        assert_eq!(value, 0.0);
    }
}

#[rstest]
#[case::exact(Knowledge::Exact, 10)]
#[case::upper_bound(Knowledge::UpperBound, 16)]
fn knowledge_selects_the_hypothesis_space(#[case] knowledge: Knowledge, #[case] expected: u128) {
    assert_eq!(hypothesis_count(5, 2, knowledge), Ok(expected));
    let log = log_hypothesis_count(5, 2, knowledge, 2.0).expect("valid counts");
    assert!((log - (expected as f64).log2()).abs() < 1e-12);
}

#[test]
fn base_changes_the_unit_only() {
    let bits = UncertaintyConfig::default();
    let nats = bits.with_base(std::f64::consts::E).expect("e is a valid base");
    let in_bits = uncertainty(12, 6, &bits).expect("valid counts");
    let in_nats = uncertainty(12, 6, &nats).expect("valid counts");
    assert!((in_bits * std::f64::consts::LN_2 - in_nats).abs() < 1e-9);
}

#[test]
fn large_graphs_fall_back_to_log_space() {
    let mut store = EdgeStore::new();
    for node in 0..300_u32 {
        let status = if node % 2 == 0 { EdgeStatus::Real } else { EdgeStatus::Fake };
        store
            .add_edge(node, node + 1, status)
            .expect("chain has no self-loops");
    }
    let error = store
        .hypothesis_count(Knowledge::Exact)
        .expect_err("C(300, 150) does not fit in 128 bits");
    assert_eq!(error.code(), UncertaintyErrorCode::HypothesisOverflow);

    let value = store
        .uncertainty(&UncertaintyConfig::default())
        .expect("log space handles large counts");
    assert!(value > 290.0 && value < 300.0, "log2 C(300, 150) = {value}");
}

#[test]
fn unknown_node_is_an_error() {
    let store = hexagon_store();
    let error = store
        .node_uncertainty(&99, &UncertaintyConfig::default())
        .expect_err("node 99 is absent");
    assert_eq!(error.code(), UncertaintyErrorCode::NodeNotFound);
}
