//! Random graph models used as inputs for noisy-graph runs.
//!
//! Nodes are labelled `0..nodes` and every node is registered even when it
//! ends up isolated, so callers can see and prune isolates themselves.

use std::collections::BTreeSet;

use noisygraph_core::{GraphError, SimpleGraph};
use rand::Rng;
use thiserror::Error;

/// Errors raised by the graph models.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum GeneratorError {
    /// A probability argument fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// Argument name.
        name: &'static str,
        /// Rejected value.
        got: f64,
    },
    /// The ring-lattice degree does not fit the node count.
    #[error("watts-strogatz needs fewer neighbours than nodes (got {neighbours} for {nodes} nodes)")]
    NeighboursOutOfRange {
        /// Requested ring degree.
        neighbours: u32,
        /// Requested node count.
        nodes: u32,
    },
    /// Preferential attachment needs `1 <= attachments < nodes`.
    #[error("barabasi-albert needs 1 <= attachments < nodes (got {attachments} for {nodes} nodes)")]
    AttachmentsOutOfRange {
        /// Edges added per arriving node.
        attachments: u32,
        /// Requested node count.
        nodes: u32,
    },
    /// Assembling the graph failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn check_probability(name: &'static str, value: f64) -> Result<f64, GeneratorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GeneratorError::InvalidProbability { name, got: value })
    }
}

const fn slot(node: u32) -> usize {
    node as usize
}

fn canonical(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

fn assemble<I>(nodes: u32, edges: I) -> Result<SimpleGraph<u32>, GeneratorError>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut graph = SimpleGraph::new();
    for node in 0..nodes {
        graph.add_node(node);
    }
    for (u, v) in edges {
        graph.add_edge(u, v)?;
    }
    Ok(graph)
}

/// `G(n, p)`: every pair of nodes is joined independently with probability
/// `probability`.
///
/// # Errors
/// Returns [`GeneratorError::InvalidProbability`] when `probability` is
/// outside `[0, 1]`.
///
/// # Examples
/// ```
/// use noisygraph_cli::generators::erdos_renyi;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = erdos_renyi(6, 1.0, &mut rng)?;
/// assert_eq!(graph.edge_count(), 15);
/// # Ok::<(), noisygraph_cli::generators::GeneratorError>(())
/// ```
pub fn erdos_renyi<R>(
    nodes: u32,
    probability: f64,
    rng: &mut R,
) -> Result<SimpleGraph<u32>, GeneratorError>
where
    R: Rng + ?Sized,
{
    let probability = check_probability("probability", probability)?;
    let mut edges = Vec::new();
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            if rng.gen_bool(probability) {
                edges.push((i, j));
            }
        }
    }
    assemble(nodes, edges)
}

/// Small-world graph: a ring lattice where each node is joined to its
/// `neighbours / 2` nearest nodes on either side, after which every lattice
/// edge `(u, u + j)` is rewired to `(u, w)` with probability `rewire`.
///
/// A rewire is skipped when `u` is already adjacent to every other node, so
/// the edge count never changes.
///
/// # Errors
/// Returns [`GeneratorError::NeighboursOutOfRange`] unless
/// `neighbours < nodes` and [`GeneratorError::InvalidProbability`] when
/// `rewire` is outside `[0, 1]`.
pub fn watts_strogatz<R>(
    nodes: u32,
    neighbours: u32,
    rewire: f64,
    rng: &mut R,
) -> Result<SimpleGraph<u32>, GeneratorError>
where
    R: Rng + ?Sized,
{
    if neighbours >= nodes {
        return Err(GeneratorError::NeighboursOutOfRange { neighbours, nodes });
    }
    let rewire = check_probability("rewire", rewire)?;
    let reach = neighbours / 2;

    let mut edges = BTreeSet::new();
    let mut degrees = vec![0_u32; slot(nodes)];
    for offset in 1..=reach {
        for u in 0..nodes {
            let v = (u + offset) % nodes;
            if edges.insert(canonical(u, v)) {
                degrees[slot(u)] += 1;
                degrees[slot(v)] += 1;
            }
        }
    }

    for offset in 1..=reach {
        for u in 0..nodes {
            if !rng.gen_bool(rewire) || degrees[slot(u)] + 1 >= nodes {
                continue;
            }
            let v = (u + offset) % nodes;
            if !edges.contains(&canonical(u, v)) {
                continue;
            }
            let w = loop {
                let w = rng.gen_range(0..nodes);
                if w != u && !edges.contains(&canonical(u, w)) {
                    break w;
                }
            };
            edges.remove(&canonical(u, v));
            edges.insert(canonical(u, w));
            degrees[slot(v)] -= 1;
            degrees[slot(w)] += 1;
        }
    }
    assemble(nodes, edges)
}

/// Scale-free graph grown by preferential attachment.
///
/// Starts from a complete graph on `attachments + 1` nodes; each further node
/// links to `attachments` distinct earlier nodes picked with probability
/// proportional to their degree.
///
/// # Errors
/// Returns [`GeneratorError::AttachmentsOutOfRange`] unless
/// `1 <= attachments < nodes`.
pub fn barabasi_albert<R>(
    nodes: u32,
    attachments: u32,
    rng: &mut R,
) -> Result<SimpleGraph<u32>, GeneratorError>
where
    R: Rng + ?Sized,
{
    if attachments == 0 || attachments >= nodes {
        return Err(GeneratorError::AttachmentsOutOfRange { attachments, nodes });
    }
    let seed_nodes = attachments + 1;
    let mut edges = Vec::new();
    let mut degrees = vec![0_u32; slot(nodes)];
    for i in 0..seed_nodes {
        for j in (i + 1)..seed_nodes {
            edges.push((i, j));
            degrees[slot(i)] += 1;
            degrees[slot(j)] += 1;
        }
    }

    for arriving in seed_nodes..nodes {
        let mut chosen: Vec<u32> = Vec::new();
        while chosen.len() < slot(attachments) {
            let Some(target) = pick_by_degree(rng, &degrees[..slot(arriving)], &chosen) else {
                break;
            };
            chosen.push(target);
        }
        for &target in &chosen {
            edges.push((arriving, target));
            degrees[slot(arriving)] += 1;
            degrees[slot(target)] += 1;
        }
    }
    assemble(nodes, edges)
}

/// Roulette-wheel pick weighted by degree, skipping `exclude`.
fn pick_by_degree<R>(rng: &mut R, degrees: &[u32], exclude: &[u32]) -> Option<u32>
where
    R: Rng + ?Sized,
{
    let weight = |node: u32, degree: u32| {
        if exclude.contains(&node) {
            0
        } else {
            u64::from(degree.max(1))
        }
    };
    let labelled = (0_u32..).zip(degrees.iter().copied());
    let total: u64 = labelled.clone().map(|(node, degree)| weight(node, degree)).sum();
    if total == 0 {
        return None;
    }
    let mut threshold = rng.gen_range(0..total);
    for (node, degree) in labelled {
        let w = weight(node, degree);
        if threshold < w {
            return Some(node);
        }
        threshold -= w;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5EED)
    }

    fn degrees(graph: &SimpleGraph<u32>) -> Vec<usize> {
        graph
            .nodes()
            .map(|node| graph.degree(node).expect("node is registered"))
            .collect()
    }

    #[rstest]
    #[case::empty(0.0, 0)]
    #[case::complete(1.0, 28)]
    fn erdos_renyi_extremes(#[case] probability: f64, #[case] expected: usize) {
        let graph = erdos_renyi(8, probability, &mut rng()).expect("valid probability");
        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), expected);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn erdos_renyi_rejects_bad_probability(#[case] probability: f64) {
        let err = erdos_renyi(8, probability, &mut rng()).expect_err("probability is invalid");
        assert!(matches!(
            err,
            GeneratorError::InvalidProbability { name: "probability", .. }
        ));
    }

    #[test]
    fn unrewired_small_world_is_a_ring_lattice() {
        let graph = watts_strogatz(10, 4, 0.0, &mut rng()).expect("valid parameters");
        assert_eq!(graph.edge_count(), 20);
        assert!(degrees(&graph).iter().all(|&degree| degree == 4));
        assert!(graph.has_edge(&0, &9));
        assert!(graph.has_edge(&0, &8));
        assert!(!graph.has_edge(&0, &5));
    }

    #[rstest]
    #[case(0.3)]
    #[case(1.0)]
    fn rewiring_preserves_edge_count(#[case] rewire: f64) {
        let graph = watts_strogatz(30, 6, rewire, &mut rng()).expect("valid parameters");
        assert_eq!(graph.edge_count(), 90);
        assert_eq!(graph.node_count(), 30);
    }

    #[test]
    fn small_world_rejects_oversized_neighbourhood() {
        let err = watts_strogatz(5, 5, 0.1, &mut rng()).expect_err("k must be below n");
        assert_eq!(
            err,
            GeneratorError::NeighboursOutOfRange {
                neighbours: 5,
                nodes: 5,
            }
        );
    }

    #[rstest]
    #[case(20, 1, 19)]
    #[case(20, 3, 54)]
    #[case(5, 4, 10)]
    fn preferential_attachment_edge_count(
        #[case] nodes: u32,
        #[case] attachments: u32,
        #[case] expected: usize,
    ) {
        let graph = barabasi_albert(nodes, attachments, &mut rng()).expect("valid parameters");
        assert_eq!(graph.edge_count(), expected);
        assert!(graph.isolates().is_empty());
    }

    #[rstest]
    #[case(10, 0)]
    #[case(10, 10)]
    fn preferential_attachment_rejects_bad_attachments(#[case] nodes: u32, #[case] attachments: u32) {
        let err = barabasi_albert(nodes, attachments, &mut rng()).expect_err("invalid attachments");
        assert!(matches!(err, GeneratorError::AttachmentsOutOfRange { .. }));
    }

    #[test]
    fn same_seed_gives_same_graph() {
        let first = barabasi_albert(40, 2, &mut rng()).expect("valid parameters");
        let second = barabasi_albert(40, 2, &mut rng()).expect("valid parameters");
        assert_eq!(first.edges(), second.edges());
    }
}
