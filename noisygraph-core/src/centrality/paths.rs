//! Shortest-path based centralities over unweighted graphs.

use std::collections::VecDeque;

use crate::{node::NodeKey, simple_graph::SimpleGraph};

use super::{Centrality, Scores, as_f64};

/// Breadth-first hop distances from `source`; `None` marks unreachable nodes.
fn hop_distances<N: NodeKey>(graph: &SimpleGraph<N>, source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count()];
    let mut queue = VecDeque::from([source]);
    distances[source] = Some(0);
    while let Some(current) = queue.pop_front() {
        let next = distances[current].map_or(0, |hops| hops + 1);
        for &neighbour in graph.neighbour_indices(current) {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    distances
}

/// Closeness with the Wasserman–Faust correction for disconnected graphs.
///
/// For a node reaching `r` others at total distance `d`, the score is
/// `(r / d) · (r / (n - 1))`. Nodes that reach nobody score `0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosenessCentrality;

impl<N: NodeKey> Centrality<N> for ClosenessCentrality {
    fn name(&self) -> &str {
        "closeness"
    }

    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N> {
        let n = graph.node_count();
        (0..n)
            .map(|index| {
                let distances = hop_distances(graph, index);
                let (reached, total) = distances
                    .iter()
                    .flatten()
                    .filter(|&&hops| hops > 0)
                    .fold((0_usize, 0_usize), |(count, sum), &hops| (count + 1, sum + hops));
                let score = if total == 0 || n <= 1 {
                    0.0
                } else {
                    let reached = as_f64(reached);
                    (reached / as_f64(total)) * (reached / as_f64(n - 1))
                };
                (graph.node_at(index).clone(), score)
            })
            .collect()
    }
}

/// Brandes' betweenness for undirected graphs.
///
/// Scores are normalised by `(n - 1)(n - 2)` over ordered pairs, which is
/// `2 / ((n - 1)(n - 2))` over unordered ones. Graphs with fewer than three
/// nodes are left unnormalised.
#[derive(Clone, Copy, Debug, Default)]
pub struct BetweennessCentrality;

impl BetweennessCentrality {
    fn accumulate<N: NodeKey>(graph: &SimpleGraph<N>, source: usize, totals: &mut [f64]) {
        let n = graph.node_count();
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut paths = vec![0.0_f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        paths[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            stack.push(current);
            let Some(hops) = distance[current] else {
                continue;
            };
            for &next in graph.neighbour_indices(current) {
                if distance[next].is_none() {
                    distance[next] = Some(hops + 1);
                    queue.push_back(next);
                }
                if distance[next] == Some(hops + 1) {
                    paths[next] += paths[current];
                    predecessors[next].push(current);
                }
            }
        }

        let mut dependency = vec![0.0_f64; n];
        while let Some(current) = stack.pop() {
            for &previous in &predecessors[current] {
                dependency[previous] += paths[previous] / paths[current] * (1.0 + dependency[current]);
            }
            if current != source {
                totals[current] += dependency[current];
            }
        }
    }
}

impl<N: NodeKey> Centrality<N> for BetweennessCentrality {
    fn name(&self) -> &str {
        "betweenness"
    }

    fn scores(&self, graph: &SimpleGraph<N>) -> Scores<N> {
        let n = graph.node_count();
        let mut totals = vec![0.0; n];
        for source in 0..n {
            Self::accumulate(graph, source, &mut totals);
        }
        let scale = if n > 2 {
            1.0 / (as_f64(n - 1) * as_f64(n - 2))
        } else {
            // Each unordered pair was counted from both ends.
            0.5
        };
        totals
            .into_iter()
            .enumerate()
            .map(|(index, total)| (graph.node_at(index).clone(), total * scale))
            .collect()
    }
}
