//! Canonical graphs with hand-checked uncertainty and missing-edge values.
//!
//! Fixtures are plain edge lists so any crate can load them into its own
//! graph type.

/// Six-cycle `0-1-2-3-4-5-0`, recorded as real edges.
pub const HEXAGON_REAL_EDGES: [(u32, u32); 6] = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];

/// The six short diagonals of the hexagon, recorded as fake edges.
///
/// With these, every node has two real and two fake edges, so per-node
/// uncertainty is `log2(C(4, 2)) = log2(6)` and graph uncertainty is
/// `log2(C(12, 6)) = log2(924)`.
pub const HEXAGON_FAKE_EDGES: [(u32, u32); 6] = [(0, 2), (1, 3), (2, 4), (3, 5), (4, 0), (5, 1)];

/// Tree `0-1, 1-2, 1-3, 3-4` used for missing-edge enumeration.
pub const PATH_REAL_EDGES: [(u32, u32); 4] = [(0, 1), (1, 2), (1, 3), (3, 4)];

/// Every pair absent from [`PATH_REAL_EDGES`], in canonical form.
pub const PATH_MISSING_EDGES: [(u32, u32); 6] = [(0, 2), (0, 3), (0, 4), (1, 4), (2, 3), (2, 4)];

/// Barbell graph: two 5-cliques joined by the bridge `4-5`.
///
/// Useful where a test wants non-uniform centralities without generating a
/// random graph.
#[must_use]
pub fn barbell_edges() -> Vec<(u32, u32)> {
    let clique = |offset: u32| {
        (0..5).flat_map(move |a| ((a + 1)..5).map(move |b| (offset + a, offset + b)))
    };
    clique(0).chain(clique(5)).chain([(4, 5)]).collect()
}
