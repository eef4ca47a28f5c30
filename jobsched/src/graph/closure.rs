/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure boolean-matrix helpers: reachability closure and transitive reduction.
//!
//! These are free functions over a square adjacency matrix so they can be
//! used and tested independently of [`JobGraph`](super::JobGraph).
//! `adj[u][v] == true` is the edge `u → v`.

/// Square boolean adjacency matrix.
pub type Matrix = Vec<Vec<bool>>;

/// Floyd–Warshall reachability: `closure[u][v]` is `true` iff a directed
/// path of length ≥ 1 leads from `u` to `v`.
///
/// `closure[u][u]` is therefore `true` exactly when `u` lies on a cycle.
pub fn reachability(adj: &[Vec<bool>]) -> Matrix {
    let n = adj.len();
    let mut reach: Matrix = adj.to_vec();

    for k in 0..n {
        for i in 0..n {
            if !reach[i][k] {
                continue;
            }
            for j in 0..n {
                if reach[k][j] {
                    reach[i][j] = true;
                }
            }
        }
    }
    reach
}

/// Returns `true` if any node can reach itself.
pub fn has_cycle(adj: &[Vec<bool>]) -> bool {
    let reach = reachability(adj);
    (0..reach.len()).any(|i| reach[i][i])
}

/// Removes every edge `u → v` for which another path `u → … → w → … → v`
/// exists through a third node `w`.
///
/// On an acyclic graph the result is the unique transitive reduction.  The
/// function is total on cyclic input, but the result is then not minimal in
/// any useful sense; callers are expected to reject cycles first.
pub fn transitive_reduction(adj: &[Vec<bool>]) -> Matrix {
    let n = adj.len();
    let reach = reachability(adj);
    let mut reduced: Matrix = adj.to_vec();

    for u in 0..n {
        for v in 0..n {
            if !adj[u][v] {
                continue;
            }
            let implied = (0..n).any(|w| w != u && w != v && reach[u][w] && reach[w][v]);
            if implied {
                reduced[u][v] = false;
            }
        }
    }
    reduced
}

// ── Tests ─────────────────────────────────────────────────────────────────────
