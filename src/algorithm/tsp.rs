//! Exact stop ordering.
//!
//! Held-Karp bitmask dynamic programming finds the shortest Hamiltonian
//! path through all stops terminating at the fixed endpoint; the free
//! start node is chosen by trying every stop. The cost is
//! O(starts * 2^n * n^2), feasible only for small n, which is why the
//! node count is hard-capped.

use super::geometry::haversine_m;
use crate::constants::HELD_KARP_MAX_NODES;
use crate::error::{AlgoError, Result};
use crate::models::GeoPoint;

/// A solved path through every node of a distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TspPath {
    /// Node indices in traversal order, start and end included.
    pub path: Vec<usize>,
    /// Total path length in meters.
    pub distance: f64,
}

/// The best ordering of stops ending at the fixed endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRoute {
    /// Stop indices in traversal order; the endpoint is excluded.
    pub ordering: Vec<usize>,
    /// Total route length in meters, endpoint leg included.
    pub distance: f64,
}

/// Symmetric pairwise haversine distance matrix.
pub fn build_distance_matrix(points: &[GeoPoint]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = haversine_m(points[i], points[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }

    matrix
}

/// Shortest Hamiltonian path from `start` to `end` over a full matrix.
///
/// `dp[mask * n + v]` is the minimum distance to reach `v` having visited
/// exactly the nodes in `mask`; `parent` keeps the predecessor node (the
/// predecessor mask is just `mask` without `v`). Flat tables, no per-cell
/// allocation.
pub fn held_karp(matrix: &[Vec<f64>], start: usize, end: usize) -> Result<TspPath> {
    let n = matrix.len();

    if n > HELD_KARP_MAX_NODES {
        return Err(AlgoError::TooManyNodes {
            nodes: n,
            max: HELD_KARP_MAX_NODES,
        });
    }
    if n == 0 {
        return Ok(TspPath {
            path: Vec::new(),
            distance: 0.0,
        });
    }
    if n == 1 {
        return Ok(TspPath {
            path: vec![0],
            distance: 0.0,
        });
    }

    let states = 1usize << n;
    let mut dp = vec![f64::INFINITY; states * n];
    let mut parent = vec![usize::MAX; states * n];

    dp[(1 << start) * n + start] = 0.0;

    for mask in 0..states {
        for u in 0..n {
            let here = dp[mask * n + u];
            if !here.is_finite() || mask & (1 << u) == 0 {
                continue;
            }

            for v in 0..n {
                if mask & (1 << v) != 0 {
                    continue;
                }

                let next = mask | (1 << v);
                let candidate = here + matrix[u][v];
                if candidate < dp[next * n + v] {
                    dp[next * n + v] = candidate;
                    parent[next * n + v] = u;
                }
            }
        }
    }

    let full = states - 1;
    let distance = dp[full * n + end];
    if !distance.is_finite() {
        // Unreachable with a complete matrix; surfaced rather than panicking.
        return Ok(TspPath {
            path: Vec::new(),
            distance: f64::INFINITY,
        });
    }

    let mut path = Vec::with_capacity(n);
    let mut mask = full;
    let mut node = end;
    loop {
        path.push(node);
        let prev = parent[mask * n + node];
        if prev == usize::MAX {
            break;
        }
        mask &= !(1 << node);
        node = prev;
    }
    path.reverse();

    Ok(TspPath { path, distance })
}

/// Order stops so the route ends at `endpoint`.
///
/// The endpoint is appended as the last matrix index and every stop is
/// tried as the start node (never the endpoint); the lowest total distance
/// wins, ties keeping the first start tried.
pub fn find_optimal_route(stops: &[GeoPoint], endpoint: GeoPoint) -> Result<OrderedRoute> {
    if stops.is_empty() {
        return Ok(OrderedRoute {
            ordering: Vec::new(),
            distance: 0.0,
        });
    }

    let end = stops.len();
    let mut nodes = stops.to_vec();
    nodes.push(endpoint);
    let matrix = build_distance_matrix(&nodes);

    let mut best = held_karp(&matrix, 0, end)?;
    for start in 1..stops.len() {
        let trial = held_karp(&matrix, start, end)?;
        if trial.distance < best.distance {
            best = trial;
        }
    }

    let ordering = best.path.into_iter().filter(|&i| i != end).collect();

    Ok(OrderedRoute {
        ordering,
        distance: best.distance,
    })
}
