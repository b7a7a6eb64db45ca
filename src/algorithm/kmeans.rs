//! Weighted k-means clustering on locally projected coordinates.
//!
//! Points are projected to a flat (x, y) plane centered on their weighted
//! centroid, clustered with k-means++ seeding and Lloyd's algorithm over
//! `n_init` restarts, and the winning centers are projected back to
//! geographic coordinates.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use super::geometry::{from_local_xy, to_local_xy, weighted_centroid};
use crate::config::AlgoParams;
use crate::error::{AlgoError, Result};
use crate::models::{Cluster, GeoPoint, WeightedPoint};

/// A projected point carrying its dedup weight.
#[derive(Debug, Clone, Copy)]
struct XyWeighted {
    x: f64,
    y: f64,
    weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Center {
    x: f64,
    y: f64,
}

/// Clusters plus the per-point assignment (index into `clusters`).
#[derive(Debug, Clone, Default)]
pub struct KmeansOutcome {
    pub clusters: Vec<Cluster>,
    pub labels: Vec<usize>,
}

/// Squared Euclidean distance; no sqrt in the hot loops.
fn dist_sq(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

/// k-means++ seeding: the first center is drawn with probability
/// proportional to point weight, each further center proportional to
/// weight times squared distance to the nearest already-chosen center.
fn kmeanspp_init(points: &[XyWeighted], k: usize, rng: &mut StdRng) -> Vec<Center> {
    let mut centers: Vec<Center> = Vec::with_capacity(k);

    let total_weight: f64 = points.iter().map(|p| p.weight).sum();
    let mut r = rng.random::<f64>() * total_weight;
    let mut first = points.len() - 1;
    for (i, p) in points.iter().enumerate() {
        r -= p.weight;
        if r <= 0.0 {
            first = i;
            break;
        }
    }
    centers.push(Center {
        x: points[first].x,
        y: points[first].y,
    });

    while centers.len() < k {
        let mut dists = vec![0.0; points.len()];
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            let mut min_d = f64::INFINITY;
            for c in &centers {
                let d = dist_sq(p.x, p.y, c.x, c.y);
                if d < min_d {
                    min_d = d;
                }
            }
            dists[i] = min_d * p.weight;
            total += dists[i];
        }

        let mut r = rng.random::<f64>() * total;
        let mut next = points.len() - 1;
        for (i, d) in dists.iter().enumerate() {
            r -= d;
            if r <= 0.0 {
                next = i;
                break;
            }
        }
        centers.push(Center {
            x: points[next].x,
            y: points[next].y,
        });
    }

    centers
}

struct Trial {
    centers: Vec<Center>,
    labels: Vec<usize>,
    inertia: f64,
}

/// One Lloyd's run: assign each point to its nearest center, recompute
/// centers as the weighted mean of their assignments, stop early once no
/// label changes. A center left with zero assigned weight collapses to
/// the origin instead of dividing by zero; it cannot happen while
/// K <= number of distinct points but must not produce NaN when it does.
fn lloyd(points: &[XyWeighted], initial: Vec<Center>, max_iter: usize) -> Trial {
    let k = initial.len();
    let mut centers = initial;
    let mut labels = vec![0usize; points.len()];

    for _ in 0..max_iter {
        let mut changed = false;
        for (i, p) in points.iter().enumerate() {
            let mut min_d = f64::INFINITY;
            let mut best = 0;
            for (c, center) in centers.iter().enumerate() {
                let d = dist_sq(p.x, p.y, center.x, center.y);
                if d < min_d {
                    min_d = d;
                    best = c;
                }
            }
            if labels[i] != best {
                labels[i] = best;
                changed = true;
            }
        }

        let mut sums = vec![(0.0f64, 0.0f64, 0.0f64); k];
        for (i, p) in points.iter().enumerate() {
            let s = &mut sums[labels[i]];
            s.0 += p.x * p.weight;
            s.1 += p.y * p.weight;
            s.2 += p.weight;
        }
        for (c, (sx, sy, w)) in sums.into_iter().enumerate() {
            centers[c] = if w == 0.0 {
                Center { x: 0.0, y: 0.0 }
            } else {
                Center {
                    x: sx / w,
                    y: sy / w,
                }
            };
        }

        if !changed {
            break;
        }
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &l)| p.weight * dist_sq(p.x, p.y, centers[l].x, centers[l].y))
        .sum();

    Trial {
        centers,
        labels,
        inertia,
    }
}

/// Cluster weighted points into `k` groups.
///
/// A single generator seeded from `seed` drives every restart and nothing
/// in this module iterates a hash map, so identical
/// (points, k, params, seed) always produce identical clusters and labels.
/// The trial with the strictly lowest inertia wins; ties keep the first
/// one seen.
///
/// `Cluster.member_ids` is left empty: the input points are deduplicated,
/// so mapping assignments back to submission ids is the caller's
/// bookkeeping (the labels returned here are the raw material for it).
pub fn kmeans(
    points: &[WeightedPoint],
    k: usize,
    params: &AlgoParams,
    seed: u64,
) -> Result<KmeansOutcome> {
    if points.is_empty() {
        return Ok(KmeansOutcome::default());
    }
    if k == 0 {
        return Err(AlgoError::InvalidK);
    }
    if k > points.len() {
        return Err(AlgoError::KExceedsPoints {
            k,
            points: points.len(),
        });
    }
    if params.n_init == 0 {
        return Err(AlgoError::InvalidParams(
            "N_INIT must be at least 1".to_string(),
        ));
    }

    let reference = weighted_centroid(points)?;
    let projected: Vec<XyWeighted> = points
        .iter()
        .map(|p| {
            let xy = to_local_xy(GeoPoint::new(p.lat, p.lng), reference);
            XyWeighted {
                x: xy.x,
                y: xy.y,
                weight: f64::from(p.weight),
            }
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);

    let mut best = lloyd(
        &projected,
        kmeanspp_init(&projected, k, &mut rng),
        params.max_iter,
    );
    for _ in 1..params.n_init {
        let trial = lloyd(
            &projected,
            kmeanspp_init(&projected, k, &mut rng),
            params.max_iter,
        );
        if trial.inertia < best.inertia {
            best = trial;
        }
    }

    let mut member_counts = vec![0u32; k];
    for (i, p) in points.iter().enumerate() {
        member_counts[best.labels[i]] += p.weight;
    }

    let clusters = best
        .centers
        .iter()
        .zip(member_counts)
        .map(|(c, member_count)| {
            let geo = from_local_xy(c.x, c.y, reference);
            Cluster {
                center_lat: geo.lat,
                center_lng: geo.lng,
                member_count,
                member_ids: Vec::new(),
            }
        })
        .collect();

    Ok(KmeansOutcome {
        clusters,
        labels: best.labels,
    })
}
