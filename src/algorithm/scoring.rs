//! Route quality scoring. Lower scores are better.

use super::geometry::haversine_m;
use crate::config::AlgoParams;
use crate::models::GeoPoint;

/// Score components for one candidate route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub avg_walk: f64,
    pub coverage_pct: f64,
    pub route_length_m: f64,
}

/// Haversine distance from each point to its nearest stop. With no stops
/// every distance is infinite.
pub fn walk_distances(points: &[GeoPoint], stops: &[GeoPoint]) -> Vec<f64> {
    points
        .iter()
        .map(|p| {
            stops
                .iter()
                .map(|s| haversine_m(*p, *s))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

/// Total sequential distance along a route already in traversal order.
/// Not a round trip.
pub fn route_length_m(ordered: &[GeoPoint]) -> f64 {
    ordered.windows(2).map(|w| haversine_m(w[0], w[1])).sum()
}

/// Score a route configuration.
///
/// `route_with_endpoint` is the ordered stop sequence with the fixed
/// endpoint appended as its last element. Walk and coverage metrics are
/// measured against the stops only (the terminal endpoint is not a
/// boarding location); route length covers the endpoint leg.
///
/// Outlier points count toward walk and coverage: they are unserved
/// demand, not noise to hide from the evaluation. The x1000 on the
/// coverage gap and /1000 on route length keep the tuned default weights
/// unit-comparable and are part of the scoring contract.
pub fn score_route(
    k: usize,
    route_with_endpoint: &[GeoPoint],
    valid: &[GeoPoint],
    outliers: &[GeoPoint],
    params: &AlgoParams,
) -> ScoreBreakdown {
    let riders: Vec<GeoPoint> = valid.iter().chain(outliers).copied().collect();

    if riders.is_empty() {
        return ScoreBreakdown {
            score: 0.0,
            avg_walk: 0.0,
            coverage_pct: 1.0,
            route_length_m: 0.0,
        };
    }

    let stops = &route_with_endpoint[..route_with_endpoint.len().saturating_sub(1)];
    let distances = walk_distances(&riders, stops);

    let avg_walk = distances.iter().sum::<f64>() / distances.len() as f64;
    let covered = distances
        .iter()
        .filter(|&&d| d <= params.coverage_threshold_m)
        .count();
    let coverage_pct = covered as f64 / distances.len() as f64;

    let length = route_length_m(route_with_endpoint);

    let score = params.avg_walk_weight * avg_walk
        + params.coverage_weight * (1.0 - coverage_pct) * 1000.0
        + params.route_length_weight * (length / 1000.0)
        + params.k_penalty_weight * k as f64;

    ScoreBreakdown {
        score,
        avg_walk,
        coverage_pct,
        route_length_m: length,
    }
}
