//! Route optimization pipeline.
//!
//! Preprocessing, weighted clustering, exact ordering, and scoring glued
//! into the single public entry point [`compute_optimal_route`]: for each
//! candidate stop count K the pipeline clusters the demand, orders the
//! cluster centers into the cheapest path ending at the fixed endpoint,
//! scores the result, and the cheapest K wins.

pub mod geometry;
pub mod kmeans;
pub mod preprocessing;
pub mod scoring;
pub mod tsp;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config::AlgoParams;
use crate::constants::ROUTE_ENDPOINT;
use crate::error::Result;
use crate::models::{
    GeoPoint, PreprocessResult, Route, RouteCandidate, RouteStatus, Stop, Submission,
    WeightedPoint,
};
use self::kmeans::kmeans;
use self::preprocessing::preprocess;
use self::scoring::{score_route, ScoreBreakdown};
use self::tsp::find_optimal_route;

fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.to_string())
}

fn insufficient_data_route(
    total_submissions: usize,
    pre: &PreprocessResult,
    message: String,
) -> Route {
    Route {
        stops: Vec::new(),
        endpoint: ROUTE_ENDPOINT,
        avg_walk_distance_m: 0.0,
        coverage_400m_pct: 0.0,
        total_submissions,
        valid_submissions: pre.valid.len(),
        outlier_count: pre.outliers.len(),
        rejected_count: pre.rejected.len(),
        k: 0,
        score: 0.0,
        route_distance_m: 0.0,
        computed_at: timestamp_now(),
        status: RouteStatus::InsufficientData,
        message: Some(message),
    }
}

/// Cluster, order, and score one candidate stop count.
fn evaluate_stop_count(
    k: usize,
    valid: &[WeightedPoint],
    valid_points: &[GeoPoint],
    outlier_points: &[GeoPoint],
    params: &AlgoParams,
) -> Result<(RouteCandidate, ScoreBreakdown)> {
    let outcome = kmeans(valid, k, params, params.seed)?;

    let stop_points: Vec<GeoPoint> = outcome
        .clusters
        .iter()
        .map(|c| GeoPoint::new(c.center_lat, c.center_lng))
        .collect();

    let ordered = find_optimal_route(&stop_points, ROUTE_ENDPOINT)?;

    let mut route_seq: Vec<GeoPoint> = ordered.ordering.iter().map(|&i| stop_points[i]).collect();
    route_seq.push(ROUTE_ENDPOINT);

    let breakdown = score_route(k, &route_seq, valid_points, outlier_points, params);

    Ok((
        RouteCandidate {
            k,
            ordering: ordered.ordering,
            distance: ordered.distance,
            stops: stop_points,
            clusters: outcome.clusters,
            score: breakdown.score,
        },
        breakdown,
    ))
}

/// Compute the optimal bus route for a batch of rider submissions.
///
/// The whole computation is a pure function of `(submissions, params)`:
/// given the same inputs and the same `params.seed`, the result is
/// bit-for-bit identical (the timestamp aside). Malformed-but-plausible
/// input never panics; too few valid points after preprocessing is a
/// normal terminal status, not an error.
pub fn compute_optimal_route(submissions: &[Submission], params: &AlgoParams) -> Route {
    let pre = preprocess(submissions, params);

    if pre.valid.len() < params.k_min {
        tracing::info!(
            valid = pre.valid.len(),
            k_min = params.k_min,
            "Insufficient data for route computation"
        );
        let message = format!(
            "Need at least {} valid points, have {}",
            params.k_min,
            pre.valid.len()
        );
        return insufficient_data_route(submissions.len(), &pre, message);
    }

    let valid_points: Vec<GeoPoint> = pre
        .valid
        .iter()
        .map(|p| GeoPoint::new(p.lat, p.lng))
        .collect();
    let outlier_points: Vec<GeoPoint> = pre
        .outliers
        .iter()
        .map(|o| GeoPoint::new(o.lat, o.lng))
        .collect();

    let k_max = params.k_max.min(pre.valid.len());
    let mut best: Option<(RouteCandidate, ScoreBreakdown)> = None;

    for k in params.k_min..=k_max {
        let evaluated =
            match evaluate_stop_count(k, &pre.valid, &valid_points, &outlier_points, params) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(k, error = %e, "Skipping stop count that failed to evaluate");
                    continue;
                }
            };

        tracing::debug!(
            k,
            score = evaluated.0.score,
            route_m = evaluated.0.distance,
            "Evaluated stop count"
        );

        // Strict comparison: ties keep the lowest K encountered
        if best
            .as_ref()
            .map_or(true, |(b, _)| evaluated.0.score < b.score)
        {
            best = Some(evaluated);
        }
    }

    let (winner, breakdown) = match best {
        Some(b) => b,
        None => {
            tracing::warn!(
                k_min = params.k_min,
                k_max,
                "No candidate stop count could be evaluated"
            );
            return insufficient_data_route(
                submissions.len(),
                &pre,
                format!(
                    "No feasible stop count in [{}, {}]",
                    params.k_min, k_max
                ),
            );
        }
    };

    let stops: Vec<Stop> = winner
        .ordering
        .iter()
        .enumerate()
        .map(|(i, &stop_idx)| Stop {
            lat: winner.stops[stop_idx].lat,
            lng: winner.stops[stop_idx].lng,
            label: format!("Stop {}", i + 1),
            cluster_size: winner.clusters[stop_idx].member_count,
        })
        .collect();

    tracing::info!(
        k = winner.k,
        score = breakdown.score,
        stops = stops.len(),
        route_m = winner.distance,
        avg_walk_m = breakdown.avg_walk,
        coverage_pct = breakdown.coverage_pct,
        "Route computation complete"
    );

    Route {
        stops,
        endpoint: ROUTE_ENDPOINT,
        avg_walk_distance_m: breakdown.avg_walk,
        coverage_400m_pct: breakdown.coverage_pct,
        total_submissions: submissions.len(),
        valid_submissions: pre.valid.len(),
        outlier_count: pre.outliers.len(),
        rejected_count: pre.rejected.len(),
        k: winner.k,
        score: breakdown.score,
        route_distance_m: winner.distance,
        computed_at: timestamp_now(),
        status: RouteStatus::Ok,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: &str, lat: f64, lng: f64) -> Submission {
        Submission {
            id: id.to_string(),
            lat,
            lng,
        }
    }

    #[test]
    fn test_too_few_submissions_is_a_normal_status() {
        let params = AlgoParams::default();
        let subs = vec![
            submission("s1", 32.08, 34.78),
            submission("s2", 32.09, 34.79),
        ];

        let route = compute_optimal_route(&subs, &params);

        assert_eq!(route.status, RouteStatus::InsufficientData);
        assert_eq!(route.k, 0);
        assert!(route.stops.is_empty());
        assert_eq!(route.total_submissions, 2);
        assert_eq!(route.valid_submissions, 2);
        let message = route.message.expect("message must explain the shortfall");
        assert!(message.contains("Need at least 5"), "{}", message);
    }

    #[test]
    fn test_all_out_of_bounds_degrades_gracefully() {
        let params = AlgoParams::default();
        let subs: Vec<Submission> = (0..10)
            .map(|i| submission(&format!("s{}", i), 48.85, 2.35))
            .collect();

        let route = compute_optimal_route(&subs, &params);

        assert_eq!(route.status, RouteStatus::InsufficientData);
        assert_eq!(route.rejected_count, 10);
        assert_eq!(route.valid_submissions, 0);
    }

    #[test]
    fn test_empty_input_degrades_gracefully() {
        let params = AlgoParams::default();
        let route = compute_optimal_route(&[], &params);

        assert_eq!(route.status, RouteStatus::InsufficientData);
        assert_eq!(route.total_submissions, 0);
    }

    #[test]
    fn test_k_clamped_to_valid_point_count() {
        // 6 distinct points with k_min 5: only K in {5, 6} can be tried
        let params = AlgoParams::default();
        let subs: Vec<Submission> = (0..6)
            .map(|i| {
                submission(
                    &format!("s{}", i),
                    32.06 + i as f64 * 0.01,
                    34.76 + i as f64 * 0.01,
                )
            })
            .collect();

        let route = compute_optimal_route(&subs, &params);

        assert_eq!(route.status, RouteStatus::Ok);
        assert!(route.k == 5 || route.k == 6, "got K={}", route.k);
        assert_eq!(route.stops.len(), route.k);
    }

    #[test]
    fn test_stop_labels_follow_traversal_order() {
        let params = AlgoParams {
            k_min: 3,
            k_max: 3,
            ..AlgoParams::default()
        };
        let subs: Vec<Submission> = (0..9)
            .map(|i| {
                submission(
                    &format!("s{}", i),
                    32.06 + (i % 3) as f64 * 0.02,
                    34.76 + (i / 3) as f64 * 0.02,
                )
            })
            .collect();

        let route = compute_optimal_route(&subs, &params);

        assert_eq!(route.status, RouteStatus::Ok);
        assert_eq!(route.k, 3);
        for (i, stop) in route.stops.iter().enumerate() {
            assert_eq!(stop.label, format!("Stop {}", i + 1));
            assert!(stop.cluster_size >= 1);
        }
        let sizes: u32 = route.stops.iter().map(|s| s.cluster_size).sum();
        assert_eq!(sizes, 9, "every rider belongs to exactly one stop");
    }
}
