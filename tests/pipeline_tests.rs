use shuttleplan::config::AlgoParams;
use shuttleplan::constants::{ROUTE_ENDPOINT, SERVICE_AREA_BOUNDS};
use shuttleplan::models::{RouteStatus, Submission};

mod common;

use common::{generate_submissions, GeneratorSpec};

#[test]
fn test_end_to_end_hundred_submissions() {
    let submissions = generate_submissions(&GeneratorSpec {
        clustered: 90,
        outliers: 7,
        out_of_bounds: 3,
        seed: 42,
    });
    let params = AlgoParams::default();

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(route.status, RouteStatus::Ok);
    assert!(route.k >= 5 && route.k <= 15, "got K={}", route.k);
    assert_eq!(route.stops.len(), route.k);
    assert_eq!(route.total_submissions, 100);
    assert_eq!(route.rejected_count, 3);

    assert!(route.avg_walk_distance_m.is_finite());
    assert!(route.avg_walk_distance_m < 5000.0);
    assert!(route.coverage_400m_pct >= 0.0 && route.coverage_400m_pct <= 1.0);
    assert!(route.route_distance_m > 0.0);
    assert!(route.route_distance_m < 100_000.0);

    // All submissions are accounted for; dedup may shrink the valid count
    assert!(
        route.valid_submissions + route.outlier_count + route.rejected_count
            <= route.total_submissions
    );

    // Stops stay inside the service area, near the demand
    for stop in &route.stops {
        assert!(SERVICE_AREA_BOUNDS.contains(stop.lat, stop.lng));
        assert!(stop.lat > 31.9 && stop.lat < 32.2, "stop at {}", stop.lat);
        assert!(stop.lng > 34.7 && stop.lng < 34.9, "stop at {}", stop.lng);
        assert!(stop.cluster_size >= 1);
    }

    assert_eq!(route.endpoint.lat, ROUTE_ENDPOINT.lat);
    assert_eq!(route.endpoint.lng, ROUTE_ENDPOINT.lng);
    assert!(!route.computed_at.is_empty());
}

#[test]
fn test_insufficient_data_with_two_submissions() {
    let submissions = vec![
        Submission {
            id: "s1".to_string(),
            lat: 32.08,
            lng: 34.78,
        },
        Submission {
            id: "s2".to_string(),
            lat: 32.09,
            lng: 34.79,
        },
    ];
    let params = AlgoParams::default();

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(route.status, RouteStatus::InsufficientData);
    assert_eq!(route.k, 0);
    assert!(route.stops.is_empty());
    assert!(route.valid_submissions < params.k_min);
    assert!(route.message.is_some());
}

#[test]
fn test_determinism_across_repeated_runs() {
    let submissions = generate_submissions(&GeneratorSpec {
        clustered: 80,
        outliers: 0,
        out_of_bounds: 0,
        seed: 123,
    });
    // Narrow K range keeps the exact solver cheap; determinism does not
    // depend on the sweep width.
    let params = AlgoParams {
        k_max: 8,
        ..AlgoParams::default()
    };

    let first = shuttleplan::compute_optimal_route(&submissions, &params);
    let second = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(first.k, second.k);
    assert_eq!(first.score, second.score);
    assert_eq!(first.avg_walk_distance_m, second.avg_walk_distance_m);
    assert_eq!(first.coverage_400m_pct, second.coverage_400m_pct);
    assert_eq!(first.route_distance_m, second.route_distance_m);
    assert_eq!(first.stops, second.stops);
}

#[test]
fn test_different_seed_still_yields_valid_route() {
    let submissions = generate_submissions(&GeneratorSpec {
        clustered: 60,
        outliers: 2,
        out_of_bounds: 0,
        seed: 9,
    });
    let params = AlgoParams {
        seed: 1234,
        k_max: 8,
        ..AlgoParams::default()
    };

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(route.status, RouteStatus::Ok);
    assert_eq!(route.stops.len(), route.k);
}

#[test]
fn test_narrow_k_range_constrains_output() {
    let submissions = generate_submissions(&GeneratorSpec {
        clustered: 100,
        outliers: 0,
        out_of_bounds: 0,
        seed: 42,
    });
    let params = AlgoParams {
        k_min: 7,
        k_max: 7,
        ..AlgoParams::default()
    };

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(route.status, RouteStatus::Ok);
    assert_eq!(route.k, 7);
    assert_eq!(route.stops.len(), 7);
}

#[test]
fn test_route_json_contract() {
    let submissions = generate_submissions(&GeneratorSpec {
        clustered: 60,
        outliers: 0,
        out_of_bounds: 1,
        seed: 7,
    });
    let params = AlgoParams {
        k_max: 7,
        ..AlgoParams::default()
    };

    let route = shuttleplan::compute_optimal_route(&submissions, &params);
    let value = serde_json::to_value(&route).unwrap();

    for field in [
        "stops",
        "endpoint",
        "avg_walk_distance_m",
        "coverage_400m_pct",
        "total_submissions",
        "valid_submissions",
        "outlier_count",
        "rejected_count",
        "K",
        "score",
        "route_distance_m",
        "computed_at",
        "status",
    ] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }

    assert_eq!(value["status"], "ok");
    assert!(value.get("message").is_none(), "message absent when ok");

    let stop = &value["stops"][0];
    for field in ["lat", "lng", "label", "cluster_size"] {
        assert!(stop.get(field).is_some(), "missing stop field {}", field);
    }
    assert_eq!(stop["label"], "Stop 1");

    // Insufficient-data routes keep the same shape plus a message
    let short = shuttleplan::compute_optimal_route(&submissions[..2], &params);
    let value = serde_json::to_value(&short).unwrap();
    assert_eq!(value["status"], "insufficient_data");
    assert_eq!(value["K"], 0);
    assert!(value["message"].is_string());
}

#[test]
fn test_duplicate_heavy_batch_collapses_but_serves_everyone() {
    // 40 riders from only six distinct addresses
    let addresses = [
        (32.0853, 34.7818),
        (32.1093, 34.8555),
        (32.0684, 34.7947),
        (32.0504, 34.7522),
        (32.1133, 34.7900),
        (32.0950, 34.8100),
    ];
    let submissions: Vec<Submission> = (0..40)
        .map(|i| {
            let (lat, lng) = addresses[i % addresses.len()];
            Submission {
                id: format!("rider-{}", i),
                lat,
                lng,
            }
        })
        .collect();
    let params = AlgoParams::default();

    let route = shuttleplan::compute_optimal_route(&submissions, &params);

    assert_eq!(route.status, RouteStatus::Ok);
    assert_eq!(route.valid_submissions, 6);
    // Cluster sizes carry the dedup weights, so all 40 riders are counted
    let served: u32 = route.stops.iter().map(|s| s.cluster_size).sum();
    assert_eq!(served, 40);
}
