//! Preprocessing pipeline for rider submissions.
//! Stages run in a fixed order: bounds validation -> deduplication ->
//! MAD outlier detection. Each stage is pure and independently testable.

use std::collections::BTreeMap;

use super::geometry::haversine_m;
use crate::config::AlgoParams;
use crate::constants::SERVICE_AREA_BOUNDS;
use crate::models::{
    GeoBounds, GeoPoint, OutlierPoint, PreprocessResult, RejectedPoint, Submission, WeightedPoint,
};

/// Decimal places kept when rounding coordinates for dedup (~1.1 m grid).
const DEDUP_PRECISION: i32 = 5;

pub struct BoundsValidation {
    pub valid: Vec<Submission>,
    pub rejected: Vec<RejectedPoint>,
}

/// Split submissions into those inside the bounding box and rejects.
pub fn validate_bounds(submissions: &[Submission], bounds: &GeoBounds) -> BoundsValidation {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();

    for s in submissions {
        if bounds.contains(s.lat, s.lng) {
            valid.push(s.clone());
        } else {
            rejected.push(RejectedPoint {
                lat: s.lat,
                lng: s.lng,
                id: s.id.clone(),
                reason: format!(
                    "Outside bounds: lat [{}, {}], lng [{}, {}]",
                    bounds.lat_min, bounds.lat_max, bounds.lng_min, bounds.lng_max
                ),
            });
        }
    }

    BoundsValidation { valid, rejected }
}

fn scale_coord(value: f64) -> i64 {
    (value * 10f64.powi(DEDUP_PRECISION)).round() as i64
}

/// Collapse submissions that share a coordinate (to 5 decimal places) into
/// weighted points.
///
/// Grouping keys are integer-scaled so float formatting can never split a
/// group, and the BTreeMap makes the output order a function of the
/// coordinates alone, not of insertion order. Submission ids are not
/// retained on the merged point.
pub fn deduplicate(submissions: &[Submission]) -> Vec<WeightedPoint> {
    let factor = 10f64.powi(DEDUP_PRECISION);
    let mut groups: BTreeMap<(i64, i64), u32> = BTreeMap::new();

    for s in submissions {
        let key = (scale_coord(s.lat), scale_coord(s.lng));
        *groups.entry(key).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((lat, lng), weight)| WeightedPoint {
            lat: lat as f64 / factor,
            lng: lng as f64 / factor,
            weight,
        })
        .collect()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub struct OutlierDetection {
    pub valid: Vec<WeightedPoint>,
    pub outliers: Vec<OutlierPoint>,
}

/// Flag points whose haversine distance from the coordinate-wise median
/// center exceeds `median_distance + threshold * MAD`.
///
/// With zero or one points the median and MAD degenerate to 0 and nothing
/// can be flagged. Outlier ids are synthetic (`dedup_{index}`) because the
/// points have already been merged.
pub fn detect_outliers(points: &[WeightedPoint], threshold: f64) -> OutlierDetection {
    if points.is_empty() {
        return OutlierDetection {
            valid: Vec::new(),
            outliers: Vec::new(),
        };
    }

    let median_lat = median(&points.iter().map(|p| p.lat).collect::<Vec<_>>());
    let median_lng = median(&points.iter().map(|p| p.lng).collect::<Vec<_>>());
    let center = GeoPoint::new(median_lat, median_lng);

    let distances: Vec<f64> = points
        .iter()
        .map(|p| haversine_m(GeoPoint::new(p.lat, p.lng), center))
        .collect();

    let median_dist = median(&distances);
    let deviations: Vec<f64> = distances.iter().map(|d| (d - median_dist).abs()).collect();
    let mad = median(&deviations);
    let cutoff = median_dist + threshold * mad;

    let mut valid = Vec::new();
    let mut outliers = Vec::new();
    for (i, p) in points.iter().enumerate() {
        if distances[i] > cutoff {
            outliers.push(OutlierPoint {
                lat: p.lat,
                lng: p.lng,
                id: format!("dedup_{}", i),
            });
        } else {
            valid.push(*p);
        }
    }

    OutlierDetection { valid, outliers }
}

/// Full preprocessing pipeline: bounds -> dedup -> outliers.
///
/// Deduplication must run before outlier detection so duplicate mass
/// cannot bias the median center.
pub fn preprocess(submissions: &[Submission], params: &AlgoParams) -> PreprocessResult {
    let BoundsValidation {
        valid: in_bounds,
        rejected,
    } = validate_bounds(submissions, &SERVICE_AREA_BOUNDS);

    let deduped = deduplicate(&in_bounds);

    let OutlierDetection { valid, outliers } =
        detect_outliers(&deduped, params.outlier_mad_threshold);

    tracing::debug!(
        total = submissions.len(),
        rejected = rejected.len(),
        deduped = deduped.len(),
        outliers = outliers.len(),
        valid = valid.len(),
        "Preprocessing complete"
    );

    PreprocessResult {
        valid,
        outliers,
        rejected,
    }
}
