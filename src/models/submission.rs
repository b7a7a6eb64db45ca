use serde::{Deserialize, Serialize};

/// A single rider address submission, already geocoded upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

/// A deduplicated point; `weight` counts the submissions that collapsed
/// into this coordinate (rounded to 5 decimal places, ~1.1 m grid).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightedPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: u32,
}

/// A point excluded from clustering by outlier detection. Still charged
/// against walk-distance and coverage metrics downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlierPoint {
    pub lat: f64,
    pub lng: f64,
    pub id: String,
}

/// A submission rejected during bounds validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectedPoint {
    pub lat: f64,
    pub lng: f64,
    pub id: String,
    pub reason: String,
}

/// Output of the preprocessing pipeline.
#[derive(Debug, Clone, Default)]
pub struct PreprocessResult {
    pub valid: Vec<WeightedPoint>,
    pub outliers: Vec<OutlierPoint>,
    pub rejected: Vec<RejectedPoint>,
}
