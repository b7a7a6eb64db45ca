use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// One k-means cluster, centered at the weighted mean of its members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cluster {
    pub center_lat: f64,
    pub center_lng: f64,
    /// Sum of the dedup weights assigned to this cluster.
    pub member_count: u32,
    /// Original submission ids. The core clusters deduplicated points and
    /// leaves this empty; attribution is the caller's bookkeeping.
    pub member_ids: Vec<String>,
}

/// A bus stop in the final route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub cluster_size: u32,
}

/// The result of evaluating one candidate stop count during the K sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub k: usize,
    /// Indices into `stops` in traversal order; the endpoint is excluded.
    pub ordering: Vec<usize>,
    /// Exact shortest-path length including the fixed endpoint, meters.
    pub distance: f64,
    pub stops: Vec<GeoPoint>,
    pub clusters: Vec<Cluster>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Ok,
    InsufficientData,
}

/// The final optimized route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub stops: Vec<Stop>,
    pub endpoint: GeoPoint,
    pub avg_walk_distance_m: f64,
    pub coverage_400m_pct: f64,
    pub total_submissions: usize,
    pub valid_submissions: usize,
    pub outlier_count: usize,
    pub rejected_count: usize,
    #[serde(rename = "K")]
    pub k: usize,
    pub score: f64,
    pub route_distance_m: f64,
    /// RFC 3339 timestamp of the computation.
    pub computed_at: String,
    pub status: RouteStatus,
    /// Present only when `status` is not `Ok`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
