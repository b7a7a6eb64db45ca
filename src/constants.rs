//! Process-wide constants.
//!
//! Values here are structural invariants of the deployment: the fixed
//! route endpoint, the service-area sanity box, and hard algorithm
//! ceilings. They are not user input. For runtime-tunable parameters see
//! [`AlgoParams`](crate::config::AlgoParams) instead.

use crate::models::{GeoBounds, GeoPoint};

// --- Deployment geography ---

/// Fixed route endpoint (La Guardia interchange, Tel Aviv). Every computed
/// route terminates here.
pub const ROUTE_ENDPOINT: GeoPoint = GeoPoint {
    lat: 32.063,
    lng: 34.790,
};

/// Service-area bounding box for sanity-checking submissions. Inclusive on
/// both ends of both axes; anything outside is rejected before clustering.
pub const SERVICE_AREA_BOUNDS: GeoBounds = GeoBounds {
    lat_min: 31.0,
    lat_max: 33.5,
    lng_min: 34.0,
    lng_max: 35.5,
};

// --- Exact solver ceiling ---

/// Hard upper bound on nodes (stops + endpoint) fed to the Held-Karp
/// solver. The DP is O(2^n * n^2); past ~18-20 nodes an exact solve stops
/// being interactive and a heuristic (nearest-neighbor + 2-opt) would be
/// needed instead. Raising K_MAX beyond this is a configuration error,
/// not a supported mode.
pub const HELD_KARP_MAX_NODES: usize = 18;
