use crate::constants::HELD_KARP_MAX_NODES;
use std::env;

/// All tunable algorithm parameters. Never mutated after construction;
/// every pipeline stage borrows it.
///
/// The snapping and recalculation fields at the bottom are consumed by the
/// serving layer (stop snapping, debounced recomputation), not by the core
/// pipeline; they live here so one configuration object covers the whole
/// deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgoParams {
    // --- Clustering ---
    /// Minimum number of stops to try. Default: 5
    pub k_min: usize,
    /// Maximum number of stops to try. Default: 15
    pub k_max: usize,
    /// Number of k-means restarts per K. Default: 10
    pub n_init: usize,
    /// Max Lloyd's iterations per restart. Default: 300
    pub max_iter: usize,
    /// Seed for the deterministic clustering RNG. Default: 42
    pub seed: u64,

    // --- Preprocessing ---
    /// MAD multiplier for outlier detection. Default: 5.0
    pub outlier_mad_threshold: f64,

    // --- Scoring ---
    /// Weight for average walking distance. Default: 1.0
    pub avg_walk_weight: f64,
    /// Weight for the coverage gap. Default: 2.0
    pub coverage_weight: f64,
    /// Weight for total route length. Default: 0.1
    pub route_length_weight: f64,
    /// Penalty per additional stop. Default: 10.0
    pub k_penalty_weight: f64,
    /// Distance threshold in meters for "covered" riders. Default: 400
    pub coverage_threshold_m: f64,

    // --- Serving-layer fields (not read by the core pipeline) ---
    /// Max distance in meters to snap a stop to a road. Default: 300
    pub snap_radius_m: f64,
    /// Bias toward major roads: 0 = nearest road, 1 = always major. Default: 0.3
    pub major_road_bias: f64,
    /// Merge stops closer than this distance in meters. Default: 200
    pub min_stop_distance_m: f64,
    /// Seconds to wait after the last submission before recalculating. Default: 30
    pub debounce_seconds: u64,
    /// Minimum seconds between recalculations. Default: 60
    pub min_recalc_interval: u64,
}

impl Default for AlgoParams {
    fn default() -> Self {
        Self {
            k_min: 5,
            k_max: 15,
            n_init: 10,
            max_iter: 300,
            seed: 42,
            outlier_mad_threshold: 5.0,
            avg_walk_weight: 1.0,
            coverage_weight: 2.0,
            route_length_weight: 0.1,
            k_penalty_weight: 10.0,
            coverage_threshold_m: 400.0,
            snap_radius_m: 300.0,
            major_road_bias: 0.3,
            min_stop_distance_m: 200.0,
            debounce_seconds: 30,
            min_recalc_interval: 60,
        }
    }
}

impl AlgoParams {
    /// Load parameters from `SHUTTLE_*` environment variables, falling back
    /// to the defaults for anything unset. Reads `.env` first.
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let params = Self {
            k_min: env::var("SHUTTLE_K_MIN")
                .unwrap_or_else(|_| defaults.k_min.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_K_MIN")?,

            k_max: env::var("SHUTTLE_K_MAX")
                .unwrap_or_else(|_| defaults.k_max.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_K_MAX")?,

            n_init: env::var("SHUTTLE_N_INIT")
                .unwrap_or_else(|_| defaults.n_init.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_N_INIT")?,

            max_iter: env::var("SHUTTLE_MAX_ITER")
                .unwrap_or_else(|_| defaults.max_iter.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_MAX_ITER")?,

            seed: env::var("SHUTTLE_SEED")
                .unwrap_or_else(|_| defaults.seed.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_SEED")?,

            outlier_mad_threshold: env::var("SHUTTLE_OUTLIER_MAD_THRESHOLD")
                .unwrap_or_else(|_| defaults.outlier_mad_threshold.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_OUTLIER_MAD_THRESHOLD")?,

            avg_walk_weight: env::var("SHUTTLE_AVG_WALK_WEIGHT")
                .unwrap_or_else(|_| defaults.avg_walk_weight.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_AVG_WALK_WEIGHT")?,

            coverage_weight: env::var("SHUTTLE_COVERAGE_WEIGHT")
                .unwrap_or_else(|_| defaults.coverage_weight.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_COVERAGE_WEIGHT")?,

            route_length_weight: env::var("SHUTTLE_ROUTE_LENGTH_WEIGHT")
                .unwrap_or_else(|_| defaults.route_length_weight.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_ROUTE_LENGTH_WEIGHT")?,

            k_penalty_weight: env::var("SHUTTLE_K_PENALTY_WEIGHT")
                .unwrap_or_else(|_| defaults.k_penalty_weight.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_K_PENALTY_WEIGHT")?,

            coverage_threshold_m: env::var("SHUTTLE_COVERAGE_THRESHOLD_M")
                .unwrap_or_else(|_| defaults.coverage_threshold_m.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_COVERAGE_THRESHOLD_M")?,

            snap_radius_m: env::var("SHUTTLE_SNAP_RADIUS_M")
                .unwrap_or_else(|_| defaults.snap_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_SNAP_RADIUS_M")?,

            major_road_bias: env::var("SHUTTLE_MAJOR_ROAD_BIAS")
                .unwrap_or_else(|_| defaults.major_road_bias.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_MAJOR_ROAD_BIAS")?,

            min_stop_distance_m: env::var("SHUTTLE_MIN_STOP_DISTANCE_M")
                .unwrap_or_else(|_| defaults.min_stop_distance_m.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_MIN_STOP_DISTANCE_M")?,

            debounce_seconds: env::var("SHUTTLE_DEBOUNCE_SECONDS")
                .unwrap_or_else(|_| defaults.debounce_seconds.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_DEBOUNCE_SECONDS")?,

            min_recalc_interval: env::var("SHUTTLE_MIN_RECALC_INTERVAL")
                .unwrap_or_else(|_| defaults.min_recalc_interval.to_string())
                .parse()
                .map_err(|_| "Invalid SHUTTLE_MIN_RECALC_INTERVAL")?,
        };

        params.validate()?;
        Ok(params)
    }

    /// Range checks shared by `from_env` and callers that build parameters
    /// by hand.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_min < 1 {
            return Err("SHUTTLE_K_MIN must be at least 1".to_string());
        }
        if self.k_max < self.k_min {
            return Err("SHUTTLE_K_MAX must be >= SHUTTLE_K_MIN".to_string());
        }
        if self.k_max + 1 > HELD_KARP_MAX_NODES {
            return Err(format!(
                "SHUTTLE_K_MAX + endpoint exceeds the exact solver limit of {} nodes",
                HELD_KARP_MAX_NODES
            ));
        }
        if self.n_init < 1 {
            return Err("SHUTTLE_N_INIT must be at least 1".to_string());
        }
        if self.max_iter < 1 {
            return Err("SHUTTLE_MAX_ITER must be at least 1".to_string());
        }
        if self.outlier_mad_threshold < 0.0 {
            return Err("SHUTTLE_OUTLIER_MAD_THRESHOLD must be non-negative".to_string());
        }
        if self.coverage_threshold_m <= 0.0 {
            return Err("SHUTTLE_COVERAGE_THRESHOLD_M must be positive".to_string());
        }
        Ok(())
    }
}
