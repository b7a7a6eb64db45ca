use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use shuttleplan::models::Submission;
use uuid::Uuid;

/// Neighborhood centers with jitter spans, roughly central / north / south
/// Tel Aviv.
const NEIGHBORHOODS: &[(f64, f64, f64, f64)] = &[
    (32.07, 34.78, 0.010, 0.008),
    (32.11, 34.79, 0.008, 0.007),
    (31.98, 34.78, 0.012, 0.008),
];

/// Far suburbs and neighboring cities; inside the service area but away
/// from the main demand clusters.
const OUTLIER_ZONES: &[(f64, f64)] = &[
    (31.97, 34.80), // Rishon LeZion
    (32.16, 34.79), // Herzliya
    (32.02, 34.74), // Bat Yam
    (32.09, 34.88), // Petah Tikva
    (32.01, 34.77), // Holon
];

/// Coordinates outside the service-area bounding box.
const INVALID_POINTS: &[(f64, f64)] = &[
    (40.7128, -74.006), // New York City
    (30.5, 33.5),       // Sinai desert
    (34.0, 35.0),       // latitude/longitude swapped
];

pub struct GeneratorSpec {
    /// Submissions scattered around the neighborhood centers.
    pub clustered: usize,
    /// Submissions in the far suburb zones.
    pub outliers: usize,
    /// Submissions outside the service-area bounding box.
    pub out_of_bounds: usize,
    pub seed: u64,
}

/// Deterministic submission batch: coordinates depend only on the seed.
/// Ids are fresh UUIDs; they never feed the algorithm's arithmetic.
pub fn generate_submissions(spec: &GeneratorSpec) -> Vec<Submission> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut submissions = Vec::new();

    for i in 0..spec.clustered {
        let (lat, lng, lat_span, lng_span) = NEIGHBORHOODS[i % NEIGHBORHOODS.len()];
        submissions.push(Submission {
            id: Uuid::new_v4().to_string(),
            lat: lat + (rng.random::<f64>() - 0.5) * 2.0 * lat_span,
            lng: lng + (rng.random::<f64>() - 0.5) * 2.0 * lng_span,
        });
    }

    for i in 0..spec.outliers {
        let (lat, lng) = OUTLIER_ZONES[i % OUTLIER_ZONES.len()];
        submissions.push(Submission {
            id: Uuid::new_v4().to_string(),
            lat: lat + (rng.random::<f64>() - 0.5) * 0.01,
            lng: lng + (rng.random::<f64>() - 0.5) * 0.01,
        });
    }

    for i in 0..spec.out_of_bounds {
        let (lat, lng) = INVALID_POINTS[i % INVALID_POINTS.len()];
        submissions.push(Submission {
            id: Uuid::new_v4().to_string(),
            lat,
            lng,
        });
    }

    submissions
}
