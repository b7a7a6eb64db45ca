pub mod geo;
pub mod route;
pub mod submission;

pub use geo::{GeoBounds, GeoPoint, LocalXY};
pub use route::{Cluster, Route, RouteCandidate, RouteStatus, Stop};
pub use submission::{OutlierPoint, PreprocessResult, RejectedPoint, Submission, WeightedPoint};
