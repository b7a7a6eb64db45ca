// Library exports for the optimizer core and its CLI

pub mod algorithm;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use algorithm::compute_optimal_route;
pub use config::AlgoParams;
pub use error::{AlgoError, Result};
