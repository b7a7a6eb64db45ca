use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("K must be positive")]
    InvalidK,

    #[error("K ({k}) cannot exceed number of points ({points})")]
    KExceedsPoints { k: usize, points: usize },

    #[error("centroid of an empty point set is undefined")]
    EmptyInput,

    #[error("total point weight is zero")]
    ZeroWeight,

    #[error("route has {nodes} nodes, above the exact solver limit of {max}")]
    TooManyNodes { nodes: usize, max: usize },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, AlgoError>;
