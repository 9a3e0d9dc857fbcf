//! Setup-time error types.

use thiserror::Error;

/// Everything that can go wrong while building a cradle.
///
/// Ticking never fails; all validation happens when bodies, configs and
/// layouts are constructed.
#[derive(Debug, Error)]
pub enum CradleError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("fulcrum length must be positive and finite, got {0}")]
    InvalidLength(f64),

    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("a cradle needs at least one body")]
    EmptyCradle,

    #[error("bodies {} and {} overlap at rest", .index, .index + 1)]
    OverlapAtRest { index: usize },

    #[error("launch index {index} is out of range for {body_count} bodies")]
    LaunchOutOfRange { index: usize, body_count: usize },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CradleError>;
