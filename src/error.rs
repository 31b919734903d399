// src/error.rs

use thiserror::Error;

/// Errors raised by the coverage engine and the scene loader.
///
/// Geometric anomalies (parallel lines, zero-length walls, zero distance) are
/// not errors; they degrade to "no intersection" or an origin-only polygon.
#[derive(Error, Debug)]
pub enum FovError {
    /// A coordinate or parameter was NaN or infinite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// A parameter is finite but outside the range the calculation accepts.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The scene document parsed but is not usable.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FovError>;
