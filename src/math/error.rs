// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotspotError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid point #{id}: {reason}")]
    InvalidPoint { id: i64, reason: String },

    #[error("Too many points: limit is {limit}, got {actual}")]
    TooManyPoints { limit: usize, actual: usize },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },

    #[error("Failed to parse map records: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write SVG: {0}")]
    Svg(#[from] std::io::Error),
}

pub type HotspotResult<T> = Result<T, HotspotError>;
