//! Error types for fixture generation.

use projection::ProjectionError;
use thiserror::Error;

/// Result type alias using FixtureError.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum FixtureError {
    // === Configuration Errors ===
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    // === Generation Errors ===
    #[error("Failed to project sample (lon: {lon}, lat: {lat})")]
    Sample {
        lon: i32,
        lat: i32,
        #[source]
        source: ProjectionError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
