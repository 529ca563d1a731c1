//! Error types for the projection engine.

use thiserror::Error;

/// Result type alias using ProjectionError.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors raised while building or applying a projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    // === Configuration Errors ===
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("Unsupported transformation from {source_crs} to {target_crs}")]
    UnsupportedTransformation {
        source_crs: String,
        target_crs: String,
    },

    // === Domain Errors ===
    #[error("Coordinate ({x}, {y}) is outside the domain of {crs}")]
    OutOfDomain { crs: String, x: f64, y: f64 },
}

impl ProjectionError {
    pub(crate) fn invalid(param: &str, message: impl Into<String>) -> Self {
        ProjectionError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }

    /// True for errors caused by a coordinate rather than by the CRS setup.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, ProjectionError::OutOfDomain { .. })
    }
}
