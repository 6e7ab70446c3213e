//! Error types for Phase Beam.
//!
//! The per-frame update never fails; these cover the edges where the host
//! feeds in configuration and surface geometry.

use thiserror::Error;

/// Top-level error type for Phase Beam operations.
#[derive(Debug, Error)]
pub enum PhaseBeamError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Surface geometry errors
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A value is outside its accepted range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Surface geometry errors.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// Width or height is zero, negative or not finite
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize {
        /// Surface width
        width: f32,
        /// Surface height
        height: f32,
    },
}

/// Result type alias for Phase Beam operations.
pub type PhaseBeamResult<T> = Result<T, PhaseBeamError>;
