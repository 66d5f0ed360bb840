//! Error types for the density explorer.

use thiserror::Error;

/// Errors raised by container configuration and selection changes.
///
/// Selection errors never reach the user: the controller leaves its state
/// untouched and the calling system logs them at debug level.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DensityError {
    #[error("invalid container configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{0} is already in the container")]
    DuplicateSelection(&'static str),

    #[error("container already holds the maximum of {max} liquids")]
    CapacityExceeded { max: usize },
}

/// Convenience alias for `Result<T, DensityError>`.
pub type Result<T> = std::result::Result<T, DensityError>;
