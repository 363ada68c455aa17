//! Error types for foundation-type validation.

use thiserror::Error;

/// Errors that can occur when constructing foundation types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The artifact name is invalid.
    #[error("invalid artifact name: {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

/// Convenience type alias for foundation-type operations.
pub type Result<T> = std::result::Result<T, TypeError>;
