//! Error types for multidimensional Hermite computations

use thiserror::Error;

/// Result type for Hermite operations
pub type Result<T> = std::result::Result<T, HermiteError>;

/// Errors that can occur while computing Hermite tensors or their gradients
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HermiteError {
    /// Matrix is not square, or matrix, vector and cutoff disagree on the number of modes
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Input failed a numeric sanity check (NaN, symmetry, zero cutoff, ...)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Caller broke a contract of the low-level engine
    #[error("Precondition violated: {message}")]
    PreconditionViolation { message: String },
}

impl HermiteError {
    pub(crate) fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            message: message.into(),
        }
    }
}
