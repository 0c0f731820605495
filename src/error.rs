//! Error types for matriz operations

use thiserror::Error;

/// Result type for matriz operations
pub type Result<T> = std::result::Result<T, MatrizError>;

/// Errors that can occur during matriz operations
///
/// Every variant is an invalid-argument condition: the caller passed a
/// shape, dimension or parameter the operation cannot accept. Errors are
/// raised before any destination element is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrizError {
    /// Zero row or column count
    #[error("Matrix dimensions must be positive integers: got {rows}x{cols}")]
    InvalidDimensions {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },

    /// Destination or operand has the wrong shape
    #[error("Shape mismatch in {op}: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    ShapeMismatch {
        /// Operation that rejected the shape
        op: &'static str,
        /// Required (rows, cols)
        expected: (usize, usize),
        /// Supplied (rows, cols)
        actual: (usize, usize),
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MatrizError {
    /// Returns `true` for every variant
    ///
    /// All matriz errors belong to the invalid-argument category; this lets
    /// callers test for it without matching on the variant.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            MatrizError::InvalidDimensions { .. }
                | MatrizError::ShapeMismatch { .. }
                | MatrizError::InvalidInput(_)
        )
    }
}
