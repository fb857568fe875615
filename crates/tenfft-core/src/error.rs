//! Error types for the tensor and problem model

use thiserror::Error;

/// Errors raised by structural tensor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// A dimension index past the end of the tensor
    #[error("{operation}: dimension index {index} out of range for rank {rank}")]
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        rank: usize,
    },

    /// The operation needs a finite-rank tensor
    #[error("{operation}: tensor has non-finite rank")]
    NonFinite { operation: &'static str },
}

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    /// Create an index-out-of-range error
    pub fn index_out_of_range(operation: &'static str, index: usize, rank: usize) -> Self {
        TensorError::IndexOutOfRange {
            operation,
            index,
            rank,
        }
    }

    /// Create a non-finite rank error
    pub fn non_finite(operation: &'static str) -> Self {
        TensorError::NonFinite { operation }
    }
}
