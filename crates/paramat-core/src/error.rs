//! Unified error types for matrix construction and operations.
//!
//! This module provides the error taxonomy shared by every ParaMat crate:
//!
//! - **Construction errors**: non-positive dimensions
//! - **Access errors**: out-of-bounds element reads/writes
//! - **Operation errors**: shape incompatibility between operands
//! - **Execution errors**: failures raised inside worker tasks
//!
//! # Examples
//!
//! ```
//! use paramat_core::{Matrix, MatrixError};
//!
//! let err = Matrix::new(0, 3).unwrap_err();
//! assert!(matches!(err, MatrixError::InvalidDimension { .. }));
//! ```

use thiserror::Error;

/// Top-level error type for all matrix operations.
///
/// Shape and bounds errors are detected before any parallel work is
/// dispatched; [`MatrixError::WorkerFailure`] is the only variant that can
/// originate on a worker thread.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// A matrix was constructed with a zero row or column count.
    #[error("invalid matrix dimensions: {rows}x{cols} (both must be positive)")]
    InvalidDimension { rows: usize, cols: usize },

    /// An element access fell outside the matrix bounds.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {op}: left is {}x{}, right is {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        /// Name of the operation that rejected the operands.
        op: &'static str,
        /// Shape of the left operand as (rows, cols).
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols).
        right: (usize, usize),
    },

    /// A parallel worker task failed; wraps the first observed failure.
    #[error("worker task failed: {reason}")]
    WorkerFailure { reason: String },
}

/// Result type alias used throughout the ParaMat crates.
pub type Result<T> = std::result::Result<T, MatrixError>;

// Convenience constructors for common error patterns.
impl MatrixError {
    /// Create an out-of-range error for an access into a `rows` x `cols` matrix.
    pub fn index_out_of_range(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        MatrixError::IndexOutOfRange {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Create a dimension mismatch error carrying both operand shapes.
    pub fn dimension_mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        MatrixError::DimensionMismatch { op, left, right }
    }

    /// Create a worker failure with a message.
    pub fn worker(reason: impl Into<String>) -> Self {
        MatrixError::WorkerFailure {
            reason: reason.into(),
        }
    }
}
