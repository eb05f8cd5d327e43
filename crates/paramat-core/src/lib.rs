//! # paramat-core
//!
//! Core dense matrix type and error taxonomy for ParaMat.
//!
//! This crate provides the foundational building blocks for the ParaMat
//! stack:
//!
//! - **Dense matrix storage** ([`Matrix`]) with a contiguous row-major
//!   `f64` buffer and bounds-checked access
//! - **Typed errors** ([`MatrixError`]) carrying the offending indices and
//!   shapes across the API boundary
//!
//! ## Memory Layout
//!
//! Matrices are stored row-major: element (i, j) at `i * cols + j`. Each row
//! is contiguous, which the execution crate relies on for row-partitioned
//! parallel work.
//!
//! ## Quick Start
//!
//! ```
//! use paramat_core::Matrix;
//!
//! let mut a = Matrix::new(2, 2)?;
//! a.fill(5.0);
//! assert_eq!(a.get(0, 1)?, 5.0);
//! # Ok::<(), paramat_core::MatrixError>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result`] with a [`MatrixError`] kind:
//!
//! ```
//! use paramat_core::{Matrix, MatrixError};
//!
//! let m = Matrix::new(2, 2).unwrap();
//! let err = m.get(9, 0).unwrap_err();
//! assert!(matches!(err, MatrixError::IndexOutOfRange { .. }));
//! ```
//!
//! ## Integration with Other Crates
//!
//! - **paramat-planner:** partitions the row domain of a `Matrix`
//! - **paramat-exec:** runs the algebraic operations over worker threads

#![deny(warnings)]

pub mod error;
pub mod matrix;


pub use error::{MatrixError, Result};
pub use matrix::Matrix;
