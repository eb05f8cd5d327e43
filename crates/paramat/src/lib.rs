//! # ParaMat
//!
//! Parallel dense `f64` matrix operations backed by an explicit worker pool.
//!
//! ParaMat is split into focused crates, re-exported here:
//!
//! - `paramat-core`: the row-major [`Matrix`] store and error types
//! - `paramat-planner`: balanced [`plan`](planner::plan) partitioning of row
//!   domains
//! - `paramat-exec`: the [`WorkerPool`], operation kernels, and the
//!   [`CpuExecutor`] front door
//!
//! # Quick start
//!
//! ```
//! use paramat::prelude::*;
//!
//! let exec = CpuExecutor::with_threads(4);
//!
//! let a = Matrix::from_elem(2, 2, 5.0)?;
//! let b = Matrix::from_elem(2, 2, 10.0)?;
//!
//! let product = exec.multiply(&a, &b)?;
//! assert_eq!(product.get(0, 0)?, 100.0);
//!
//! let sum = exec.add(&a, &b)?;
//! assert_eq!(sum.get(1, 1)?, 15.0);
//! # Ok::<(), paramat::MatrixError>(())
//! ```
//!
//! # Design notes
//!
//! Operations never mutate their operands and allocate a fresh output. Work
//! is split over output rows, so worker threads write disjoint slices and
//! need no locking. Small outputs bypass the pool entirely; the cutover is
//! tunable via [`ExecHints`].

#![deny(warnings)]

pub use paramat_core as core;
pub use paramat_exec as exec;
pub use paramat_planner as planner;

pub use paramat_core::{Matrix, MatrixError, Result};
pub use paramat_exec::{CpuExecutor, ExecHints, PoolStats, WorkerPool};
pub use paramat_planner::{plan, Partition};

/// Commonly used items, for glob import.
pub mod prelude {
    pub use paramat_core::{Matrix, MatrixError, Result};
    pub use paramat_exec::{ops, CpuExecutor, ExecHints, WorkerPool};
}
