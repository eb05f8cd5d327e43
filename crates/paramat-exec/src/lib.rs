//! # paramat-exec
//!
//! Parallel execution layer for ParaMat: a fixed-size [`WorkerPool`], the
//! row-parallel operation kernels in [`ops`], and the [`CpuExecutor`]
//! convenience wrapper that bundles a pool with [`ExecHints`].
//!
//! Operations validate dimensions eagerly, allocate their output up front,
//! and split the output rows across workers using `paramat-planner`. Small
//! outputs skip the pool entirely and run on the calling thread.
//!
//! # Examples
//!
//! ```
//! use paramat_core::Matrix;
//! use paramat_exec::CpuExecutor;
//!
//! let exec = CpuExecutor::with_threads(4);
//!
//! let a = Matrix::from_elem(64, 64, 2.0).unwrap();
//! let b = Matrix::from_elem(64, 64, 3.0).unwrap();
//!
//! let sum = exec.add(&a, &b).unwrap();
//! assert_eq!(sum.get(10, 10).unwrap(), 5.0);
//! ```

#![deny(warnings)]

pub mod executor;
pub mod hints;
pub mod ops;
pub mod pool;


pub use executor::CpuExecutor;
pub use hints::{ExecHints, DEFAULT_SEQUENTIAL_THRESHOLD};
pub use pool::{PoolStats, WorkerPool};
