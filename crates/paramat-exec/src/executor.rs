//! High-level executor bundling a pool with tuning hints.

use crate::hints::ExecHints;
use crate::ops;
use crate::pool::{PoolStats, WorkerPool};
use paramat_core::{Matrix, Result};

/// A CPU executor: a [`WorkerPool`] plus the [`ExecHints`] applied to every
/// operation run through it.
///
/// Most callers construct one executor per program (or per tuning profile)
/// and reuse it for all operations. The underlying pool threads are joined
/// when the executor is dropped.
///
/// # Examples
///
/// ```
/// use paramat_core::Matrix;
/// use paramat_exec::CpuExecutor;
///
/// let exec = CpuExecutor::with_threads(2);
/// let a = Matrix::from_elem(2, 2, 5.0).unwrap();
/// let b = Matrix::from_elem(2, 2, 10.0).unwrap();
///
/// let product = exec.multiply(&a, &b).unwrap();
/// assert_eq!(product.get(0, 0).unwrap(), 100.0);
/// ```
pub struct CpuExecutor {
    pool: WorkerPool,
    hints: ExecHints,
}

impl CpuExecutor {
    /// Create an executor with one worker per available CPU and default
    /// hints.
    pub fn new() -> Self {
        Self {
            pool: WorkerPool::with_default_threads(),
            hints: ExecHints::default(),
        }
    }

    /// Create an executor with an explicit worker count.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            pool: WorkerPool::new(threads),
            hints: ExecHints::default(),
        }
    }

    /// Replace the tuning hints.
    pub fn with_hints(mut self, hints: ExecHints) -> Self {
        self.hints = hints;
        self
    }

    /// The hints applied to every operation.
    pub fn hints(&self) -> &ExecHints {
        &self.hints
    }

    /// Number of worker threads backing this executor.
    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    /// Activity counters of the underlying pool.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Elementwise sum. See [`ops::add`].
    pub fn add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::add(&self.pool, &self.hints, a, b)
    }

    /// Elementwise difference. See [`ops::subtract`].
    pub fn subtract(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::subtract(&self.pool, &self.hints, a, b)
    }

    /// Elementwise product. See [`ops::elementwise_multiply`].
    pub fn elementwise_multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::elementwise_multiply(&self.pool, &self.hints, a, b)
    }

    /// Scalar product. See [`ops::scalar_multiply`].
    pub fn scalar_multiply(&self, a: &Matrix, scalar: f64) -> Result<Matrix> {
        ops::scalar_multiply(&self.pool, &self.hints, a, scalar)
    }

    /// Matrix product. See [`ops::multiply`].
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ops::multiply(&self.pool, &self.hints, a, b)
    }

    /// Transpose. See [`ops::transpose`].
    pub fn transpose(&self, a: &Matrix) -> Result<Matrix> {
        ops::transpose(&self.pool, &self.hints, a)
    }
}

impl Default for CpuExecutor {
    fn default() -> Self {
        Self::new()
    }
}
