//! Parallel matrix operation kernels.
//!
//! Every operation follows the same shape: validate operand dimensions
//! eagerly on the calling thread, allocate the output, then either fill it
//! inline (small outputs) or dispatch row ranges to the [`WorkerPool`]. The
//! parallel domain is always the set of output rows, so each task owns a
//! disjoint slice of the output buffer and writes race-free without locks.
//!
//! Operands are only ever read; no operation mutates its inputs.
//!
//! # Examples
//!
//! ```
//! use paramat_core::Matrix;
//! use paramat_exec::{ops, ExecHints, WorkerPool};
//!
//! let pool = WorkerPool::new(2);
//! let hints = ExecHints::default();
//!
//! let a = Matrix::from_elem(2, 3, 1.0).unwrap();
//! let b = Matrix::from_elem(2, 3, 2.0).unwrap();
//!
//! let sum = ops::add(&pool, &hints, &a, &b).unwrap();
//! assert_eq!(sum.get(1, 2).unwrap(), 3.0);
//! ```

use crate::hints::ExecHints;
use crate::pool::WorkerPool;
use paramat_core::{Matrix, MatrixError, Result};
use std::ops::Range;

/// Raw pointer to an output buffer, shareable across worker tasks.
///
/// Tasks carve out non-overlapping row slices, so shared access is sound as
/// long as callers hand each task a disjoint index range.
struct SendMutPtr {
    ptr: *mut f64,
    len: usize,
}

unsafe impl Send for SendMutPtr {}
unsafe impl Sync for SendMutPtr {}

impl SendMutPtr {
    fn new(slice: &mut [f64]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
        }
    }

    /// # Safety
    ///
    /// `range` must lie within the buffer and must not overlap any range
    /// handed to a concurrently running task.
    unsafe fn slice(&self, range: Range<usize>) -> &mut [f64] {
        debug_assert!(range.end <= self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(range.start), range.end - range.start)
    }
}

/// Run `row_fn` over every row of `out`, inline or on the pool.
///
/// The row function receives the row index and a mutable view of that output
/// row. Outputs below the hint threshold stay on the calling thread.
fn for_each_row<F>(pool: &WorkerPool, hints: &ExecHints, out: &mut Matrix, row_fn: F) -> Result<()>
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    let rows = out.rows();
    let cols = out.cols();

    if out.len() < hints.sequential_threshold {
        for i in 0..rows {
            row_fn(i, out.row_mut(i));
        }
        return Ok(());
    }

    let out_ptr = SendMutPtr::new(out.as_mut_slice());
    pool.dispatch(rows, |range| {
        for i in range {
            // Safety: dispatch ranges are pairwise disjoint, so this task is
            // the only one touching rows `range` of the output.
            let row = unsafe { out_ptr.slice(i * cols..(i + 1) * cols) };
            row_fn(i, row);
        }
        Ok(())
    })
}

fn ensure_same_shape(op: &'static str, a: &Matrix, b: &Matrix) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(MatrixError::dimension_mismatch(op, a.shape(), b.shape()));
    }
    Ok(())
}

/// Elementwise sum `a + b`. Operands must share a shape.
pub fn add(pool: &WorkerPool, hints: &ExecHints, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    ensure_same_shape("add", a, b)?;
    binary_elementwise(pool, hints, a, b, |x, y| x + y)
}

/// Elementwise difference `a - b`. Operands must share a shape.
pub fn subtract(pool: &WorkerPool, hints: &ExecHints, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    ensure_same_shape("subtract", a, b)?;
    binary_elementwise(pool, hints, a, b, |x, y| x - y)
}

/// Elementwise (Hadamard) product `a ∘ b`. Operands must share a shape.
pub fn elementwise_multiply(
    pool: &WorkerPool,
    hints: &ExecHints,
    a: &Matrix,
    b: &Matrix,
) -> Result<Matrix> {
    ensure_same_shape("elementwise_multiply", a, b)?;
    binary_elementwise(pool, hints, a, b, |x, y| x * y)
}

fn binary_elementwise<F>(
    pool: &WorkerPool,
    hints: &ExecHints,
    a: &Matrix,
    b: &Matrix,
    combine: F,
) -> Result<Matrix>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    let mut out = Matrix::new(a.rows(), a.cols())?;
    let lhs = a.as_slice();
    let rhs = b.as_slice();
    let cols = a.cols();

    for_each_row(pool, hints, &mut out, |i, row| {
        let base = i * cols;
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = combine(lhs[base + j], rhs[base + j]);
        }
    })?;
    Ok(out)
}

/// Scale every element of `a` by `scalar`.
pub fn scalar_multiply(
    pool: &WorkerPool,
    hints: &ExecHints,
    a: &Matrix,
    scalar: f64,
) -> Result<Matrix> {
    let mut out = Matrix::new(a.rows(), a.cols())?;
    let src = a.as_slice();
    let cols = a.cols();

    for_each_row(pool, hints, &mut out, |i, row| {
        let base = i * cols;
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = src[base + j] * scalar;
        }
    })?;
    Ok(out)
}

/// Matrix product `a × b`. Requires `a.cols() == b.rows()`.
///
/// Uses the straightforward inner-product kernel; each worker computes a
/// band of output rows.
pub fn multiply(pool: &WorkerPool, hints: &ExecHints, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(MatrixError::dimension_mismatch(
            "multiply",
            a.shape(),
            b.shape(),
        ));
    }
    let inner = a.cols();
    let n = b.cols();
    let mut out = Matrix::new(a.rows(), n)?;
    let lhs = a.as_slice();
    let rhs = b.as_slice();

    for_each_row(pool, hints, &mut out, |i, row| {
        let a_row = &lhs[i * inner..(i + 1) * inner];
        for (j, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, &aik) in a_row.iter().enumerate() {
                sum += aik * rhs[k * n + j];
            }
            *cell = sum;
        }
    })?;
    Ok(out)
}

/// Transpose of `a`: output cell `(i, j)` is input cell `(j, i)`.
pub fn transpose(pool: &WorkerPool, hints: &ExecHints, a: &Matrix) -> Result<Matrix> {
    let (a_rows, a_cols) = a.shape();
    let mut out = Matrix::new(a_cols, a_rows)?;
    let src = a.as_slice();

    for_each_row(pool, hints, &mut out, |i, row| {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = src[j * a_cols + i];
        }
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_hints() -> ExecHints {
        // Threshold zero forces the pool path even for 1x1 outputs.
        ExecHints::new().with_sequential_threshold(0)
    }

    fn counting_matrix(rows: usize, cols: usize) -> Matrix {
        Matrix::from_vec(rows, cols, (0..rows * cols).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_add_elementwise() {
        let pool = WorkerPool::new(2);
        let a = counting_matrix(3, 4);
        let b = Matrix::from_elem(3, 4, 10.0).unwrap();

        for hints in [ExecHints::default(), tiny_hints()] {
            let sum = add(&pool, &hints, &a, &b).unwrap();
            for i in 0..3 {
                for j in 0..4 {
                    assert_eq!(sum.get(i, j).unwrap(), (i * 4 + j) as f64 + 10.0);
                }
            }
        }
    }

    #[test]
    fn test_subtract_elementwise() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        let a = Matrix::from_elem(2, 2, 5.0).unwrap();
        let b = Matrix::from_elem(2, 2, 10.0).unwrap();

        let diff = subtract(&pool, &hints, &a, &b).unwrap();
        assert!(diff.as_slice().iter().all(|&v| v == -5.0));
    }

    #[test]
    fn test_elementwise_multiply() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        let a = counting_matrix(2, 3);
        let b = Matrix::from_elem(2, 3, 2.0).unwrap();

        let prod = elementwise_multiply(&pool, &hints, &a, &b).unwrap();
        for (idx, &v) in prod.as_slice().iter().enumerate() {
            assert_eq!(v, idx as f64 * 2.0);
        }
    }

    #[test]
    fn test_scalar_multiply() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        let a = counting_matrix(3, 3);

        let scaled = scalar_multiply(&pool, &hints, &a, -1.5).unwrap();
        for (idx, &v) in scaled.as_slice().iter().enumerate() {
            assert_eq!(v, idx as f64 * -1.5);
        }
    }

    #[test]
    fn test_multiply_known_product() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        // [1 2; 3 4] x [5 6; 7 8] = [19 22; 43 50]
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();

        let prod = multiply(&pool, &hints, &a, &b).unwrap();
        assert_eq!(prod.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_multiply_rectangular_shapes() {
        let pool = WorkerPool::new(3);
        let hints = tiny_hints();
        let a = Matrix::from_elem(4, 2, 1.0).unwrap();
        let b = Matrix::from_elem(2, 5, 1.0).unwrap();

        let prod = multiply(&pool, &hints, &a, &b).unwrap();
        assert_eq!(prod.shape(), (4, 5));
        assert!(prod.as_slice().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_transpose() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        let a = counting_matrix(2, 3);

        let t = transpose(&pool, &hints, &a).unwrap();
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.get(j, i).unwrap(), a.get(i, j).unwrap());
            }
        }
    }

    #[test]
    fn test_add_shape_mismatch() {
        let pool = WorkerPool::new(2);
        let hints = ExecHints::default();
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(3, 2).unwrap();

        let err = add(&pool, &hints, &a, &b).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                op: "add",
                left: (2, 3),
                right: (3, 2),
            }
        );
        // Validation failed before any work was scheduled.
        assert_eq!(pool.stats().dispatches, 0);
    }

    #[test]
    fn test_multiply_inner_dimension_mismatch() {
        let pool = WorkerPool::new(2);
        let hints = ExecHints::default();
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(4, 2).unwrap();

        let err = multiply(&pool, &hints, &a, &b).unwrap_err();
        assert!(matches!(err, MatrixError::DimensionMismatch { op: "multiply", .. }));
    }

    #[test]
    fn test_operands_are_unchanged() {
        let pool = WorkerPool::new(2);
        let hints = tiny_hints();
        let a = counting_matrix(3, 3);
        let b = counting_matrix(3, 3);
        let (a_before, b_before) = (a.clone(), b.clone());

        add(&pool, &hints, &a, &b).unwrap();
        multiply(&pool, &hints, &a, &b).unwrap();

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pool = WorkerPool::new(4);
        let sequential = ExecHints::new().with_sequential_threshold(usize::MAX);
        let parallel = tiny_hints();
        let a = counting_matrix(17, 13);
        let b = counting_matrix(13, 9);

        let seq = multiply(&pool, &sequential, &a, &b).unwrap();
        let par = multiply(&pool, &parallel, &a, &b).unwrap();
        assert_eq!(seq, par);
    }
}
