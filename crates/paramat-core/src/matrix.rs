//! Dense matrix storage with bounds-checked access.
//!
//! This module provides the core [`Matrix`] type: a fixed-shape 2D array of
//! `f64` values backed by a single contiguous row-major buffer.
//!
//! # Memory Layout
//!
//! Element (i, j) lives at index `i * cols + j`. Row-major layout keeps each
//! output row contiguous, which is what makes row-partitioned parallel
//! execution cache-friendly in `paramat-exec`.
//!
//! # Mutability
//!
//! Dimensions are fixed at construction. The buffer is mutated only through
//! [`Matrix::set`], [`Matrix::fill`], and the row accessors; every algebraic
//! operation produces a new `Matrix` and leaves its operands untouched.

use crate::error::{MatrixError, Result};
use std::fmt;

/// A dense 2D matrix of `f64` values in row-major order.
///
/// # Examples
///
/// ```
/// use paramat_core::Matrix;
///
/// let mut m = Matrix::new(2, 3)?;
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2)?, 0.0);
///
/// m.fill(5.0);
/// assert_eq!(m.get(0, 0)?, 5.0);
/// # Ok::<(), paramat_core::MatrixError>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimension`] if either count is zero or
    /// `rows * cols` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramat_core::Matrix;
    ///
    /// let m = Matrix::new(3, 4)?;
    /// assert_eq!(m.len(), 12);
    ///
    /// assert!(Matrix::new(0, 4).is_err());
    /// # Ok::<(), paramat_core::MatrixError>(())
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// Create a matrix with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimension`] if either count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramat_core::Matrix;
    ///
    /// let m = Matrix::from_elem(2, 2, 5.0)?;
    /// assert_eq!(m.get(1, 1)?, 5.0);
    /// # Ok::<(), paramat_core::MatrixError>(())
    /// ```
    pub fn from_elem(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let mut m = Self::new(rows, cols)?;
        m.fill(value);
        Ok(m)
    }

    /// Create a matrix from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimension`] if either count is zero,
    /// `rows * cols` overflows `usize`, or `data.len() != rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramat_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0])?;
    /// assert_eq!(m.get(1, 0)?, 3.0);
    /// # Ok::<(), paramat_core::MatrixError>(())
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        Ok(Self { rows, cols, data })
    }

    /// Element count for a `rows` x `cols` matrix, rejecting zero dimensions
    /// and counts whose product overflows `usize`.
    fn checked_len(rows: usize, cols: usize) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        rows.checked_mul(cols)
            .ok_or(MatrixError::InvalidDimension { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as a `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: both dimensions are positive by construction.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the value at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if either index is out of
    /// bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_bounds(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Write `value` at (`row`, `col`). No other cell is affected.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if either index is out of
    /// bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_bounds(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major buffer.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Borrow row `i` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`. Use [`Matrix::get`] for fallible access.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Mutably borrow row `i` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::index_out_of_range(
                row, col, self.rows, self.cols,
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.data)
            .finish()
    }
}

impl fmt::Display for Matrix {
    /// Render rows on separate lines, values space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for (j, value) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
