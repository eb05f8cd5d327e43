//! End-to-end tour of the matrix operations.
//!
//! Builds two constant 2x2 matrices and prints the result of every
//! operation. Run with:
//! ```bash
//! cargo run --example matrix_showcase
//! ```

use anyhow::Result;
use paramat::prelude::*;

fn main() -> Result<()> {
    let exec = CpuExecutor::new();
    println!("using {} worker threads\n", exec.threads());

    let a = Matrix::from_elem(2, 2, 5.0)?;
    let b = Matrix::from_elem(2, 2, 10.0)?;

    println!("matrix A:\n{a}");
    println!("matrix B:\n{b}");

    let product = exec.multiply(&a, &b)?;
    println!("A x B:\n{product}");

    let sum = exec.add(&a, &b)?;
    println!("A + B:\n{sum}");

    let difference = exec.subtract(&a, &b)?;
    println!("A - B:\n{difference}");

    let scaled = exec.scalar_multiply(&a, 2.0)?;
    println!("2 * A:\n{scaled}");

    let hadamard = exec.elementwise_multiply(&a, &b)?;
    println!("A .* B:\n{hadamard}");

    let transposed = exec.transpose(&a)?;
    println!("A^T:\n{transposed}");

    Ok(())
}
