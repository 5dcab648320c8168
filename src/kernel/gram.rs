//! Gram matrix evaluation
//!
//! For a `d × M` matrix X and a `d × N` matrix Y the Gram matrix K(X, Y) is
//! the `M × N` matrix whose (i, j) entry is k(x_i, y_j), where x_i and y_j
//! are the i-th and j-th columns. Cells are independent, so they are
//! evaluated in parallel.

use crate::core::{Matrix, Result, RgramError, Vector};
use crate::kernel::Kernel;
use log::{debug, trace};
use nalgebra::DVectorView;
use rayon::prelude::*;

/// Term added by [`gram_matrix_stable`] to keep Gram matrices invertible
pub const GRAM_STABILITY: f64 = 1e-3;

/// Compute the Gram matrix K(X, Y)
///
/// Fails with [`RgramError::InvalidArgument`] if the row counts differ.
pub fn gram_matrix<K: Kernel + ?Sized>(kernel: &K, x: &Matrix, y: &Matrix) -> Result<Matrix> {
    check_rows(x, y)?;

    let m = x.ncols();
    let n = y.ncols();
    debug!("Computing {m}x{n} Gram matrix over {} dimensions", x.nrows());

    // Column-major output: entry (i, j) lives at j * m + i
    let entries: Vec<f64> = (0..n)
        .into_par_iter()
        .flat_map_iter(|j| {
            let y_j = y.column(j);
            (0..m).map(move |i| kernel.compute(x.column(i), y_j))
        })
        .collect();

    Ok(Matrix::from_vec(m, n, entries))
}

/// Compute the Gram matrix K(X, Y) and add [`GRAM_STABILITY`] to it
///
/// See [`stabilize`] for where the term is added.
pub fn gram_matrix_stable<K: Kernel + ?Sized>(
    kernel: &K,
    x: &Matrix,
    y: &Matrix,
) -> Result<Matrix> {
    let result = gram_matrix(kernel, x, y)?;
    Ok(stabilize(result, GRAM_STABILITY))
}

/// Add `stability` to a Gram matrix depending on its shape
///
/// - 1×1 matrix equal to exactly 1: the entry is increased.
/// - M×N with M > 1 and N > 1: `stability` is added to the main diagonal
///   (the M×N identity pattern, so only min(M, N) entries for rectangular
///   matrices).
/// - Row or column vector whose last entry is exactly 1: that entry is
///   increased.
/// - Anything else is returned unchanged.
///
/// The "exactly 1" checks identify self-similarity entries of kernels with
/// k(x, x) = 1. A non-self Gram matrix can hit them by coincidence, and a
/// vector whose last entry is not 1 is never stabilized.
pub fn stabilize(mut result: Matrix, stability: f64) -> Matrix {
    let (rows, cols) = result.shape();

    if result.len() == 1 && result[(0, 0)] == 1.0 {
        result[(0, 0)] += stability;
    } else if rows > 1 && cols > 1 {
        for k in 0..rows.min(cols) {
            result[(k, k)] += stability;
        }
    } else if (rows == 1 || cols == 1) && !result.is_empty() && result[result.len() - 1] == 1.0 {
        let last = result.len() - 1;
        result[last] += stability;
    } else {
        trace!("Gram matrix of shape {rows}x{cols} left unstabilized");
    }

    result
}

/// Kernel values between `x` and each column of `y`
///
/// Fails with [`RgramError::DimensionMismatch`] if `x` does not have as many
/// entries as `y` has rows.
pub fn kernel_row<K: Kernel + ?Sized>(
    kernel: &K,
    x: DVectorView<'_, f64>,
    y: &Matrix,
) -> Result<Vector> {
    if x.len() != y.nrows() {
        return Err(RgramError::DimensionMismatch {
            expected: y.nrows(),
            actual: x.len(),
        });
    }

    Ok(Vector::from_iterator(
        y.ncols(),
        y.column_iter().map(|y_j| kernel.compute(x, y_j)),
    ))
}

fn check_rows(x: &Matrix, y: &Matrix) -> Result<()> {
    if x.nrows() != y.nrows() {
        return Err(RgramError::InvalidArgument(format!(
            "to compute a Gram matrix both input matrices must have the same number of rows \
             (got {} and {})",
            x.nrows(),
            y.nrows()
        )));
    }
    Ok(())
}
