//! Kernel trait definition

use crate::core::{Matrix, Result, RgramError, Vector};
use crate::kernel::gram;
use nalgebra::DVectorView;

/// Kernel function trait
///
/// A kernel maps two vectors of equal dimension to a real similarity score.
/// Inputs are column views so that columns of a data matrix can be evaluated
/// without copying.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y) without checking dimensions
    ///
    /// # Panics
    /// May panic if `x` and `y` have different lengths
    fn compute(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64;

    /// Compute kernel value K(x, y), failing if the dimensions differ
    fn evaluate(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> Result<f64> {
        if x.len() != y.len() {
            return Err(RgramError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        Ok(self.compute(x, y))
    }

    /// Evaluate the kernel on two owned vectors
    fn evaluate_vectors(&self, x: &Vector, y: &Vector) -> Result<f64> {
        self.evaluate(x.column(0), y.column(0))
    }

    /// Gram matrix K(X, Y) between the columns of `x` and `y`
    fn gram_matrix(&self, x: &Matrix, y: &Matrix) -> Result<Matrix> {
        gram::gram_matrix(self, x, y)
    }

    /// Gram matrix with a small stability term added, see [`gram::stabilize`]
    fn gram_matrix_stable(&self, x: &Matrix, y: &Matrix) -> Result<Matrix> {
        gram::gram_matrix_stable(self, x, y)
    }

    /// Kernel values between `x` and every column of `y`
    fn kernel_row(&self, x: DVectorView<'_, f64>, y: &Matrix) -> Result<Vector> {
        gram::kernel_row(self, x, y)
    }
}
