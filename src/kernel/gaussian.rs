//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-||x - y||² / (2s²))
//! where s is the bandwidth.

use crate::kernel::Kernel;
use nalgebra::DVectorView;
use serde::{Deserialize, Serialize};

/// Gaussian kernel: K(x, y) = exp(-||x - y||² / (2s²))
///
/// The bandwidth `s` controls the reach of each sample:
/// - Small s: only close points are similar (potential overfitting)
/// - Large s: distant points remain similar (potential underfitting)
///
/// `s = 0` is not rejected. It divides by zero, giving NaN for identical
/// points and 0 for distinct ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianKernel {
    /// Bandwidth
    pub s: f64,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with bandwidth `s`
    pub fn new(s: f64) -> Self {
        Self { s }
    }

    /// Gaussian kernel with unit bandwidth
    pub fn unit() -> Self {
        Self::new(1.0)
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::unit()
    }
}

impl Kernel for GaussianKernel {
    fn compute(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64 {
        (-squared_distance(x, y) / (2.0 * self.s * self.s)).exp()
    }
}

/// Squared Euclidean distance ||x - y||²
fn squared_distance(x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vector;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_kernel_identical_vectors() {
        let x = Vector::from_vec(vec![1.0, 2.0, 3.0]);

        // K(x, x) is exactly 1 whatever the bandwidth
        for s in [0.1, 1.0, 7.5] {
            let kernel = GaussianKernel::new(s);
            assert_eq!(kernel.evaluate_vectors(&x, &x).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_gaussian_kernel_unit_bandwidth() {
        let kernel = GaussianKernel::new(1.0);
        let x = Vector::from_vec(vec![0.0, 0.0]);
        let y = Vector::from_vec(vec![1.0, 1.0]);

        // exp(-2 / 2) = exp(-1)
        let result = kernel.evaluate_vectors(&x, &y).unwrap();
        assert_relative_eq!(result, (-1.0_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(result, 0.3679, epsilon = 1e-4);
    }

    #[test]
    fn test_gaussian_kernel_bandwidth_ordering() {
        let x = Vector::from_vec(vec![1.0]);
        let y = Vector::from_vec(vec![3.0]);

        let narrow = GaussianKernel::new(0.5).evaluate_vectors(&x, &y).unwrap();
        let wide = GaussianKernel::new(5.0).evaluate_vectors(&x, &y).unwrap();

        // Wider bandwidth gives higher similarity
        assert!(wide > narrow);
        assert_relative_eq!(wide, (-4.0_f64 / 50.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_gaussian_kernel_monotone_in_distance() {
        let kernel = GaussianKernel::unit();
        let x = Vector::from_vec(vec![0.0]);

        let k1 = kernel.evaluate_vectors(&x, &Vector::from_vec(vec![1.0])).unwrap();
        let k2 = kernel.evaluate_vectors(&x, &Vector::from_vec(vec![2.0])).unwrap();
        let k3 = kernel.evaluate_vectors(&x, &Vector::from_vec(vec![3.0])).unwrap();

        assert!(k1 > k2);
        assert!(k2 > k3);
        assert!(k3 > 0.0 && k1 < 1.0);
    }

    #[test]
    fn test_gaussian_kernel_zero_bandwidth() {
        let kernel = GaussianKernel::new(0.0);
        let x = Vector::from_vec(vec![1.0]);
        let y = Vector::from_vec(vec![2.0]);

        // -1 / 0 = -inf, exp(-inf) = 0
        assert_eq!(kernel.evaluate_vectors(&x, &y).unwrap(), 0.0);
        // 0 / 0 = NaN
        assert!(kernel.evaluate_vectors(&x, &x).unwrap().is_nan());
    }

    #[test]
    fn test_squared_distance() {
        let x = Vector::from_vec(vec![1.0, 3.0, 0.0]);
        let y = Vector::from_vec(vec![0.0, 2.0, 2.0]);

        // 1 + 1 + 4
        assert_eq!(squared_distance(x.column(0), y.column(0)), 6.0);
        assert_eq!(squared_distance(x.column(0), x.column(0)), 0.0);
    }
}
