//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (a * <x, y> + c)^d
//!
//! Where:
//! - a: scaling factor for the dot product
//! - c: independent term in the polynomial
//! - d: degree of the polynomial (real valued)
//!
//! The degree is applied with `powf`. A negative base raised to a
//! fractional degree yields NaN; this is not guarded and propagates to
//! downstream computations.

use crate::kernel::Kernel;
use nalgebra::DVectorView;
use serde::{Deserialize, Serialize};

/// Polynomial kernel with configurable scale, bias and degree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product
    pub a: f64,
    /// Independent term in the polynomial
    pub c: f64,
    /// Degree of the polynomial
    pub d: f64,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel
    ///
    /// # Arguments
    /// * `a` - Scaling factor for the dot product
    /// * `c` - Independent term in the polynomial
    /// * `d` - Degree of the polynomial
    ///
    /// # Examples
    /// ```
    /// use rgram::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(1.0, 1.0, 2.0);
    /// assert_eq!(quad_kernel.d, 2.0);
    /// ```
    pub fn new(a: f64, c: f64, d: f64) -> Self {
        Self { a, c, d }
    }

    /// Creates a quadratic kernel: (a * <x,y> + 1)²
    pub fn quadratic(a: f64) -> Self {
        Self::new(a, 1.0, 2.0)
    }

    /// Creates a cubic kernel: (a * <x,y> + 1)³
    pub fn cubic(a: f64) -> Self {
        Self::new(a, 1.0, 3.0)
    }
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self::quadratic(1.0)
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64 {
        let base = self.a * x.dot(&y) + self.c;
        base.powf(self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vector;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_kernel_creation() {
        let kernel = PolynomialKernel::new(0.5, 1.0, 3.0);
        assert_eq!(kernel.a, 0.5);
        assert_eq!(kernel.c, 1.0);
        assert_eq!(kernel.d, 3.0);

        let quad = PolynomialKernel::quadratic(2.0);
        assert_eq!(quad.d, 2.0);
        assert_eq!(quad.c, 1.0);

        let cubic = PolynomialKernel::cubic(0.5);
        assert_eq!(cubic.d, 3.0);
        assert_eq!(cubic.a, 0.5);
    }

    #[test]
    fn test_polynomial_kernel_computation() {
        let kernel = PolynomialKernel::new(1.0, 1.0, 2.0);

        let x = Vector::from_vec(vec![1.0, 2.0]);
        let y = Vector::from_vec(vec![2.0, 1.0]);

        // Dot product: 1*2 + 2*1 = 4
        // Kernel: (1.0 * 4 + 1.0)² = 25
        let result = kernel.evaluate_vectors(&x, &y).unwrap();
        assert_relative_eq!(result, 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_same_vector() {
        let kernel = PolynomialKernel::new(0.5, 2.0, 3.0);
        let x = Vector::from_vec(vec![3.0, 4.0]);

        // (0.5 * 25 + 2.0)³ = 14.5³
        let result = kernel.evaluate_vectors(&x, &x).unwrap();
        assert_relative_eq!(result, 3048.625, epsilon = 1e-6);
    }

    #[test]
    fn test_polynomial_kernel_fractional_degree() {
        let kernel = PolynomialKernel::new(1.0, 0.0, 0.5);
        let x = Vector::from_vec(vec![2.0, 0.0]);
        let y = Vector::from_vec(vec![8.0, 3.0]);

        // sqrt(16) = 4
        assert_relative_eq!(kernel.evaluate_vectors(&x, &y).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polynomial_kernel_negative_base_fractional_degree() {
        let kernel = PolynomialKernel::new(1.0, 0.0, 0.5);
        let x = Vector::from_vec(vec![1.0]);
        let y = Vector::from_vec(vec![-1.0]);

        // Not guarded: sqrt(-1) is NaN
        assert!(kernel.evaluate_vectors(&x, &y).unwrap().is_nan());
    }

    #[test]
    fn test_polynomial_kernel_negative_base_integer_degree() {
        let kernel = PolynomialKernel::new(1.0, 0.0, 3.0);
        let x = Vector::from_vec(vec![2.0]);
        let y = Vector::from_vec(vec![-1.0]);

        assert_relative_eq!(kernel.evaluate_vectors(&x, &y).unwrap(), -8.0, epsilon = 1e-12);
    }
}
