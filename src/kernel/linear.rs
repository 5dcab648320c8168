//! Linear kernel implementation

use crate::kernel::Kernel;
use nalgebra::DVectorView;
use serde::{Deserialize, Serialize};

/// Linear kernel: K(x, y) = x^T * y + c
///
/// The bias `c` shifts every kernel value; with `c = 0` this is the plain
/// dot product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearKernel {
    /// Additive bias
    pub c: f64,
}

impl LinearKernel {
    /// Create a new linear kernel with bias `c`
    pub fn new(c: f64) -> Self {
        Self { c }
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64 {
        x.dot(&y) + self.c
    }
}
