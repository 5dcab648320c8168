//! Runtime-selectable kernel
//!
//! [`KernelKind`] is the closed set of supported kernels. It is what
//! configuration files and model snapshots store; code that knows its kernel
//! at compile time can use the concrete types directly.

use crate::kernel::{GaussianKernel, Kernel, LinearKernel, PolynomialKernel};
use nalgebra::DVectorView;
use serde::{Deserialize, Serialize};

/// One of the supported kernels with its hyperparameters
///
/// Serialized with an internal `type` tag:
///
/// ```
/// use rgram::kernel::KernelKind;
///
/// let kernel: KernelKind = serde_json::from_str(r#"{"type":"gaussian","s":2.0}"#).unwrap();
/// assert_eq!(kernel.name(), "gaussian");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelKind {
    Linear(LinearKernel),
    Polynomial(PolynomialKernel),
    Gaussian(GaussianKernel),
}

impl KernelKind {
    /// Kernel type identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Polynomial(_) => "polynomial",
            Self::Gaussian(_) => "gaussian",
        }
    }
}

impl Default for KernelKind {
    fn default() -> Self {
        Self::Gaussian(GaussianKernel::default())
    }
}

impl Kernel for KernelKind {
    fn compute(&self, x: DVectorView<'_, f64>, y: DVectorView<'_, f64>) -> f64 {
        match self {
            Self::Linear(k) => k.compute(x, y),
            Self::Polynomial(k) => k.compute(x, y),
            Self::Gaussian(k) => k.compute(x, y),
        }
    }
}

impl From<LinearKernel> for KernelKind {
    fn from(kernel: LinearKernel) -> Self {
        Self::Linear(kernel)
    }
}

impl From<PolynomialKernel> for KernelKind {
    fn from(kernel: PolynomialKernel) -> Self {
        Self::Polynomial(kernel)
    }
}

impl From<GaussianKernel> for KernelKind {
    fn from(kernel: GaussianKernel) -> Self {
        Self::Gaussian(kernel)
    }
}
