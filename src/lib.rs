//! Kernel Gram matrices and kernelized logistic regression
//!
//! Kernels evaluate pairwise similarities between the columns of `d × n`
//! data matrices; models turn them into losses and gradients for an
//! iterative optimizer.

pub mod cache;
pub mod core;
pub mod kernel;
pub mod model;
pub mod optimizer;
pub mod persistence;

// Re-export main types for convenience
pub use crate::cache::{CacheState, CacheStats, GramCache};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, RgramError};
pub use crate::kernel::{GaussianKernel, Kernel, KernelKind, LinearKernel, PolynomialKernel};
pub use crate::model::{
    BinaryLogisticRegression, KernelLogisticRegression, LinearLeastSquares,
    StochasticKernelLogisticRegression,
};
pub use crate::optimizer::GradientDescent;
pub use crate::persistence::ModelSnapshot;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
