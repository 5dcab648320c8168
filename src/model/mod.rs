//! Gradient/loss models
//!
//! Linear models work directly on feature-space weights. Kernel models keep
//! dual coefficients over training samples (or a growing dictionary of
//! landmark points) and are therefore non-parametric.

pub mod kernel_logistic;
pub mod linear;
pub mod stochastic;

pub use self::kernel_logistic::*;
pub use self::linear::*;
pub use self::stochastic::*;
