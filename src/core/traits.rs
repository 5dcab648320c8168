//! Core traits for gradient-based models

use crate::core::{Matrix, Result, Vector};

/// A model that exposes a loss and its gradient to an external optimizer
///
/// `data` is a `d × n` matrix with one sample per column and `labels` holds
/// one target per column. Implementations do not validate that `weights`,
/// `data` and `labels` agree in shape; inconsistent shapes make the
/// underlying matrix products panic.
pub trait Model: Send + Sync {
    /// Gradient of the loss with respect to `weights`
    fn gradient(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<Vector>;

    /// Scalar loss at `weights`
    fn loss(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<f64>;

    /// Whether `weights` live in feature space.
    ///
    /// Parametric models are updated additively in raw feature coordinates.
    /// Non-parametric models keep dual coefficients over training samples or
    /// a growing dictionary, so the weight vector may grow between steps.
    fn parametric(&self) -> bool;
}
