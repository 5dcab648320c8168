//! Gradient-descent driver
//!
//! Minimal training loop that calls into a [`Model`] for gradients and
//! applies the update the model's `parametric` flag asks for. Full-batch
//! training suits the linear and kernel models; per-sample training suits
//! the stochastic kernel model, whose weight vector grows with every step.

use crate::core::{FitResult, Matrix, Model, OptimizerConfig, Result, RgramError, Vector};
use log::{debug, info};

/// Gradient descent with a fixed step size
pub struct GradientDescent {
    config: OptimizerConfig,
}

impl GradientDescent {
    /// Create a new driver with the given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Create a driver with default configuration and the given step size
    pub fn with_step_size(step_size: f64) -> Self {
        Self::new(OptimizerConfig {
            step_size,
            ..OptimizerConfig::default()
        })
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Full-batch descent from `initial`
    ///
    /// Stops when the norm of an update drops below the tolerance or after
    /// `max_iterations` updates.
    pub fn fit<M: Model + ?Sized>(
        &self,
        model: &M,
        initial: &Vector,
        data: &Matrix,
        labels: &Vector,
    ) -> Result<FitResult> {
        self.check_config()?;

        let mut weights = initial.clone();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            let gradient = model.gradient(&weights, data, labels)?;
            let (next, step_norm) = apply_update(
                weights,
                &gradient,
                self.config.step_size,
                model.parametric(),
            )?;
            weights = next;
            iterations += 1;

            if step_norm < self.config.tolerance {
                debug!("Step norm {step_norm:e} below tolerance after {iterations} iterations");
                converged = true;
                break;
            }
        }

        let final_loss = model.loss(&weights, data, labels)?;
        info!(
            "Gradient descent finished: {iterations} iterations, converged: {converged}, loss: {final_loss:.6}"
        );

        Ok(FitResult {
            weights,
            iterations,
            converged,
            final_loss,
        })
    }

    /// Per-sample descent: one update per column, `epochs` passes over the data
    pub fn fit_online<M: Model + ?Sized>(
        &self,
        model: &M,
        initial: &Vector,
        data: &Matrix,
        labels: &Vector,
    ) -> Result<FitResult> {
        self.check_config()?;
        if data.ncols() == 0 {
            return Err(RgramError::EmptyDataset);
        }
        if labels.len() != data.ncols() {
            return Err(RgramError::DimensionMismatch {
                expected: data.ncols(),
                actual: labels.len(),
            });
        }

        let mut weights = initial.clone();
        let mut iterations = 0;

        for epoch in 0..self.config.epochs {
            for j in 0..data.ncols() {
                let sample = data.columns(j, 1).into_owned();
                let label = Vector::from_element(1, labels[j]);

                let gradient = model.gradient(&weights, &sample, &label)?;
                let (next, _) = apply_update(
                    weights,
                    &gradient,
                    self.config.step_size,
                    model.parametric(),
                )?;
                weights = next;
                iterations += 1;
            }
            debug!("Epoch {} done, {} weights", epoch + 1, weights.len());
        }

        let final_loss = model.loss(&weights, data, labels)?;
        info!("Online descent finished: {iterations} updates, loss: {final_loss:.6}");

        Ok(FitResult {
            weights,
            iterations,
            converged: false,
            final_loss,
        })
    }

    fn check_config(&self) -> Result<()> {
        if self.config.step_size.is_nan() || self.config.step_size <= 0.0 {
            return Err(RgramError::InvalidParameter(format!(
                "step size must be positive, got {}",
                self.config.step_size
            )));
        }
        Ok(())
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

/// Apply `w - step_size * g`, returning the new weights and the update norm
///
/// Parametric weights must match the gradient in length. Non-parametric
/// weights are padded with zeros when the gradient is longer, which is how
/// a growing dictionary gains coefficients.
pub fn apply_update(
    weights: Vector,
    gradient: &Vector,
    step_size: f64,
    parametric: bool,
) -> Result<(Vector, f64)> {
    let weights = if weights.len() == gradient.len() {
        weights
    } else if !parametric && weights.len() < gradient.len() {
        weights.resize_vertically(gradient.len(), 0.0)
    } else {
        return Err(RgramError::DimensionMismatch {
            expected: weights.len(),
            actual: gradient.len(),
        });
    };

    let step = gradient * step_size;
    let step_norm = step.norm();
    Ok((weights - step, step_norm))
}
