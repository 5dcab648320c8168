//! Core type definitions

use nalgebra::{DMatrix, DVector};

/// Dense vector of reals
pub type Vector = DVector<f64>;

/// Dense `d × n` matrix, one sample per column
pub type Matrix = DMatrix<f64>;

/// Logistic function
pub fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^t)` without overflow for large `t`
pub fn log1p_exp(t: f64) -> f64 {
    if t > 0.0 {
        t + (-t).exp().ln_1p()
    } else {
        t.exp().ln_1p()
    }
}

/// Mean binary cross-entropy of raw scores against 0/1 labels
pub(crate) fn mean_logistic_loss(scores: &Vector, labels: &Vector) -> f64 {
    let n = labels.len() as f64;
    scores
        .iter()
        .zip(labels.iter())
        .map(|(&s, &y)| log1p_exp(s) - y * s)
        .sum::<f64>()
        / n
}

/// Configuration for the gradient-descent driver
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Learning rate (eta)
    pub step_size: f64,
    /// Stop once the norm of an update falls below this value
    pub tolerance: f64,
    /// Maximum number of full-batch iterations
    pub max_iterations: usize,
    /// Number of passes over the data for per-sample training
    pub epochs: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            step_size: 0.01,
            tolerance: 1e-8,
            max_iterations: 10000,
            epochs: 1,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Final weights (feature space or dual coefficients)
    pub weights: Vector,
    /// Number of updates performed
    pub iterations: usize,
    /// Whether the tolerance was reached before the iteration limit
    pub converged: bool,
    /// Loss at the final weights
    pub final_loss: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid(2.0) + sigmoid(-2.0), 1.0, epsilon = 1e-12);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn test_log1p_exp() {
        assert_relative_eq!(log1p_exp(0.0), 2.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(log1p_exp(1.5), (1.0 + 1.5_f64.exp()).ln(), epsilon = 1e-12);
        // Large arguments must not overflow
        assert_relative_eq!(log1p_exp(1000.0), 1000.0, epsilon = 1e-12);
        assert!(log1p_exp(-1000.0) >= 0.0);
    }

    #[test]
    fn test_mean_logistic_loss() {
        let scores = Vector::from_vec(vec![0.0, 0.0]);
        let labels = Vector::from_vec(vec![0.0, 1.0]);
        assert_relative_eq!(
            mean_logistic_loss(&scores, &labels),
            2.0_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.step_size, 0.01);
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 10000);
        assert_eq!(config.epochs, 1);
    }
}
