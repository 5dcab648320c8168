//! Linear models on raw features

use crate::core::{mean_logistic_loss, sigmoid, Matrix, Model, Result, Vector};

/// Least-squares regression
///
/// `loss = ||X^T w - y||² / n`, `gradient = (2/n) X (X^T w - y)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearLeastSquares;

impl LinearLeastSquares {
    pub fn new() -> Self {
        Self
    }
}

impl Model for LinearLeastSquares {
    fn gradient(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<Vector> {
        let n = labels.len() as f64;
        let residual = data.tr_mul(weights) - labels;
        Ok(data * residual * (2.0 / n))
    }

    fn loss(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<f64> {
        let n = labels.len() as f64;
        let residual = data.tr_mul(weights) - labels;
        Ok(residual.norm_squared() / n)
    }

    fn parametric(&self) -> bool {
        true
    }
}

/// Binary logistic regression with labels in {0, 1}
///
/// Scores are `X^T w`; the loss is the mean cross-entropy and the gradient
/// the mean of `(sigmoid(x^T w) - y) x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryLogisticRegression;

impl BinaryLogisticRegression {
    pub fn new() -> Self {
        Self
    }

    /// Probability of the positive class for each column of `data`
    pub fn predict_proba(&self, weights: &Vector, data: &Matrix) -> Vector {
        data.tr_mul(weights).map(sigmoid)
    }
}

impl Model for BinaryLogisticRegression {
    fn gradient(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<Vector> {
        let n = labels.len() as f64;
        let residual = data.tr_mul(weights).map(sigmoid) - labels;
        Ok(data * residual / n)
    }

    fn loss(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<f64> {
        let scores = data.tr_mul(weights);
        Ok(mean_logistic_loss(&scores, labels))
    }

    fn parametric(&self) -> bool {
        true
    }
}

/// Central finite-difference gradient, used to check analytic gradients
#[cfg(test)]
pub(crate) fn numeric_gradient<M: Model>(
    model: &M,
    weights: &Vector,
    data: &Matrix,
    labels: &Vector,
) -> Vector {
    let h = 1e-6;
    Vector::from_fn(weights.len(), |k, _| {
        let mut plus = weights.clone();
        let mut minus = weights.clone();
        plus[k] += h;
        minus[k] -= h;
        let lp = model.loss(&plus, data, labels).unwrap();
        let lm = model.loss(&minus, data, labels).unwrap();
        (lp - lm) / (2.0 * h)
    })
}
