//! Online kernel logistic regression over a growing dictionary
//!
//! Every sample passed to [`StochasticKernelLogisticRegression::sample_gradient`]
//! becomes a landmark point of the dictionary. The model function is
//! `f(x) = sum_i w_i k(d_i, x)` over the dictionary entries `d_i`, so scoring
//! one sample costs one kernel row instead of a full Gram matrix.

use crate::cache::CacheState;
use crate::core::{mean_logistic_loss, sigmoid, Matrix, Model, Result, RgramError, Vector};
use crate::kernel::Kernel;
use crate::model::KernelLogisticRegression;
use nalgebra::DVectorView;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Stochastic (per-sample) kernel logistic regression with labels in {0, 1}
///
/// The gradient step is the functional gradient of the regularized logistic
/// loss at one sample. For a dictionary of size n it returns a vector of
/// length n + 1: `lambda * w` for the existing coefficients followed by
/// `sigmoid(f(x)) - y` for the coefficient of the new landmark `x`. An
/// optimizer extends `w` with a zero before subtracting the step.
pub struct StochasticKernelLogisticRegression<K: Kernel> {
    base: KernelLogisticRegression<K>,
    /// Landmark points as columns, 0×0 until the first sample
    dictionary: RwLock<Matrix>,
}

impl<K: Kernel> StochasticKernelLogisticRegression<K> {
    /// Create a model with an empty dictionary
    pub fn new(kernel: K, lambda: f64) -> Self {
        Self {
            base: KernelLogisticRegression::new(kernel, lambda),
            dictionary: RwLock::new(Matrix::zeros(0, 0)),
        }
    }

    pub fn kernel(&self) -> &K {
        self.base.kernel()
    }

    pub fn lambda(&self) -> f64 {
        self.base.lambda()
    }

    /// Number of landmark points
    pub fn dictionary_len(&self) -> usize {
        self.read().ncols()
    }

    /// Landmark points as columns of a matrix (0×0 when empty)
    pub fn dictionary(&self) -> Matrix {
        self.read().clone()
    }

    /// State of the cached dictionary Gram matrix
    pub fn cache_state(&self) -> CacheState {
        self.base.cache_state()
    }

    /// Clear the dictionary and the cached Gram matrix
    pub fn reset(&self) {
        *self.write() = Matrix::zeros(0, 0);
        self.base.invalidate();
    }

    /// Model function `f(w, x) = sum_i w_i k(d_i, x)`
    pub fn score(&self, weights: &Vector, x: DVectorView<'_, f64>) -> Result<f64> {
        score_against(self.kernel(), &self.read(), weights, x)
    }

    /// Gradient step for a single sample; `x` joins the dictionary
    pub fn sample_gradient(
        &self,
        weights: &Vector,
        x: DVectorView<'_, f64>,
        label: f64,
    ) -> Result<Vector> {
        let mut dictionary = self.write();
        let score = score_against(self.kernel(), &dictionary, weights, x)?;

        let n = dictionary.ncols();
        let mut gradient = Vector::zeros(n + 1);
        gradient.rows_mut(0, n).copy_from(&(weights * self.lambda()));
        gradient[n] = sigmoid(score) - label;

        *dictionary = if n == 0 {
            Matrix::from_columns(&[x])
        } else {
            let mut grown = std::mem::replace(&mut *dictionary, Matrix::zeros(0, 0))
                .resize_horizontally(n + 1, 0.0);
            grown.set_column(n, &x);
            grown
        };
        Ok(gradient)
    }

    /// Probability of the positive class for each column of `data`
    pub fn predict_proba(&self, weights: &Vector, data: &Matrix) -> Result<Vector> {
        Ok(self.scores(&self.read(), weights, data)?.map(sigmoid))
    }

    fn scores(&self, dictionary: &Matrix, weights: &Vector, data: &Matrix) -> Result<Vector> {
        let scores = data
            .column_iter()
            .map(|x| score_against(self.kernel(), dictionary, weights, x))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Vector::from_vec(scores))
    }

    fn read(&self) -> RwLockReadGuard<'_, Matrix> {
        self.dictionary.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Matrix> {
        self.dictionary.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_weights(dictionary: &Matrix, weights: &Vector) -> Result<()> {
    if weights.len() != dictionary.ncols() {
        return Err(RgramError::DimensionMismatch {
            expected: dictionary.ncols(),
            actual: weights.len(),
        });
    }
    Ok(())
}

fn score_against<K: Kernel + ?Sized>(
    kernel: &K,
    dictionary: &Matrix,
    weights: &Vector,
    x: DVectorView<'_, f64>,
) -> Result<f64> {
    check_weights(dictionary, weights)?;
    if dictionary.ncols() == 0 {
        return Ok(0.0);
    }
    Ok(kernel.kernel_row(x, dictionary)?.dot(weights))
}

impl<K: Kernel> Model for StochasticKernelLogisticRegression<K> {
    /// Gradient for a single sample: `data` must have exactly one column and
    /// `labels` exactly one entry
    fn gradient(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<Vector> {
        if data.ncols() != 1 {
            return Err(RgramError::DimensionMismatch {
                expected: 1,
                actual: data.ncols(),
            });
        }
        if labels.len() != 1 {
            return Err(RgramError::DimensionMismatch {
                expected: 1,
                actual: labels.len(),
            });
        }
        self.sample_gradient(weights, data.column(0), labels[0])
    }

    /// Mean logistic loss of the dictionary expansion over the columns of
    /// `data`, plus `(lambda / 2) w^T K_DD w` on the dictionary Gram matrix
    fn loss(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<f64> {
        let dictionary = self.read();
        check_weights(&dictionary, weights)?;
        let scores = self.scores(&dictionary, weights, data)?;
        let data_loss = mean_logistic_loss(&scores, labels);

        if dictionary.ncols() == 0 {
            return Ok(data_loss);
        }
        let gram = self.base.training_gram(&dictionary)?;
        let penalty = 0.5 * self.lambda() * weights.dot(&(&*gram * weights));
        Ok(data_loss + penalty)
    }

    fn parametric(&self) -> bool {
        false
    }
}
