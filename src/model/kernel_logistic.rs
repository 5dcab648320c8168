//! Kernelized binary logistic regression
//!
//! Weights are dual coefficients, one per training sample. With the
//! stabilized training Gram matrix K = K(X, X) the scores are `s = K w` and
//!
//! ```text
//! loss     = mean(log(1 + e^s) - y s) + (lambda / 2) w^T K w
//! gradient = K^T (sigmoid(s) - y) / n + lambda K w
//! ```

use crate::cache::{CacheState, CacheStats, GramCache};
use crate::core::{mean_logistic_loss, sigmoid, Matrix, Model, Result, Vector};
use crate::kernel::Kernel;
use std::sync::Arc;

/// Logistic regression in kernel (dual) space with labels in {0, 1}
///
/// The Gram matrix of the training data is computed on the first gradient
/// or loss call and reused while the same training matrix is passed in.
/// Passing a different matrix recomputes it; [`invalidate`](Self::invalidate)
/// drops it explicitly.
pub struct KernelLogisticRegression<K: Kernel> {
    kernel: K,
    lambda: f64,
    cache: GramCache,
}

impl<K: Kernel> KernelLogisticRegression<K> {
    /// Create a model with the given kernel and L2 regularization strength
    pub fn new(kernel: K, lambda: f64) -> Self {
        Self {
            kernel,
            lambda,
            cache: GramCache::new(),
        }
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Get the regularization strength
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Stabilized Gram matrix of `data` against itself, cached
    pub fn training_gram(&self, data: &Matrix) -> Result<Arc<Matrix>> {
        self.cache
            .get_or_try_insert_with(data, || self.kernel.gram_matrix_stable(data, data))
    }

    /// Currently cached training Gram matrix
    pub fn cached_gram(&self) -> Option<Arc<Matrix>> {
        self.cache.get()
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget the cached Gram matrix, e.g. after the training set changed
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Raw scores `K(data, training) w` for new samples
    pub fn decision_function(
        &self,
        weights: &Vector,
        training: &Matrix,
        data: &Matrix,
    ) -> Result<Vector> {
        let cross = self.kernel.gram_matrix(data, training)?;
        Ok(cross * weights)
    }

    /// Probability of the positive class for new samples
    pub fn predict_proba(
        &self,
        weights: &Vector,
        training: &Matrix,
        data: &Matrix,
    ) -> Result<Vector> {
        Ok(self.decision_function(weights, training, data)?.map(sigmoid))
    }
}

impl<K: Kernel> Model for KernelLogisticRegression<K> {
    fn gradient(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<Vector> {
        let gram = self.training_gram(data)?;
        let n = labels.len() as f64;

        let scores = &*gram * weights;
        let residual = scores.map(sigmoid) - labels;
        Ok(gram.tr_mul(&residual) / n + scores * self.lambda)
    }

    fn loss(&self, weights: &Vector, data: &Matrix, labels: &Vector) -> Result<f64> {
        let gram = self.training_gram(data)?;

        let scores = &*gram * weights;
        let penalty = 0.5 * self.lambda * weights.dot(&scores);
        Ok(mean_logistic_loss(&scores, labels) + penalty)
    }

    fn parametric(&self) -> bool {
        false
    }
}
