//! Model serialization and persistence
//!
//! A trained kernel model is fully described by its kernel, its
//! regularization strength, the landmark points (training samples or the
//! stochastic dictionary) and the dual weights over them. Snapshots store
//! exactly that as JSON.

use crate::core::{sigmoid, Matrix, Result, RgramError, Vector};
use crate::kernel::{Kernel, KernelKind};
use crate::model::{KernelLogisticRegression, StochasticKernelLogisticRegression};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable representation of a trained kernel model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Kernel with its hyperparameters
    pub kernel: KernelKind,
    /// L2 regularization strength
    pub lambda: f64,
    /// Dual weights, one per landmark
    pub weights: Vector,
    /// Landmark points as columns
    pub landmarks: Matrix,
    /// Snapshot metadata
    pub metadata: SnapshotMetadata,
}

/// Metadata for tracking and validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Library version used to create the snapshot
    pub library_version: String,
    /// Model the snapshot was taken from
    pub model_type: String,
    /// Number of landmark points
    pub n_landmarks: usize,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl ModelSnapshot {
    fn new(
        kernel: KernelKind,
        lambda: f64,
        weights: &Vector,
        landmarks: Matrix,
        model_type: &str,
    ) -> Result<Self> {
        if landmarks.ncols() == 0 {
            return Err(RgramError::EmptyDataset);
        }
        if weights.len() != landmarks.ncols() {
            return Err(RgramError::DimensionMismatch {
                expected: landmarks.ncols(),
                actual: weights.len(),
            });
        }

        Ok(Self {
            kernel,
            lambda,
            weights: weights.clone(),
            metadata: SnapshotMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                model_type: model_type.to_string(),
                n_landmarks: landmarks.ncols(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
            landmarks,
        })
    }

    /// Snapshot of a kernel logistic model trained on `training`
    pub fn from_kernel_model<K>(
        model: &KernelLogisticRegression<K>,
        weights: &Vector,
        training: &Matrix,
    ) -> Result<Self>
    where
        K: Kernel + Clone + Into<KernelKind>,
    {
        Self::new(
            model.kernel().clone().into(),
            model.lambda(),
            weights,
            training.clone(),
            "kernel_logistic",
        )
    }

    /// Snapshot of a stochastic kernel model and its current dictionary
    pub fn from_stochastic_model<K>(
        model: &StochasticKernelLogisticRegression<K>,
        weights: &Vector,
    ) -> Result<Self>
    where
        K: Kernel + Clone + Into<KernelKind>,
    {
        Self::new(
            model.kernel().clone().into(),
            model.lambda(),
            weights,
            model.dictionary(),
            "stochastic_kernel_logistic",
        )
    }

    /// Save snapshot to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Load snapshot from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let snapshot: Self = serde_json::from_reader(reader)?;

        if snapshot.weights.len() != snapshot.landmarks.ncols() {
            return Err(RgramError::DimensionMismatch {
                expected: snapshot.landmarks.ncols(),
                actual: snapshot.weights.len(),
            });
        }
        Ok(snapshot)
    }

    /// Fresh model with the stored kernel and regularization strength
    pub fn to_kernel_model(&self) -> KernelLogisticRegression<KernelKind> {
        KernelLogisticRegression::new(self.kernel, self.lambda)
    }

    /// Raw scores `K(data, landmarks) w` for the columns of `data`
    pub fn decision_function(&self, data: &Matrix) -> Result<Vector> {
        let cross = self.kernel.gram_matrix(data, &self.landmarks)?;
        Ok(cross * &self.weights)
    }

    /// Probability of the positive class for the columns of `data`
    pub fn predict_proba(&self, data: &Matrix) -> Result<Vector> {
        Ok(self.decision_function(data)?.map(sigmoid))
    }
}
