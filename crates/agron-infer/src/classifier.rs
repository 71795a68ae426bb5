//! The narrow classifier capability the rest of the system depends on.
//!
//! A classifier is "given one row, return class probabilities" — nothing
//! more. Concrete model representations implement [`Classifier`]; callers
//! never reach past the trait into the trained artifact.

use thiserror::Error;

/// Inference-layer errors.
#[derive(Debug, Error)]
pub enum InferError {
    #[error("feature count mismatch: model expects {expected}, record has {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("invalid model artifact: {0}")]
    InvalidModel(String),
}

/// A probability distribution over classes, plus the ordered internal class
/// ids its positions correspond to.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// One probability per class position, each in [0, 1].
    pub probs: Vec<f64>,
    /// Internal class id at each position. Models that carry no explicit id
    /// list use the identity mapping `0..n-1`.
    pub class_ids: Vec<i64>,
}

impl Distribution {
    /// Identity class-id order for a distribution of `n` classes.
    pub fn identity_ids(n: usize) -> Vec<i64> {
        (0..n as i64).collect()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

/// Opaque trained classifier: one row in, class probabilities out.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests; the trait performs no retraining and no mutation.
pub trait Classifier: Send + Sync {
    /// Number of features one input row must carry.
    fn n_features(&self) -> usize;

    /// Class probabilities for a single feature row.
    fn predict_proba(&self, row: &[f64]) -> Result<Distribution, InferError>;
}
