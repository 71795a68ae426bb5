//! Multinomial logistic regression model loaded from a JSON artifact.
//!
//! The training pipeline exports the fitted estimator as `model.json`:
//! per-class coefficient rows, per-class intercepts, and optionally the
//! estimator's internal class ids. Inference is logits plus a numerically
//! stable softmax.

use serde::Deserialize;

use crate::classifier::{Classifier, Distribution, InferError};

/// Softmax-linear classifier deserialized from `model.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SoftmaxModel {
    /// One coefficient row per class, one weight per feature.
    coefficients: Vec<Vec<f64>>,
    /// One intercept per class.
    intercepts: Vec<f64>,
    /// Internal class ids, position-aligned with `coefficients`. Absent
    /// means the identity mapping.
    #[serde(default)]
    classes: Option<Vec<i64>>,
}

impl SoftmaxModel {
    pub fn new(
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        classes: Option<Vec<i64>>,
    ) -> Self {
        Self {
            coefficients,
            intercepts,
            classes,
        }
    }

    /// Check the deserialized artifact is internally consistent.
    ///
    /// Run once at load time; a model that fails validation must not serve.
    pub fn validate(&self) -> Result<(), InferError> {
        if self.coefficients.is_empty() {
            return Err(InferError::InvalidModel(
                "empty coefficient matrix".into(),
            ));
        }

        let n_features = self.coefficients[0].len();
        if n_features == 0 {
            return Err(InferError::InvalidModel("zero-width coefficient rows".into()));
        }
        if let Some(row) = self.coefficients.iter().find(|r| r.len() != n_features) {
            return Err(InferError::InvalidModel(format!(
                "ragged coefficient matrix: expected {n_features} weights, found {}",
                row.len()
            )));
        }

        if self.intercepts.len() != self.coefficients.len() {
            return Err(InferError::InvalidModel(format!(
                "{} intercepts for {} classes",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }

        if let Some(classes) = &self.classes
            && classes.len() != self.coefficients.len()
        {
            return Err(InferError::InvalidModel(format!(
                "{} class ids for {} classes",
                classes.len(),
                self.coefficients.len()
            )));
        }

        Ok(())
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.coefficients.len()
    }
}

impl Classifier for SoftmaxModel {
    fn n_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Distribution, InferError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(InferError::FeatureCountMismatch {
                expected,
                actual: row.len(),
            });
        }

        let logits: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, b)| {
                weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b
            })
            .collect();

        let probs = softmax(&logits);
        let class_ids = match &self.classes {
            Some(ids) => ids.clone(),
            None => Distribution::identity_ids(probs.len()),
        };

        Ok(Distribution { probs, class_ids })
    }
}

/// Numerically stable softmax: shift by the max logit before exponentiating.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
