//! The process-wide prediction engine.
//!
//! Bundles the resolved schema, its encoding map, and the trained model into
//! one immutable value constructed before serving begins. Requests only ever
//! read from it.

use std::collections::HashMap;

use tracing::debug;

use agron_core::{EncodingMap, Schema, preprocess_form};

use crate::classifier::{Classifier, InferError};
use crate::topk::{PredictionResult, TOP_K, top_k};

/// Immutable schema + encoding + model bundle.
pub struct Engine {
    schema: Schema,
    encoding: EncodingMap,
    model: Box<dyn Classifier>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("schema", &self.schema)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Assemble the engine, checking the model's feature width against the
    /// schema once at construction. A mismatch is fatal: the process must
    /// not serve with a model that cannot accept the schema's records.
    pub fn new(schema: Schema, model: Box<dyn Classifier>) -> Result<Self, InferError> {
        let expected = model.n_features();
        let actual = schema.feature_cols().len();
        if expected != actual {
            return Err(InferError::FeatureCountMismatch { expected, actual });
        }

        let encoding = EncodingMap::build(&schema);
        Ok(Self {
            schema,
            encoding,
            model,
        })
    }

    /// The resolved schema, for form rendering.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Run the full pipeline for one form submission: preprocess, infer,
    /// extract top predictions.
    pub fn predict(
        &self,
        form: &HashMap<String, String>,
    ) -> Result<PredictionResult, InferError> {
        let record = preprocess_form(form, &self.schema, &self.encoding);
        let dist = self.model.predict_proba(&record.as_row())?;
        let result = top_k(&dist, self.schema.target_classes(), TOP_K);

        if let Some(best) = result.best() {
            debug!(label = %best.label, score = best.score, "prediction");
        }
        Ok(result)
    }
}
