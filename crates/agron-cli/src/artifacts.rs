//! Artifact loading: schema, auxiliary encoders, and the trained model.
//!
//! The artifact directory is written by the training pipeline:
//!
//! - `schema.json` — required; the declarative feature schema.
//! - `label_encoders.json` — optional; per-column ordered class lists used
//!   to repair an empty `categorical_options`.
//! - `target_encoder.json` — optional; ordered target class names.
//! - `model.json` — required; the serialized classifier. Absence is fatal:
//!   the process cannot serve without it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use agron_core::{Schema, SchemaSpec};
use agron_infer::{Engine, SoftmaxModel};

const SCHEMA_FILE: &str = "schema.json";
const LABEL_ENCODERS_FILE: &str = "label_encoders.json";
const TARGET_ENCODER_FILE: &str = "target_encoder.json";
const MODEL_FILE: &str = "model.json";

/// Load all artifacts from `dir` and assemble the prediction engine.
///
/// Auxiliary encoder files that are missing or unreadable are logged and
/// skipped; the schema keeps its degraded state. A missing or invalid
/// schema or model file aborts startup.
pub fn load_engine(dir: &Path) -> anyhow::Result<Engine> {
    let spec: SchemaSpec = read_json(&dir.join(SCHEMA_FILE))
        .with_context(|| format!("load {SCHEMA_FILE} from {dir:?}"))?;

    let cat_encoders: Option<HashMap<String, Vec<String>>> =
        read_optional(&dir.join(LABEL_ENCODERS_FILE));
    let target_encoder: Option<Vec<String>> = read_optional(&dir.join(TARGET_ENCODER_FILE));

    let schema = Schema::resolve(spec, cat_encoders.as_ref(), target_encoder.as_deref());
    let s = schema.summary();
    info!(
        features = s.feature_count,
        categorical = s.categorical_count,
        numeric = s.numeric_count,
        options = s.columns_with_options,
        medians = s.columns_with_medians,
        target_classes = s.has_target_classes,
        "resolved schema"
    );

    let model: SoftmaxModel = read_json(&dir.join(MODEL_FILE))
        .with_context(|| format!("load {MODEL_FILE} from {dir:?} (cannot serve without the trained model)"))?;
    model.validate().context("validate model artifact")?;
    info!(classes = model.n_classes(), "loaded model");

    Engine::new(schema, Box::new(model)).context("assemble prediction engine")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {path:?}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {path:?}"))
}

/// Read an optional auxiliary artifact. Absence and unreadability both
/// degrade to `None`; neither is fatal.
fn read_optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        debug!(path = %path.display(), "auxiliary artifact not present");
        return None;
    }
    match read_json(path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not load auxiliary artifact, continuing degraded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_auxiliary_artifact_degrades_to_none() {
        let missing = PathBuf::from("/nonexistent/label_encoders.json");
        let loaded: Option<Vec<String>> = read_optional(&missing);
        assert!(loaded.is_none());
    }

    #[test]
    fn missing_schema_is_fatal() {
        let err = load_engine(Path::new("/nonexistent")).unwrap_err();
        assert!(err.to_string().contains("schema.json"));
    }
}
