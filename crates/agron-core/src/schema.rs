//! Feature schema for the trained fertilizer classifier.
//!
//! The training pipeline exports a declarative `schema.json` describing the
//! feature vector the model expects: column order, categorical option lists,
//! numeric medians, and target class names. The schema may arrive partially
//! written; missing pieces are repaired from secondary encoder artifacts
//! where available, and otherwise left in a degraded state that downstream
//! components handle without failing.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

/// Raw, serde-deserialized mirror of `schema.json`.
///
/// Every field defaults when absent so a partially written schema still
/// deserializes; normalization happens in [`Schema::resolve`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaSpec {
    #[serde(default)]
    pub feature_cols: Vec<String>,
    #[serde(default)]
    pub categorical_cols: Vec<String>,
    #[serde(default)]
    pub numeric_cols: Vec<String>,
    #[serde(default)]
    pub categorical_options: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub numeric_medians: HashMap<String, f64>,
    #[serde(default)]
    pub target_classes: Option<Vec<String>>,
}

/// Normalized, immutable runtime schema.
///
/// Built once at startup via [`Schema::resolve`] and shared read-only for
/// the process lifetime. `feature_cols` is the single source of truth for
/// feature vector order and length.
#[derive(Debug, Clone)]
pub struct Schema {
    feature_cols: Vec<String>,
    categorical_cols: Vec<String>,
    numeric_cols: Vec<String>,
    categorical_options: HashMap<String, Vec<String>>,
    numeric_medians: HashMap<String, f64>,
    target_classes: Option<Vec<String>>,
}

/// Counts logged once at startup.
pub struct SchemaSummary {
    pub feature_count: usize,
    pub categorical_count: usize,
    pub numeric_count: usize,
    pub columns_with_options: usize,
    pub columns_with_medians: usize,
    pub has_target_classes: bool,
}

impl Schema {
    /// Normalize a [`SchemaSpec`], repairing missing pieces from secondary
    /// encoder artifacts when available.
    ///
    /// If the spec carries no categorical option lists but per-column
    /// categorical encoders are present, each categorical column's options
    /// are reconstructed from the encoder's ordered class list — the
    /// artifact's internal ordering becomes the code assignment. Likewise an
    /// absent `target_classes` is reconstructed from the target encoder.
    ///
    /// Artifacts passed as `None` (missing or unreadable on disk) leave the
    /// corresponding field degraded: empty options or `None` target classes.
    pub fn resolve(
        spec: SchemaSpec,
        cat_encoders: Option<&HashMap<String, Vec<String>>>,
        target_encoder: Option<&[String]>,
    ) -> Self {
        let mut categorical_options = spec.categorical_options;
        if categorical_options.is_empty()
            && let Some(encoders) = cat_encoders
        {
            for col in &spec.categorical_cols {
                if let Some(classes) = encoders.get(col) {
                    categorical_options.insert(col.clone(), classes.clone());
                }
            }
            info!(
                columns = categorical_options.len(),
                "rebuilt categorical options from encoder artifacts"
            );
        }

        let mut target_classes = spec.target_classes;
        if target_classes.is_none()
            && let Some(classes) = target_encoder
        {
            target_classes = Some(classes.to_vec());
            info!(
                classes = classes.len(),
                "rebuilt target classes from target encoder artifact"
            );
        }

        Self {
            feature_cols: spec.feature_cols,
            categorical_cols: spec.categorical_cols,
            numeric_cols: spec.numeric_cols,
            categorical_options,
            numeric_medians: spec.numeric_medians,
            target_classes,
        }
    }

    /// Ordered feature columns — defines output vector order and length.
    pub fn feature_cols(&self) -> &[String] {
        &self.feature_cols
    }

    /// Categorical columns, order-preserving subset of `feature_cols`.
    pub fn categorical_cols(&self) -> &[String] {
        &self.categorical_cols
    }

    /// Numeric columns, order-preserving subset of `feature_cols`.
    pub fn numeric_cols(&self) -> &[String] {
        &self.numeric_cols
    }

    /// Ordered legal option strings for a categorical column, if configured.
    pub fn options(&self, col: &str) -> Option<&[String]> {
        self.categorical_options.get(col).map(Vec::as_slice)
    }

    /// All categorical option lists, for form rendering.
    pub fn categorical_options(&self) -> &HashMap<String, Vec<String>> {
        &self.categorical_options
    }

    /// Fallback median for a numeric column, if configured.
    pub fn median(&self, col: &str) -> Option<f64> {
        self.numeric_medians.get(col).copied()
    }

    /// Ordered target class display names, if known.
    pub fn target_classes(&self) -> Option<&[String]> {
        self.target_classes.as_deref()
    }

    /// Whether a column is in the categorical set.
    pub fn is_categorical(&self, col: &str) -> bool {
        self.categorical_cols.iter().any(|c| c == col)
    }

    /// Summary statistics for startup logging.
    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            feature_count: self.feature_cols.len(),
            categorical_count: self.categorical_cols.len(),
            numeric_count: self.numeric_cols.len(),
            columns_with_options: self.categorical_options.len(),
            columns_with_medians: self.numeric_medians.len(),
            has_target_classes: self.target_classes.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_spec() -> SchemaSpec {
        SchemaSpec {
            feature_cols: vec![
                "soil_type".into(),
                "crop".into(),
                "nitrogen".into(),
                "moisture".into(),
            ],
            categorical_cols: vec!["soil_type".into(), "crop".into()],
            numeric_cols: vec!["nitrogen".into(), "moisture".into()],
            categorical_options: HashMap::new(),
            numeric_medians: HashMap::from([("nitrogen".into(), 37.0)]),
            target_classes: None,
        }
    }

    #[test]
    fn deserializes_partial_schema_with_defaults() {
        let spec: SchemaSpec =
            serde_json::from_str(r#"{"feature_cols": ["a", "b"]}"#).unwrap();
        assert_eq!(spec.feature_cols, vec!["a", "b"]);
        assert!(spec.categorical_cols.is_empty());
        assert!(spec.categorical_options.is_empty());
        assert!(spec.target_classes.is_none());
    }

    #[test]
    fn resolve_keeps_spec_options_when_present() {
        let mut spec = base_spec();
        spec.categorical_options
            .insert("soil_type".into(), vec!["Sandy".into(), "Clay".into()]);

        // Encoders carry a different ordering; spec-provided options win.
        let encoders =
            HashMap::from([("soil_type".to_string(), vec!["Clay".to_string(), "Sandy".to_string()])]);

        let schema = Schema::resolve(spec, Some(&encoders), None);
        assert_eq!(schema.options("soil_type").unwrap(), ["Sandy", "Clay"]);
    }

    #[test]
    fn resolve_rebuilds_options_from_encoders_preserving_order() {
        let encoders = HashMap::from([
            (
                "soil_type".to_string(),
                vec!["Loamy".to_string(), "Sandy".to_string(), "Clay".to_string()],
            ),
            ("crop".to_string(), vec!["Wheat".to_string(), "Maize".to_string()]),
        ]);

        let schema = Schema::resolve(base_spec(), Some(&encoders), None);
        assert_eq!(
            schema.options("soil_type").unwrap(),
            ["Loamy", "Sandy", "Clay"]
        );
        assert_eq!(schema.options("crop").unwrap(), ["Wheat", "Maize"]);
    }

    #[test]
    fn resolve_ignores_encoder_columns_outside_categorical_set() {
        let encoders = HashMap::from([("unrelated".to_string(), vec!["x".to_string()])]);

        let schema = Schema::resolve(base_spec(), Some(&encoders), None);
        assert!(schema.options("unrelated").is_none());
        assert!(schema.categorical_options().is_empty());
    }

    #[test]
    fn resolve_without_artifacts_stays_degraded() {
        let schema = Schema::resolve(base_spec(), None, None);
        assert!(schema.options("soil_type").is_none());
        assert!(schema.target_classes().is_none());
    }

    #[test]
    fn resolve_rebuilds_target_classes_from_target_encoder() {
        let classes = vec!["Urea".to_string(), "DAP".to_string(), "MOP".to_string()];
        let schema = Schema::resolve(base_spec(), None, Some(&classes));
        assert_eq!(schema.target_classes().unwrap(), ["Urea", "DAP", "MOP"]);
    }

    #[test]
    fn resolve_keeps_spec_target_classes_over_encoder() {
        let mut spec = base_spec();
        spec.target_classes = Some(vec!["A".into()]);

        let encoder = vec!["B".to_string()];
        let schema = Schema::resolve(spec, None, Some(&encoder));
        assert_eq!(schema.target_classes().unwrap(), ["A"]);
    }

    #[test]
    fn median_and_membership_accessors() {
        let schema = Schema::resolve(base_spec(), None, None);
        assert_eq!(schema.median("nitrogen"), Some(37.0));
        assert_eq!(schema.median("moisture"), None);
        assert!(schema.is_categorical("soil_type"));
        assert!(!schema.is_categorical("nitrogen"));
    }

    #[test]
    fn summary_counts() {
        let encoders =
            HashMap::from([("soil_type".to_string(), vec!["Sandy".to_string()])]);
        let schema = Schema::resolve(base_spec(), Some(&encoders), None);

        let s = schema.summary();
        assert_eq!(s.feature_count, 4);
        assert_eq!(s.categorical_count, 2);
        assert_eq!(s.numeric_count, 2);
        assert_eq!(s.columns_with_options, 1);
        assert_eq!(s.columns_with_medians, 1);
        assert!(!s.has_target_classes);
    }
}
