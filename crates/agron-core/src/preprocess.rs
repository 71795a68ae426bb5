//! Raw form input → ordered feature record.
//!
//! Converts user-submitted string values into the fixed-order numeric vector
//! the classifier expects. Every fallback decision (unknown categorical
//! value, unparsable number, missing field) resolves internally to a
//! documented substitute; the emitted record never carries a missing value.

use std::collections::HashMap;

use tracing::debug;

use crate::encode::EncodingMap;
use crate::schema::Schema;

/// A single resolved feature slot: an integer code for categorical columns,
/// a float for numeric columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Code(i64),
    Number(f64),
}

impl FeatureValue {
    /// Numeric view of the slot, as fed to the model.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Code(c) => c as f64,
            Self::Number(n) => n,
        }
    }
}

/// One feature vector in `feature_cols` order, ready for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<FeatureValue>,
}

impl FeatureRecord {
    /// Resolved slots in schema order.
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Number of slots; always equals the schema's feature count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat numeric row for the model.
    pub fn as_row(&self) -> Vec<f64> {
        self.values.iter().map(FeatureValue::as_f64).collect()
    }
}

/// Permissive float parser for user input.
///
/// Trims surrounding whitespace and accepts a comma decimal separator.
/// `None` means "use the column's median" — a normal outcome, not an error.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Convert raw form data into a [`FeatureRecord`].
///
/// Absent form keys are treated as blank submissions. Categorical values not
/// in the column's option list fall back to the first option (code 0); a
/// column with no configured options always encodes as 0. Numeric values
/// that fail to parse fall back to the column's median, or 0.0 when no
/// median is configured.
///
/// Resolution runs in two phases: per-field lookup first, then a final
/// coercion pass in `feature_cols` order that substitutes 0 (categorical) or
/// the median (numeric) for any column the first phase left unresolved —
/// e.g. a feature column missing from both the categorical and numeric sets.
pub fn preprocess_form(
    form: &HashMap<String, String>,
    schema: &Schema,
    encoding: &EncodingMap,
) -> FeatureRecord {
    let mut resolved: HashMap<&str, FeatureValue> = HashMap::new();

    for col in schema.categorical_cols() {
        let submitted = form.get(col).map(String::as_str).unwrap_or("");
        let code = match encoding.code(col, submitted) {
            Some(code) => code,
            None => {
                if encoding.option_count(col) > 0 && !submitted.is_empty() {
                    debug!(col = %col, value = %submitted, "unknown categorical value, using first option");
                }
                0
            }
        };
        resolved.insert(col, FeatureValue::Code(code));
    }

    for col in schema.numeric_cols() {
        let raw = form.get(col).map(String::as_str).unwrap_or("");
        let value = match parse_float(raw) {
            Some(v) => v,
            None => {
                let median = schema.median(col).unwrap_or(0.0);
                if !raw.trim().is_empty() {
                    debug!(col = %col, value = %raw, median, "unparsable numeric value, using median");
                }
                median
            }
        };
        resolved.insert(col, FeatureValue::Number(value));
    }

    // Final coercion pass: emit in feature_cols order, never leaving a slot
    // unresolved.
    let values = schema
        .feature_cols()
        .iter()
        .map(|col| match resolved.get(col.as_str()) {
            Some(&v) => v,
            None if schema.is_categorical(col) => FeatureValue::Code(0),
            None => FeatureValue::Number(schema.median(col).unwrap_or(0.0)),
        })
        .collect();

    FeatureRecord { values }
}
