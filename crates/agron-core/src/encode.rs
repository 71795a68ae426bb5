//! Value→code lookup maps for categorical columns.
//!
//! Codes are dense and zero-based: an option's code is its position in the
//! column's ordered option list. The first listed option (code 0) is the
//! contractual fallback for unknown or blank submissions.

use std::collections::HashMap;

use crate::schema::Schema;

/// Per-column mapping from option string to integer code.
///
/// Built once from the schema and shared read-only; rebuilding from the
/// same schema always yields the same map.
#[derive(Debug, Clone, Default)]
pub struct EncodingMap {
    columns: HashMap<String, HashMap<String, i64>>,
}

impl EncodingMap {
    /// Derive the encoding map from a schema's categorical option lists.
    ///
    /// A column with an empty (or missing) option list yields an empty map
    /// for that column — not an error.
    pub fn build(schema: &Schema) -> Self {
        let mut columns = HashMap::with_capacity(schema.categorical_cols().len());

        for col in schema.categorical_cols() {
            let options = schema.options(col).unwrap_or_default();
            let map: HashMap<String, i64> = options
                .iter()
                .enumerate()
                .map(|(i, opt)| (opt.clone(), i as i64))
                .collect();
            columns.insert(col.clone(), map);
        }

        Self { columns }
    }

    /// Code for a submitted value in a column, if the value is a known option.
    pub fn code(&self, col: &str, value: &str) -> Option<i64> {
        self.columns.get(col)?.get(value).copied()
    }

    /// Number of known options for a column (0 if unconfigured).
    pub fn option_count(&self, col: &str) -> usize {
        self.columns.get(col).map_or(0, HashMap::len)
    }
}
