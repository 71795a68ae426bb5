//! Schema model, categorical encoding, and form preprocessing for Agron.

pub mod encode;
pub mod preprocess;
pub mod schema;

pub use encode::EncodingMap;
pub use preprocess::{FeatureRecord, FeatureValue, parse_float, preprocess_form};
pub use schema::{Schema, SchemaSpec, SchemaSummary};
