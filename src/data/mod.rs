//! Data model and ingestion
//!
//! Column-oriented table with a tagged schema, plus the CSV loader that
//! produces the raw input table.

pub mod loader;
pub mod table;

pub use table::{Column, ColumnType, FeatureMatrix, Table, Value};
