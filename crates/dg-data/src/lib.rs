//! Tabular data layer for the grid
//!
//! Owns the dataset bound to the grid: schema generation (index levels,
//! data columns, surrogate key), row storage, and the lookups the
//! controller and the selection traversal build on.

pub mod dataset;
pub mod schema;
pub mod store;

use dg_core::FieldName;
use thiserror::Error;

// Re-exports
pub use dataset::{Dataset, IndexLevel};
pub use schema::{Field, FieldType, TableSchema};
pub use store::{DataStore, Row};

/// Errors that can occur in data operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(FieldName),

    #[error("column {column} has {got} values, expected {expected}")]
    RaggedColumn {
        column: FieldName,
        expected: usize,
        got: usize,
    },

    #[error("primary key value has {got} entries, expected {expected}")]
    KeyLengthMismatch { expected: usize, got: usize },

    #[error("unknown field: {0}")]
    UnknownField(FieldName),
}
