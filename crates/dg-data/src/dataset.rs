//! Column-major source data handed to the grid

use dg_core::{CellValue, FieldName};

/// One level of a dataset's index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexLevel {
    /// Level name; `None` falls back to the grid's default naming rules
    pub name: Option<FieldName>,
    pub values: Vec<CellValue>,
}

/// A column-major table to load into the grid.
///
/// Zero or more index levels plus the data columns, in presentation
/// order. With no index level, the grid synthesizes a positional one on
/// load, the same way a bare range index is promoted to a column.
///
/// Duplicate column names are representable here; the store rejects them
/// at construction, so a bad dataset fails loudly instead of silently
/// losing a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    index_levels: Vec<IndexLevel>,
    columns: Vec<(FieldName, Vec<CellValue>)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a data column
    pub fn with_column(mut self, name: impl Into<FieldName>, values: Vec<CellValue>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    /// Append an index level
    pub fn with_index(mut self, name: Option<FieldName>, values: Vec<CellValue>) -> Self {
        self.index_levels.push(IndexLevel {
            name,
            values,
        });
        self
    }

    pub fn index_levels(&self) -> &[IndexLevel] {
        &self.index_levels
    }

    pub fn columns(&self) -> &[(FieldName, Vec<CellValue>)] {
        &self.columns
    }

    /// Row count implied by the first index level or column
    pub fn row_count(&self) -> usize {
        if let Some(level) = self.index_levels.first() {
            level.values.len()
        } else if let Some((_, values)) = self.columns.first() {
            values.len()
        } else {
            0
        }
    }
}
