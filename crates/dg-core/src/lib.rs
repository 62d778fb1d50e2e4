//! Core functionality for the grid data model
//!
//! This crate provides the selection engine, the notification primitives
//! and the shared vocabulary (field names, cell values) the rest of the
//! grid system builds on.

pub mod events;
pub mod field;
pub mod selection;
pub mod value;

// Re-export commonly used types
pub use events::{CallbackList, CellChangedEvent, CellClickEvent};
pub use field::FieldName;
pub use selection::{
    CellCoord, SelectionMode, SelectionRegion, SelectionSet, SelectionTraversal,
};
pub use value::CellValue;
pub use data::GridDims;

/// Abstractions filled in by the data layer
pub mod data {
    /// Row/column extents of a bound tabular store.
    ///
    /// Selection traversal needs the total spans to expand row-wise and
    /// column-wise selections; this is all it needs to know about the
    /// data layer.
    pub trait GridDims {
        /// Number of rows in the store
        fn row_count(&self) -> usize;

        /// Number of enumerable data columns (primary-key fields excluded)
        fn column_count(&self) -> usize;
    }
}
