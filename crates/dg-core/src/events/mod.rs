//! Notification primitives for the grid
//!
//! Every mutation fans out to two sinks: locally registered callbacks
//! (this module) and the external view channel. Callbacks run
//! synchronously, in registration order, on the same logical step as the
//! mutation that caused them. No batching, no queue.

use crate::field::FieldName;
use crate::value::CellValue;

/// Payload delivered when a cell's value changes
#[derive(Debug, Clone, PartialEq)]
pub struct CellChangedEvent {
    pub row: usize,
    pub column: FieldName,
    /// Data-column index; `None` when the column is part of the primary key
    pub column_index: Option<usize>,
    pub value: CellValue,
}

/// Payload delivered when the view reports a cell click
#[derive(Debug, Clone, PartialEq)]
pub struct CellClickEvent {
    /// Grid region the click landed in ("body", "row-header", ...)
    pub region: String,
    pub column: FieldName,
    pub column_index: Option<usize>,
    pub row: usize,
    pub primary_key_row: CellValue,
    pub cell_value: CellValue,
}

/// Ordered list of subscriber callbacks for one event kind.
///
/// The grid is single-writer, so dispatch borrows the list mutably and
/// runs every callback to completion before the mutating call returns.
pub struct CallbackList<E> {
    callbacks: Vec<Box<dyn FnMut(&E) + Send>>,
}

impl<E> CallbackList<E> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback; callbacks fire in registration order
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(&E) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Invoke every callback with the event
    pub fn emit(&mut self, event: &E) {
        for callback in self.callbacks.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for CallbackList<E> {
    fn default() -> Self {
        Self::new()
    }
}
