//! Top-level grid coordination
//!
//! The controller owns the paired data store and selection set, applies
//! every mutation, and fans each change out to the two notification
//! sinks in order: locally registered callbacks first, then the view
//! channel. Both sinks are synchronous and fire on the same logical step
//! as the mutation.

use dg_core::data::GridDims;
use dg_core::events::{CallbackList, CellChangedEvent, CellClickEvent};
use dg_core::{
    CellCoord, CellValue, FieldName, SelectionMode, SelectionSet, SelectionTraversal,
};
use dg_data::{DataError, DataStore, Dataset};
use tracing::{debug, info, warn};

use crate::channel::ViewChannel;
use crate::config::GridConfig;
use crate::messages::{InboundMessage, OutboundMessage};
use crate::transform::Transform;
use crate::wire::WireDataset;

/// What happens to pre-existing selections when a new one is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Remove all pre-existing selections first
    All,
    /// Remove the most recently added selection first
    Current,
    /// Keep pre-existing selections
    #[default]
    None,
}

/// Coordinates the data store, the selection set and both notification
/// sinks for one bound view.
///
/// Single-threaded, single-writer: calls arrive either from the local
/// API or from inbound view messages, never concurrently, so mutations
/// take `&mut self` and there is no locking anywhere in the model.
pub struct GridController {
    store: DataStore,
    selections: SelectionSet,
    transforms: Vec<Transform>,
    /// Row ordinals the view last reported visible; empty means "all"
    visible_rows: Vec<usize>,
    config: GridConfig,
    editable: bool,
    cell_change_callbacks: CallbackList<CellChangedEvent>,
    cell_click_callbacks: CallbackList<CellClickEvent>,
    channel: Option<Box<dyn ViewChannel>>,
}

impl GridController {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            selections: SelectionSet::default(),
            transforms: Vec::new(),
            visible_rows: Vec::new(),
            config: GridConfig::default(),
            editable: false,
            cell_change_callbacks: CallbackList::new(),
            cell_click_callbacks: CallbackList::new(),
            channel: None,
        }
    }

    /// Attach the outbound transport
    pub fn with_channel(mut self, channel: impl ViewChannel + 'static) -> Self {
        self.channel = Some(Box::new(channel));
        self
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    /// Replace the bound dataset wholesale.
    ///
    /// The new store is built first, so a rejected dataset leaves the
    /// old one untouched. Selections survive the swap; if the new data
    /// is smaller they simply stop yielding cells at traversal time.
    pub fn replace_data(
        &mut self,
        dataset: &Dataset,
        index_name: Option<&str>,
    ) -> Result<(), DataError> {
        let store = DataStore::from_dataset(dataset, index_name)?;
        info!(
            rows = store.row_count(),
            columns = store.column_count(),
            "dataset replaced"
        );
        self.store = store;
        self.visible_rows.clear();
        self.send(OutboundMessage::DataReplaced {
            data: WireDataset::from_store(&self.store),
            row_count: self.store.row_count(),
        });
        Ok(())
    }


    pub fn selection_mode(&self) -> SelectionMode {
        self.selections.mode()
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selections.set_mode(mode);
        self.push_selection_state();
    }

    /// Enable or disable direct cell editing. Enabling editing while
    /// selection is disabled promotes the mode to `cell`, since an
    /// uneditable-unselectable grid cannot take edits from the view.
    pub fn set_editable(&mut self, editable: bool) {
        if editable && self.selections.mode() == SelectionMode::None {
            self.set_selection_mode(SelectionMode::Cell);
        }
        self.editable = editable;
    }

    /// Select an individual cell or a rectangular region.
    ///
    /// A missing second corner collapses the region to the single cell
    /// at `(row1, column1)`. Corners may arrive in any order; the stored
    /// region is normalized. Ignored while selection mode is `none`.
    pub fn select(
        &mut self,
        row1: usize,
        column1: usize,
        row2: Option<usize>,
        column2: Option<usize>,
        clear_mode: ClearMode,
    ) {
        if self.selections.mode() == SelectionMode::None {
            warn!("selection mode is 'none'; ignoring select");
            return;
        }

        let (row2, column2) = match (row2, column2) {
            (Some(row2), Some(column2)) => (row2, column2),
            _ => (row1, column1),
        };

        match clear_mode {
            ClearMode::All => self.selections.clear(),
            ClearMode::Current => {
                self.selections.pop_last();
            }
            ClearMode::None => {}
        }

        self.selections.add(row1, column1, row2, column2);
        debug!(regions = self.selections.len(), "selection added");
        self.push_selection_state();
    }

    /// Clear all selections
    pub fn clear_selection(&mut self) {
        self.selections.clear();
        self.push_selection_state();
    }

    /// Fresh traversal over the selected cells of the bound store
    pub fn selected_cell_iterator(&self) -> SelectionTraversal {
        self.selections.traverse(&self.store)
    }

    /// Every selected cell, insertion order then row-major
    pub fn selected_cells(&self) -> Vec<CellCoord> {
        self.selected_cell_iterator().collect()
    }

    /// Fresh traversal over the selected cells of the visible view.
    ///
    /// The traversal captures the view's extents, so selections clamp
    /// to what the user currently sees rather than the full store.
    pub fn selected_visible_cell_iterator(&self) -> SelectionTraversal {
        self.selections.traverse(&self.visible_data())
    }

    /// Values of every selected cell, read through the visible view so
    /// the result lines up with what the user sees after transforms
    pub fn selected_cell_values(&self) -> Vec<CellValue> {
        let view = self.visible_data();
        let traversal = self.selections.traverse(&view);
        view.values_for(traversal)
    }


    /// Values at `column` for every row matching the primary key.
    ///
    /// Fails fast on key arity mismatch; an unknown column yields an
    /// empty result, letting bulk readers proceed past misses.
    pub fn get_cell_value(
        &self,
        column: &FieldName,
        primary_key: &[CellValue],
    ) -> Result<Vec<CellValue>, DataError> {
        let ordinals = self.store.rows_for_primary_key(primary_key)?;
        Ok(ordinals
            .into_iter()
            .filter_map(|row| self.store.get_cell(column, row).cloned())
            .collect())
    }

    /// Value at `column` for a single row ordinal
    pub fn get_cell_value_by_index(&self, column: &FieldName, row: usize) -> Option<CellValue> {
        self.store.get_cell(column, row).cloned()
    }

    /// Write `value` to `column` in every row matching the primary key.
    ///
    /// Returns false without mutation when no row matches. Otherwise each
    /// matching row is written independently and notified independently;
    /// the aggregate result is false if any matching row lacked the
    /// column, while rows that succeeded remain mutated. Non-atomic by
    /// contract.
    pub fn set_cell_value(
        &mut self,
        column: &FieldName,
        primary_key: &[CellValue],
        value: CellValue,
    ) -> Result<bool, DataError> {
        let ordinals = self.store.rows_for_primary_key(primary_key)?;
        if ordinals.is_empty() {
            return Ok(false);
        }

        let mut outcome = true;
        for row in ordinals {
            if self.store.set_cell(column, row, value.clone()) {
                self.notify_cell_change(row, column, &value);
            } else {
                outcome = false;
            }
        }
        Ok(outcome)
    }

    /// Write `value` to `column` at a row ordinal; bounds-checked
    pub fn set_cell_value_by_index(
        &mut self,
        column: &FieldName,
        row: usize,
        value: CellValue,
    ) -> bool {
        if self.store.set_cell(column, row, value.clone()) {
            self.notify_cell_change(row, column, &value);
            true
        } else {
            false
        }
    }

    /// Write a whole row (data columns, left to right) for every row
    /// matching the primary key. One `row-changed` push per touched row.
    pub fn set_row_value(
        &mut self,
        primary_key: &[CellValue],
        values: &[CellValue],
    ) -> Result<bool, DataError> {
        let ordinals = self.store.rows_for_primary_key(primary_key)?;
        if ordinals.is_empty() {
            return Ok(false);
        }
        if values.len() < self.store.column_count() {
            warn!(
                got = values.len(),
                expected = self.store.column_count(),
                "row value too short; ignoring"
            );
            return Ok(false);
        }

        for row in ordinals {
            for column_index in 0..self.store.column_count() {
                let Some(column) = self.store.column_index_to_name(column_index).cloned() else {
                    break;
                };
                self.store.set_cell(&column, row, values[column_index].clone());
            }
            self.send(OutboundMessage::RowChanged {
                row,
                value: values.to_vec(),
            });
        }
        Ok(true)
    }


    /// Store the transform list for the view to execute.
    ///
    /// Validation only checks that every referenced field exists in the
    /// schema; the descriptors themselves stay opaque. The local store
    /// is never reordered or filtered here.
    pub fn apply_transform(&mut self, transforms: Vec<Transform>) -> Result<(), DataError> {
        for transform in &transforms {
            if !self.store.schema().has_field(transform.column()) {
                return Err(DataError::UnknownField(transform.column().clone()));
            }
        }
        self.transforms = transforms;
        self.push_transform_state();
        Ok(())
    }

    /// Drop all transforms
    pub fn revert_transforms(&mut self) {
        self.transforms.clear();
        self.push_transform_state();
    }

    /// View of whatever the external side last reported visible; the
    /// full dataset when nothing was reported
    pub fn visible_data(&self) -> DataStore {
        if self.visible_rows.is_empty() {
            self.store.clone()
        } else {
            self.store.project(&self.visible_rows)
        }
    }

    /// Notify the view that the underlying data changed in place and it
    /// should re-request whatever it currently shows
    pub fn tick(&self) {
        self.send(OutboundMessage::Tick);
    }

    /// Replace the presentation settings and push them
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        self.send(OutboundMessage::ConfigChanged {
            config: self.config.clone(),
        });
    }


    /// Register a callback fired on every cell change, whichever side
    /// the change originated on
    pub fn on_cell_change<F>(&mut self, callback: F)
    where
        F: FnMut(&CellChangedEvent) + Send + 'static,
    {
        self.cell_change_callbacks.register(callback);
    }

    /// Register a callback fired when the view reports a cell click
    pub fn on_cell_click<F>(&mut self, callback: F)
    where
        F: FnMut(&CellClickEvent) + Send + 'static,
    {
        self.cell_click_callbacks.register(callback);
    }


    /// Apply a message from the view.
    ///
    /// The `cell-changed` arm is the one path where a store mutation
    /// originates externally; it converges on the same local
    /// notification helper as the local setters. The view is not echoed
    /// its own edit.
    pub fn handle_view_message(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::CellChanged {
                row,
                column_index,
                value,
            } => match self.store.column_index_to_name(column_index).cloned() {
                Some(column) => {
                    if self.store.set_cell(&column, row, value.clone()) {
                        self.local_cell_change(row, &column, &value);
                    } else {
                        warn!(row, %column, "view edit targeted a missing cell");
                    }
                }
                None => warn!(column_index, "view edit targeted an unknown column"),
            },
            InboundMessage::CellClick {
                region,
                column,
                column_index,
                row,
                primary_key_row,
                cell_value,
            } => {
                let event = CellClickEvent {
                    region,
                    column,
                    column_index,
                    row,
                    primary_key_row,
                    cell_value,
                };
                self.cell_click_callbacks.emit(&event);
            }
            InboundMessage::DataRequest { r1, r2, c1, c2 } => {
                match WireDataset::window(&self.store, r1, r2, c1, c2) {
                    Ok(value) => self.send(OutboundMessage::DataReply {
                        value,
                        r1,
                        r2,
                        c1,
                        c2,
                    }),
                    Err(error) => warn!(%error, "data request window failed"),
                }
            }
            InboundMessage::VisibleRows { rows } => {
                debug!(count = rows.len(), "visible rows reported");
                self.visible_rows = rows;
            }
        }
    }


    /// Local sink only: used by view-originated edits
    fn local_cell_change(&mut self, row: usize, column: &FieldName, value: &CellValue) {
        let event = CellChangedEvent {
            row,
            column: column.clone(),
            column_index: self.store.column_name_to_index(column),
            value: value.clone(),
        };
        self.cell_change_callbacks.emit(&event);
    }

    /// Both sinks, local first: used by model-originated edits
    fn notify_cell_change(&mut self, row: usize, column: &FieldName, value: &CellValue) {
        self.local_cell_change(row, column, value);
        self.send(OutboundMessage::CellChanged {
            row,
            column: column.clone(),
            column_index: self.store.column_name_to_index(column),
            value: value.clone(),
        });
    }

    fn push_selection_state(&self) {
        self.send(OutboundMessage::SelectionChanged {
            selections: self.selections.regions().to_vec(),
            mode: self.selections.mode(),
        });
    }

    fn push_transform_state(&self) {
        self.send(OutboundMessage::TransformsChanged {
            transforms: self.transforms.clone(),
        });
    }

    fn send(&self, message: OutboundMessage) {
        if let Some(channel) = &self.channel {
            channel.send(&message);
        }
    }
}
