//! Lazy traversal of selected cells

use super::{CellCoord, SelectionMode, SelectionRegion, SelectionSet};

/// Iterator over every unique cell covered by a [`SelectionSet`].
///
/// Regions are visited in insertion order and enumerated row-major within
/// each region. A cell covered by more than one region is yielded exactly
/// once, owned by the earliest region containing it. Each traversal is a
/// fresh value with its own cursor; restarting means constructing a new
/// one, and no state leaks back into the selection set.
///
/// Row and column counts are captured at construction (they are invariant
/// while the dataset doesn't change) and drive two things: the expansion
/// of regions under `row`/`column` selection modes, and the clamping of
/// every effective rectangle to the store's current extents, so selections
/// that outlived a shrinking dataset simply enumerate nothing.
pub struct SelectionTraversal {
    /// Effective (mode-expanded, clamped) rectangles, insertion order
    rects: Vec<SelectionRegion>,
    rect_index: usize,
    cell_index: usize,
}

impl SelectionTraversal {
    pub fn new(selections: &SelectionSet, rows: usize, columns: usize) -> Self {
        let rects = selections
            .regions()
            .iter()
            .filter_map(|region| Self::effective_rect(*region, selections.mode(), rows, columns))
            .collect();
        Self {
            rects,
            rect_index: 0,
            cell_index: 0,
        }
    }

    /// Expand a stored region for the selection mode, then intersect it
    /// with the store extents. `None` means the region covers no cells.
    fn effective_rect(
        region: SelectionRegion,
        mode: SelectionMode,
        rows: usize,
        columns: usize,
    ) -> Option<SelectionRegion> {
        let expanded = match mode {
            SelectionMode::Row => SelectionRegion {
                r1: region.r1,
                c1: 0,
                r2: region.r2,
                c2: columns.checked_sub(1)?,
            },
            SelectionMode::Column => SelectionRegion {
                r1: 0,
                c1: region.c1,
                r2: rows.checked_sub(1)?,
                c2: region.c2,
            },
            SelectionMode::Cell | SelectionMode::None => region,
        };
        expanded.clamp(rows, columns)
    }

    /// Row-major linear index into a rectangle
    fn index_to_cell(rect: &SelectionRegion, index: usize) -> Option<CellCoord> {
        if index >= rect.cell_count() {
            return None;
        }
        Some(CellCoord {
            r: rect.r1 + index / rect.width(),
            c: rect.c1 + index % rect.width(),
        })
    }

    /// A cell already yielded by an earlier rectangle is skipped
    fn in_earlier_rect(&self, cell: CellCoord) -> bool {
        self.rects[..self.rect_index]
            .iter()
            .any(|rect| rect.contains(cell))
    }
}

impl Iterator for SelectionTraversal {
    type Item = CellCoord;

    fn next(&mut self) -> Option<CellCoord> {
        loop {
            let rect = self.rects.get(self.rect_index)?;
            match Self::index_to_cell(rect, self.cell_index) {
                None => {
                    self.rect_index += 1;
                    self.cell_index = 0;
                }
                Some(cell) => {
                    self.cell_index += 1;
                    if !self.in_earlier_rect(cell) {
                        return Some(cell);
                    }
                }
            }
        }
    }
}
