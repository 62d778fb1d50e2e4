//! Rectangular cell selections
//!
//! Selections are an ordered list of normalized rectangles over
//! (row, column) space. Order matters: during traversal, earlier regions
//! own any overlap, so a cell is never yielded twice.

mod traversal;

pub use traversal::SelectionTraversal;

use serde::{Deserialize, Serialize};

use crate::data::GridDims;

/// Selection behavior of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selecting a cell selects the whole row
    Row,
    /// Selecting a cell selects the whole column
    Column,
    /// Individual cell selection
    Cell,
    /// Selection disabled
    #[default]
    None,
}

/// A cell coordinate yielded by traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoord {
    /// Row index
    pub r: usize,
    /// Column index
    pub c: usize,
}

/// A rectangular selection over (row, column) space, bounds inclusive.
///
/// Always stored normalized: `r1 <= r2` and `c1 <= c2`. Normalization
/// happens on construction, never assumed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub r1: usize,
    pub c1: usize,
    pub r2: usize,
    pub c2: usize,
}

impl SelectionRegion {
    /// Build a normalized region from two arbitrary corners
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            r1: r1.min(r2),
            c1: c1.min(c2),
            r2: r1.max(r2),
            c2: c1.max(c2),
        }
    }

    /// Inclusive containment check
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.r1 <= cell.r && cell.r <= self.r2 && self.c1 <= cell.c && cell.c <= self.c2
    }

    /// Columns spanned
    pub fn width(&self) -> usize {
        self.c2 - self.c1 + 1
    }

    /// Rows spanned
    pub fn height(&self) -> usize {
        self.r2 - self.r1 + 1
    }

    /// Cells covered
    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Intersection with the store's current extents; `None` when the
    /// region lies entirely outside them.
    pub(crate) fn clamp(&self, rows: usize, columns: usize) -> Option<SelectionRegion> {
        if rows == 0 || columns == 0 || self.r1 >= rows || self.c1 >= columns {
            return None;
        }
        Some(SelectionRegion {
            r1: self.r1,
            c1: self.c1,
            r2: self.r2.min(rows - 1),
            c2: self.c2.min(columns - 1),
        })
    }
}

/// Ordered list of selection regions plus the active selection mode
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    regions: Vec<SelectionRegion>,
    mode: SelectionMode,
}

impl SelectionSet {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            regions: Vec::new(),
            mode,
        }
    }

    /// Normalize and append a region
    pub fn add(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) {
        self.regions.push(SelectionRegion::new(r1, c1, r2, c2));
    }

    /// Remove all regions
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Remove and return the most recently added region
    pub fn pop_last(&mut self) -> Option<SelectionRegion> {
        self.regions.pop()
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn regions(&self) -> &[SelectionRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Start a fresh traversal over the cells covered by this set,
    /// expanded for the active mode against the given store's extents.
    pub fn traverse(&self, dims: &dyn GridDims) -> SelectionTraversal {
        SelectionTraversal::new(self, dims.row_count(), dims.column_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_normalizes_corners() {
        let region = SelectionRegion::new(5, 7, 2, 3);
        assert_eq!(
            region,
            SelectionRegion {
                r1: 2,
                c1: 3,
                r2: 5,
                c2: 7
            }
        );
        assert_eq!(region.height(), 4);
        assert_eq!(region.width(), 5);
    }

    #[test]
    fn test_add_normalizes() {
        let mut selections = SelectionSet::new(SelectionMode::Cell);
        selections.add(3, 4, 1, 2);
        assert_eq!(selections.regions()[0], SelectionRegion::new(1, 2, 3, 4));
    }

    #[test]
    fn test_pop_last_returns_newest() {
        let mut selections = SelectionSet::new(SelectionMode::Cell);
        selections.add(0, 0, 0, 0);
        selections.add(1, 1, 2, 2);
        assert_eq!(selections.pop_last(), Some(SelectionRegion::new(1, 1, 2, 2)));
        assert_eq!(selections.len(), 1);
    }

    #[test]
    fn test_clamp() {
        let region = SelectionRegion::new(1, 1, 9, 9);
        assert_eq!(region.clamp(4, 3), Some(SelectionRegion::new(1, 1, 3, 2)));
        assert_eq!(region.clamp(1, 1), None);
        assert_eq!(region.clamp(0, 5), None);
    }
}
