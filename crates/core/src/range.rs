use crate::cell::{CellRef, TableId};

/// A rectangular range of cells inside one table, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub table: TableId,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl SelectionRange {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(table: TableId, r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            table,
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// Rectangle spanned by an anchor and a current cell.
    ///
    /// Returns `None` when the two cells belong to different tables.
    pub fn between(anchor: &CellRef, current: &CellRef) -> Option<Self> {
        if !anchor.same_table(current) {
            return None;
        }
        Some(Self::new(anchor.table, anchor.row, anchor.col, current.row, current.col))
    }

    /// Create a single-cell range.
    pub fn single(cell: &CellRef) -> Self {
        Self::new(cell.table, cell.row, cell.col, cell.row, cell.col)
    }

    /// Check if this range contains a position.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    /// Check if this range contains the cell (same table and inside the rectangle).
    pub fn contains_cell(&self, cell: &CellRef) -> bool {
        cell.table == self.table && self.contains(cell.row, cell.col)
    }

    /// Number of positions in this range. Ragged tables may hold fewer cells.
    pub fn cell_count(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    /// Iterate over all positions in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let start_col = self.start_col;
        let end_col = self.end_col;

        (self.start_row..=self.end_row)
            .flat_map(move |r| (start_col..=end_col).map(move |c| (r, c)))
    }

    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }
}
