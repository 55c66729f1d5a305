use serde::{Deserialize, Serialize};

/// Opaque identity of a table in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(pub u64);

/// Opaque identity of a single cell in the host document.
///
/// Two refs address the same cell iff their handles are equal, regardless
/// of the row/column they were captured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellHandle(pub u64);

/// A resolved table cell: handle, 0-based position and owning table.
///
/// Captured fresh on every pointer event; never cached across moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub cell: CellHandle,
    pub row: usize,
    pub col: usize,
    pub table: TableId,
}

impl CellRef {
    pub fn new(cell: CellHandle, row: usize, col: usize, table: TableId) -> Self {
        Self { cell, row, col, table }
    }

    /// Check if both refs live in the same table.
    pub fn same_table(&self, other: &CellRef) -> bool {
        self.table == other.table
    }
}
