//! In-memory table host.
//!
//! Holds any number of tables made of ragged rows of text. Used by the CLI
//! and by tests that need synthetic tables without a rendering engine.

use rustc_hash::FxHashMap;

use crate::cell::{CellHandle, CellRef, TableId};
use crate::host::{CellResolver, TableSource};

/// Where a pointer landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Somewhere inside a table position (which may not hold a cell).
    Cell { table: TableId, row: usize, col: usize },
    /// Outside of every table.
    Outside,
}

#[derive(Debug, Clone)]
struct MemoryTable {
    id: TableId,
    rows: Vec<Vec<CellHandle>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    tables: Vec<MemoryTable>,
    texts: FxHashMap<CellHandle, String>,
    next_table: u64,
    next_cell: u64,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table built from rows of cell texts. Rows may differ in length.
    pub fn add_table<R, S>(&mut self, rows: impl IntoIterator<Item = R>) -> TableId
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next_table += 1;
        let id = TableId(self.next_table);

        let mut handles = Vec::new();
        for row in rows {
            let mut row_handles = Vec::new();
            for text in row {
                self.next_cell += 1;
                let handle = CellHandle(self.next_cell);
                self.texts.insert(handle, text.into());
                row_handles.push(handle);
            }
            handles.push(row_handles);
        }

        self.tables.push(MemoryTable { id, rows: handles });
        id
    }

    /// Replace the text of an existing cell. Returns false if there is no such cell.
    pub fn set_text(
        &mut self,
        table: TableId,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> bool {
        match self.cell_at(table, row, col) {
            Some(cell) => {
                self.texts.insert(cell.cell, text.into());
                true
            }
            None => false,
        }
    }

    pub fn row_count(&self, table: TableId) -> usize {
        self.table(table).map(|t| t.rows.len()).unwrap_or(0)
    }

    /// Number of cells in a row (0 for a missing row).
    pub fn row_len(&self, table: TableId, row: usize) -> usize {
        self.table(table)
            .and_then(|t| t.rows.get(row))
            .map(|r| r.len())
            .unwrap_or(0)
    }

    fn table(&self, id: TableId) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.id == id)
    }
}

impl TableSource for MemoryTables {
    fn cell_at(&self, table: TableId, row: usize, col: usize) -> Option<CellRef> {
        let handle = *self.table(table)?.rows.get(row)?.get(col)?;
        Some(CellRef::new(handle, row, col, table))
    }

    fn text(&self, cell: CellHandle) -> Option<String> {
        self.texts.get(&cell).cloned()
    }
}

impl CellResolver for MemoryTables {
    type Target = HitTarget;

    fn resolve(&self, target: &HitTarget) -> Option<CellRef> {
        match *target {
            HitTarget::Cell { table, row, col } => self.cell_at(table, row, col),
            HitTarget::Outside => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(doc.row_count(t), 2);
        assert_eq!(doc.row_len(t, 1), 1);
        assert!(doc.cell_at(t, 1, 0).is_some());
        assert!(doc.cell_at(t, 1, 1).is_none());
        assert!(doc.cell_at(t, 2, 0).is_none());
    }

    #[test]
    fn test_handles_unique_across_tables() {
        let mut doc = MemoryTables::new();
        let a = doc.add_table(vec![vec!["1"]]);
        let b = doc.add_table(vec![vec!["2"]]);
        let ca = doc.cell_at(a, 0, 0).unwrap();
        let cb = doc.cell_at(b, 0, 0).unwrap();
        assert_ne!(ca.cell, cb.cell);
        assert_eq!(doc.text(cb.cell).as_deref(), Some("2"));
    }

    #[test]
    fn test_resolve_outside() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["x"]]);
        assert!(doc.resolve(&HitTarget::Outside).is_none());
        assert!(doc.resolve(&HitTarget::Cell { table: t, row: 0, col: 0 }).is_some());
        assert!(doc.resolve(&HitTarget::Cell { table: TableId(99), row: 0, col: 0 }).is_none());
    }

    #[test]
    fn test_set_text() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["1"]]);
        assert!(doc.set_text(t, 0, 0, "2"));
        assert!(!doc.set_text(t, 5, 0, "2"));
        let cell = doc.cell_at(t, 0, 0).unwrap();
        assert_eq!(doc.text(cell.cell).as_deref(), Some("2"));
    }
}
