//! Capabilities the embedding layer provides so the core never touches a
//! rendering engine directly.

use crate::cell::{CellHandle, CellRef, TableId};

/// Read access to the tables of the host document.
pub trait TableSource {
    /// The cell at a position, or `None` if the row or cell does not exist
    /// (ragged rows, out-of-range positions).
    fn cell_at(&self, table: TableId, row: usize, col: usize) -> Option<CellRef>;

    /// Visible text content of a cell. `None` if the handle is stale.
    fn text(&self, cell: CellHandle) -> Option<String>;
}

/// Maps a raw pointer target to the table cell it lands in.
pub trait CellResolver {
    type Target;

    /// `None` when the target is not inside a cell of some table.
    fn resolve(&self, target: &Self::Target) -> Option<CellRef>;
}
