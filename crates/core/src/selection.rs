use rustc_hash::FxHashMap;

use crate::cell::{CellHandle, CellRef, TableId};
use crate::host::TableSource;
use crate::range::SelectionRange;

/// The set of currently selected cells, keyed by cell handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    cells: FxHashMap<CellHandle, CellRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellHandle) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Insert a cell. Returns true if it was not already a member.
    pub fn insert(&mut self, cell: CellRef) -> bool {
        self.cells.insert(cell.cell, cell).is_none()
    }

    pub fn remove(&mut self, cell: CellHandle) -> bool {
        self.cells.remove(&cell).is_some()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRef> {
        self.cells.values()
    }

    /// Table shared by all members, or `None` when empty.
    pub fn table(&self) -> Option<TableId> {
        self.cells.values().next().map(|c| c.table)
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a CellRef;
    type IntoIter = std::collections::hash_map::Values<'a, CellHandle, CellRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.values()
    }
}

impl FromIterator<CellRef> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = CellRef>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

/// Presentation annotation for a selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Numeric,
    Text,
}

/// Whether observers should be told about a transition.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notify {
    Publish,
    Skip,
}

impl Notify {
    pub fn should_publish(self) -> bool {
        matches!(self, Notify::Publish)
    }
}

/// Selection state machine driven by pointer gestures.
///
/// A gesture is `begin_selection` → any number of `extend_selection` →
/// `end_selection`. All operations are total; input that cannot apply
/// (no gesture in progress, cross-table move) leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: SelectionSet,
    /// Membership when the current gesture began. Additive extends build on it.
    base: SelectionSet,
    anchor: Option<CellRef>,
    selecting: bool,
    range: Option<SelectionRange>,
    kinds: FxHashMap<CellHandle, CellKind>,
    revision: u64,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn anchor(&self) -> Option<&CellRef> {
        self.anchor.as_ref()
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Last rectangle computed for the current (or most recent) gesture.
    pub fn current_range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// Bumped on every membership change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Start a gesture at `cell`.
    ///
    /// Non-additive gestures replace the selection. Additive gestures keep it,
    /// unless it lives in another table (selections never span tables).
    pub fn begin_selection(&mut self, cell: CellRef, additive: bool) -> Notify {
        let other_table = self.selection.table().is_some_and(|t| t != cell.table);
        if !additive || other_table {
            self.selection.clear();
            self.kinds.clear();
        }

        self.base = self.selection.clone();
        self.anchor = Some(cell);
        self.selecting = true;
        self.range = Some(SelectionRange::single(&cell));
        self.selection.insert(cell);
        self.revision += 1;
        Notify::Publish
    }

    /// Move the gesture's current corner to `cell`.
    ///
    /// The rectangle is recomputed from scratch on every call. Non-additive:
    /// membership is exactly the rectangle. Additive: membership is the
    /// gesture's starting membership plus the rectangle.
    pub fn extend_selection<S: TableSource>(
        &mut self,
        cell: CellRef,
        additive: bool,
        source: &S,
    ) -> Notify {
        if !self.selecting {
            return Notify::Skip;
        }
        let Some(anchor) = self.anchor else {
            return Notify::Skip;
        };
        let Some(range) = SelectionRange::between(&anchor, &cell) else {
            return Notify::Skip;
        };

        let mut next = if additive { self.base.clone() } else { SelectionSet::new() };
        for (row, col) in range.cells() {
            if let Some(member) = source.cell_at(range.table, row, col) {
                next.insert(member);
            }
        }

        self.kinds.retain(|handle, _| next.contains(*handle));
        self.selection = next;
        self.range = Some(range);
        self.revision += 1;
        Notify::Publish
    }

    /// Finish the gesture. Membership is unchanged; observers always refresh.
    pub fn end_selection(&mut self) -> Notify {
        self.selecting = false;
        Notify::Publish
    }

    /// Drop every member and the anchor. Always publishes, even when already
    /// empty, so observers can hide their display.
    pub fn clear(&mut self) -> Notify {
        self.selection.clear();
        self.base.clear();
        self.kinds.clear();
        self.anchor = None;
        self.selecting = false;
        self.range = None;
        self.revision += 1;
        Notify::Publish
    }

    /// Annotate a member for styling. Returns false if the cell is not selected.
    pub fn mark_cell_kind(&mut self, cell: CellHandle, kind: CellKind) -> bool {
        if !self.selection.contains(cell) {
            return false;
        }
        self.kinds.insert(cell, kind);
        true
    }

    pub fn cell_kind(&self, cell: CellHandle) -> Option<CellKind> {
        self.kinds.get(&cell).copied()
    }
}
