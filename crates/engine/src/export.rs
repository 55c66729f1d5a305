//! TSV export of the selection.

use std::collections::BTreeMap;

use selstat_core::{CellRef, SelectionSet, TableSource};

/// Serialize the selection as tab-separated rows.
///
/// Rows are ordered by row index, cells within a row by column index. Each
/// cell contributes its trimmed text. Callers should not copy an empty
/// selection; if they do, the result is an empty string.
pub fn to_tsv<S: TableSource>(selection: &SelectionSet, source: &S) -> String {
    let mut rows: BTreeMap<usize, Vec<&CellRef>> = BTreeMap::new();
    for cell in selection {
        rows.entry(cell.row).or_default().push(cell);
    }

    rows.into_values()
        .map(|mut cells| {
            cells.sort_by_key(|c| c.col);
            cells
                .iter()
                .map(|c| source.text(c.cell).unwrap_or_default().trim().to_string())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
