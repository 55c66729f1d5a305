//! Aggregate statistics over the selected cells.
//!
//! Cell text is re-read and re-parsed on every pass, so edits made to the
//! table between gestures always show up.

use selstat_config::Messages;
use selstat_core::{CellKind, CellRef, SelectionSet, TableSource};
use serde::Serialize;

use crate::format::{format_number, NumberLocale};
use crate::number::{parse_number, ParseMode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionStats {
    pub sum: f64,
    pub average: f64,
    pub count: usize,
}

/// Result of an aggregation pass. `Empty` means no member parsed as a
/// number; hosts hide their display instead of showing zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatsResult {
    Empty,
    Numeric(SelectionStats),
}

impl StatsResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, StatsResult::Empty)
    }

    pub fn stats(&self) -> Option<&SelectionStats> {
        match self {
            StatsResult::Empty => None,
            StatsResult::Numeric(stats) => Some(stats),
        }
    }

    pub fn count(&self) -> usize {
        self.stats().map(|s| s.count).unwrap_or(0)
    }

    /// Formatted values, or `None` for the empty state.
    pub fn display(&self, locale: &NumberLocale) -> Option<StatsDisplay> {
        let stats = self.stats()?;
        Some(StatsDisplay {
            average: format_number(stats.average, locale),
            count: stats.count.to_string(),
            sum: format_number(stats.sum, locale),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDisplay {
    pub average: String,
    pub count: String,
    pub sum: String,
}

/// Label/value pairs in status bar order: average, count, sum.
pub fn status_items(display: &StatsDisplay, messages: &Messages) -> [(String, String); 3] {
    [
        (messages.average.clone(), display.average.clone()),
        (messages.count.clone(), display.count.clone()),
        (messages.sum.clone(), display.sum.clone()),
    ]
}

/// One-line rendering, e.g. `Average: 426.02  Count: 3  Sum: 1,278.06`.
pub fn status_line(display: &StatsDisplay, messages: &Messages) -> String {
    status_items(display, messages)
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Reduce the parsed numbers of every member to sum, average and count.
pub fn aggregate<S: TableSource>(
    selection: &SelectionSet,
    source: &S,
    mode: ParseMode,
) -> StatsResult {
    let mut sum = 0.0;
    let mut count = 0usize;

    for cell in selection {
        if let Some(value) = cell_number(cell, source, mode) {
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        return StatsResult::Empty;
    }

    StatsResult::Numeric(SelectionStats {
        sum,
        average: sum / count as f64,
        count,
    })
}

/// Numeric/text classification of each member, for styling.
pub fn classify<S: TableSource>(
    selection: &SelectionSet,
    source: &S,
    mode: ParseMode,
) -> Vec<(CellRef, CellKind)> {
    selection
        .iter()
        .map(|cell| {
            let kind = match cell_number(cell, source, mode) {
                Some(_) => CellKind::Numeric,
                None => CellKind::Text,
            };
            (*cell, kind)
        })
        .collect()
}

fn cell_number<S: TableSource>(cell: &CellRef, source: &S, mode: ParseMode) -> Option<f64> {
    let text = source.text(cell.cell)?;
    parse_number(&text, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use selstat_core::memory::MemoryTables;
    use selstat_core::TableId;

    fn select_row(doc: &MemoryTables, table: TableId, row: usize) -> SelectionSet {
        (0..doc.row_len(table, row))
            .filter_map(|col| doc.cell_at(table, row, col))
            .collect()
    }

    #[test]
    fn test_mixed_cells_lenient() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["$1,234.56", "abc", "42", "1,5"]]);
        let selection = select_row(&doc, t, 0);

        let result = aggregate(&selection, &doc, ParseMode::Lenient);
        let stats = result.stats().copied().unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.sum - 1278.06).abs() < 1e-9);
        assert_eq!((stats.average * 100.0).round() / 100.0, 426.02);

        let display = result.display(&NumberLocale::default()).unwrap();
        assert_eq!(display.sum, "1,278.06");
        assert_eq!(display.average, "426.02");
        assert_eq!(display.count, "3");
    }

    #[test]
    fn test_mixed_cells_strict() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["1,234.56", "42", "1,5", "$3"]]);
        let selection = select_row(&doc, t, 0);

        let result = aggregate(&selection, &doc, ParseMode::Strict);
        let stats = result.stats().copied().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, 43.5);
    }

    #[test]
    fn test_average_tie_rounds_up_for_display() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["0.25", "0"]]);
        let selection = select_row(&doc, t, 0);

        let display = aggregate(&selection, &doc, ParseMode::Lenient)
            .display(&NumberLocale::default())
            .unwrap();
        assert_eq!(display.average, "0.13");
        assert_eq!(display.sum, "0.25");
    }

    #[test]
    fn test_no_numbers_is_empty_state() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["abc", "", "$"]]);
        let selection = select_row(&doc, t, 0);

        let result = aggregate(&selection, &doc, ParseMode::Lenient);
        assert_eq!(result, StatsResult::Empty);
        assert!(result.display(&NumberLocale::default()).is_none());
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_empty_selection_is_empty_state() {
        let doc = MemoryTables::new();
        assert!(aggregate(&SelectionSet::new(), &doc, ParseMode::Lenient).is_empty());
    }

    #[test]
    fn test_edits_are_reflected() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["1", "2"]]);
        let selection = select_row(&doc, t, 0);
        assert_eq!(aggregate(&selection, &doc, ParseMode::Lenient).stats().unwrap().sum, 3.0);

        doc.set_text(t, 0, 1, "10");
        assert_eq!(aggregate(&selection, &doc, ParseMode::Lenient).stats().unwrap().sum, 11.0);
    }

    #[test]
    fn test_count_matches_parseable_members() {
        let mut doc = MemoryTables::new();
        let texts = ["7", "x", "-2.5", "", "1,000", "n/a", "3"];
        let t = doc.add_table(vec![texts.to_vec()]);
        let selection = select_row(&doc, t, 0);

        let expected = texts
            .iter()
            .filter(|s| parse_number(s, ParseMode::Lenient).is_some())
            .count();
        assert_eq!(aggregate(&selection, &doc, ParseMode::Lenient).count(), expected);
    }

    #[test]
    fn test_classify() {
        let mut doc = MemoryTables::new();
        let t = doc.add_table(vec![vec!["5", "five"]]);
        let selection = select_row(&doc, t, 0);
        let mut kinds: Vec<_> = classify(&selection, &doc, ParseMode::Lenient)
            .into_iter()
            .map(|(cell, kind)| (cell.col, kind))
            .collect();
        kinds.sort_by_key(|(col, _)| *col);
        assert_eq!(kinds, vec![(0, CellKind::Numeric), (1, CellKind::Text)]);
    }

    #[test]
    fn test_status_line_uses_labels() {
        let display = StatsDisplay { average: "2".into(), count: "3".into(), sum: "6".into() };
        assert_eq!(status_line(&display, &Messages::default()), "Average: 2  Count: 3  Sum: 6");

        let german =
            Messages::from_map([("average", "Mittelwert"), ("count", "Anzahl"), ("sum", "Summe")]);
        assert_eq!(status_line(&display, &german), "Mittelwert: 2  Anzahl: 3  Summe: 6");
    }
}
