// Table loading and gesture replay for the headless driver.

use std::path::Path;

use selstat_core::memory::{HitTarget, MemoryTables};
use selstat_core::{TableId, TableSource};
use selstat_engine::{InteractionController, Modifiers};

use crate::CliError;

/// One drag from `anchor` to `corner`, optionally with Ctrl held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub anchor: (usize, usize),
    pub corner: (usize, usize),
    pub additive: bool,
}

impl Gesture {
    /// Parse "B2" or "A1:C10". The drag direction is kept, not normalized.
    pub fn parse(range: &str, additive: bool) -> Result<Self, CliError> {
        let invalid = || {
            CliError::args(format!("invalid range {:?}", range))
                .with_hint("use A1 notation, e.g. B2 or A1:C10")
        };
        let (from, to) = range.split_once(':').unwrap_or((range, range));
        let anchor = grid_position(from).ok_or_else(invalid)?;
        let corner = grid_position(to).ok_or_else(invalid)?;
        Ok(Self { anchor, corner, additive })
    }
}

/// "AB12" -> (11, 27). Column letters are bijective base 26, rows 1-based.
fn grid_position(name: &str) -> Option<(usize, usize)> {
    let name = name.trim();
    let (letters, digits) = name.split_at(name.find(|c: char| !c.is_ascii_alphabetic())?);
    if letters.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let col = letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?.checked_add(usize::from(b.to_ascii_uppercase() - b'A') + 1)
    })?;
    let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
    Some((row, col - 1))
}

fn cell_name((row, col): (usize, usize)) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row + 1)
}

/// Delimiter from an explicit flag, or from the file extension (tab for .tsv).
pub fn resolve_delimiter(path: &Path, explicit: Option<char>) -> Result<u8, CliError> {
    let ch = match explicit {
        Some(ch) => ch,
        None => match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "tsv" || ext == "tab" => '\t',
            _ => ',',
        },
    };
    if !ch.is_ascii() {
        return Err(CliError::args(format!(
            "delimiter must be a single ASCII character, got {:?}",
            ch
        )));
    }
    Ok(ch as u8)
}

/// Read a delimited file into a single in-memory table. Rows may be ragged.
pub fn load_table(path: &Path, delimiter: u8) -> Result<(MemoryTables, TableId), CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    log::debug!("loaded {} rows from {}", rows.len(), path.display());

    let mut tables = MemoryTables::new();
    let table = tables.add_table(rows);
    Ok((tables, table))
}

fn csv_error(path: &Path, e: csv::Error) -> CliError {
    if e.is_io_error() {
        CliError::io(format!("{}: {}", path.display(), e))
    } else {
        CliError::parse(format!("{}: {}", path.display(), e))
    }
}

/// Feed each gesture to the controller as pointer down/move/up.
pub fn replay(
    ctl: &mut InteractionController<MemoryTables>,
    table: TableId,
    gestures: &[Gesture],
) -> Result<(), CliError> {
    for gesture in gestures {
        for corner in [gesture.anchor, gesture.corner] {
            if ctl.host().cell_at(table, corner.0, corner.1).is_none() {
                return Err(CliError::args(format!("{} is outside the table", cell_name(corner))));
            }
        }

        let modifiers = if gesture.additive { Modifiers::CTRL } else { Modifiers::NONE };
        let anchor = HitTarget::Cell { table, row: gesture.anchor.0, col: gesture.anchor.1 };
        let corner = HitTarget::Cell { table, row: gesture.corner.0, col: gesture.corner.1 };

        ctl.pointer_down(&anchor, modifiers);
        ctl.pointer_move(&corner, modifiers);
        ctl.pointer_up();
    }
    Ok(())
}
