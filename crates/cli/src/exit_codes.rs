//! CLI Exit Code Registry
//!
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error                                  |
//! | 2    | Usage error (bad arguments, range off-table)   |
//! | 3    | I/O error (missing file, unreadable settings)  |
//! | 4    | Input table could not be parsed                |
//! | 5    | Nothing to report (empty selection, disabled)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, ranges outside the table.
pub const EXIT_USAGE: u8 = 2;

/// File could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Table file is not valid CSV/TSV.
pub const EXIT_PARSE: u8 = 4;

/// Selection handling is disabled, or copy found nothing to copy.
pub const EXIT_NOTHING_SELECTED: u8 = 5;
