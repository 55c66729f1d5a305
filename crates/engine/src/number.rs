//! Cell text → number.
//!
//! Table data in the wild mixes `1,234.56`, `1.234,56` and `1,5`. Lenient
//! mode guesses which separator is the decimal point from the shape of the
//! text; strict mode only accepts a bare number. Neither is a locale parser.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional minus, digits, at most one separator followed by digits.
static STRICT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+([.,][0-9]+)?$").expect("valid strict number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

impl ParseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// Parse a cell's text. `None` means the cell contributes no number.
pub fn parse_number(text: &str, mode: ParseMode) -> Option<f64> {
    match mode {
        ParseMode::Strict => parse_strict(text),
        ParseMode::Lenient => parse_lenient(text),
    }
}

fn parse_strict(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !STRICT_NUMBER.is_match(trimmed) {
        return None;
    }
    // The lone separator is always the decimal point.
    trimmed.replace(',', ".").parse().ok()
}

fn parse_lenient(text: &str) -> Option<f64> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | ','))
        .collect();
    if clean.is_empty() || clean == "-" {
        return None;
    }

    let normalized = if clean.contains(',') && clean.contains('.') {
        clean.replace(',', "")
    } else if clean.contains(',') {
        let trailing = clean.rsplit(',').next().unwrap_or("");
        if trailing.len() == 3 {
            clean.replace(',', "")
        } else {
            clean.replace(',', ".")
        }
    } else {
        clean
    };

    leading_decimal(&normalized)
}

/// Longest leading decimal literal: `-?digits[.digits]` or `-?.digits`.
/// `"12-3"` reads as 12, `"1.2.3"` as 1.2.
fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = frac_end;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let literal = s[..end].trim_end_matches('.');
    match literal {
        // "-.5" and ".5" are valid prefixes but not valid Rust float syntax
        l if l.starts_with("-.") => format!("-0{}", &l[1..]).parse().ok(),
        l if l.starts_with('.') => format!("0{}", l).parse().ok(),
        l => l.parse().ok(),
    }
}
