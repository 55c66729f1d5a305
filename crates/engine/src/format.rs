//! Locale-aware rendering of statistics.
//!
//! Integers render without a fraction; everything else gets at most two
//! fraction digits, ties rounded away from zero and trailing zeros dropped.
//! The integer part is grouped in threes with the locale's separator.

/// Separators for a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group: char,
    pub decimal: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

impl NumberLocale {
    pub const EN_US: NumberLocale = NumberLocale { group: ',', decimal: '.' };
    pub const DE_DE: NumberLocale = NumberLocale { group: '.', decimal: ',' };
    pub const DE_CH: NumberLocale = NumberLocale { group: '\u{2019}', decimal: '.' };
    pub const FR_FR: NumberLocale = NumberLocale { group: '\u{202f}', decimal: ',' };

    /// Resolve a BCP 47 tag. Falls back on the language subtag, then to en-US.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        match tag.as_str() {
            "de-ch" | "de-li" => return Self::DE_CH,
            "en-us" | "en-gb" | "en" | "" => return Self::EN_US,
            _ => {}
        }

        let language = tag.split('-').next().unwrap_or("");
        match language {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => Self::DE_DE,
            "fr" | "nb" | "sv" | "fi" | "cs" | "pl" | "ru" | "uk" => Self::FR_FR,
            _ => Self::EN_US,
        }
    }
}

/// Format a statistic for display.
pub fn format_number(value: f64, locale: &NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
    }

    // Rounds the shortest round-trip digits: 1.005 shows as 1.01.
    let (int_part, frac_part) = round_to_hundredths(&format!("{}", value.abs()));
    let frac_part = frac_part.trim_end_matches('0');
    let frac_part = (!frac_part.is_empty()).then_some(frac_part);
    let negative = value < 0.0;

    let mut out = String::with_capacity(int_part.len() * 4 / 3 + 4);
    // "-0.001" rounds to zero; never show a negative zero.
    if negative && (int_part.bytes().any(|b| b != b'0') || frac_part.is_some()) {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(locale.group);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(locale.decimal);
        out.push_str(frac);
    }
    out
}

/// Round a plain decimal string to two fraction digits, ties away from zero.
fn round_to_hundredths(digits: &str) -> (String, String) {
    let (int_part, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if frac.len() <= 2 {
        return (int_part.to_string(), frac.to_string());
    }

    let mut kept: Vec<u8> = int_part.bytes().chain(frac.bytes().take(2)).collect();
    if frac.as_bytes()[2] >= b'5' {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let (int_digits, frac_digits) = kept.split_at(kept.len() - 2);
    (
        String::from_utf8_lossy(int_digits).into_owned(),
        String::from_utf8_lossy(frac_digits).into_owned(),
    )
}
