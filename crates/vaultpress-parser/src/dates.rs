//! Date parsing for `date:` front matter values.
//!
//! Formats are tried in a fixed order and the first match wins, so
//! `05/04/2024` is the 5th of April (day-first is tried before month-first).

use chrono::{Month, NaiveDate};

/// Accepted `strftime` formats, in priority order
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d", // 2024-12-20, 2024-1-5
    "%d.%m.%Y", // 20.12.2024
    "%d/%m/%Y", // 20/12/2024
    "%m/%d/%Y", // 12/20/2024
    "%B %d, %Y", // December 20, 2024
    "%d %B %Y", // 20 December 2024
    "%Y%m%d", // 20241220
];

/// chrono's `%B` also accepts `Dec`; only full month names are dates here.
fn month_names_are_full(value: &str) -> bool {
    value
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .all(|word| {
            word.parse::<Month>()
                .is_ok_and(|month| month.name().eq_ignore_ascii_case(word))
        })
}

/// Parse a front matter date. Returns `None` when no format matches or the
/// matched fields do not form a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !month_names_are_full(value) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// `YYYY-MM-DD`, zero padded
pub fn date_prefix(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
