//! Value folding and date parsing shared by the parser and the matcher.

use chrono::{Local, NaiveDate, TimeZone};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds `text` for case and diacritic insensitive comparison.
///
/// The text is decomposed (NFD), combining marks are dropped and the rest
/// is lowercased, so "Björk" and "BJORK" both fold to "bjork". Clause values
/// are folded once at parse time, tag values on every comparison, so both
/// sides always go through this function.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Parses a `YYYY-MM-DD` date to the local midnight epoch.
///
/// Returns `None` for anything else, and for dates landing on epoch zero
/// since zero is never a usable lower bound.
pub fn parse_date(text: &str) -> Option<i64> {
    if text.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let epoch = Local.from_local_datetime(&midnight).earliest()?.timestamp();
    (epoch != 0).then_some(epoch)
}
