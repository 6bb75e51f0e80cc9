//! Date resolution for loosely-formatted career dates.
//!
//! [`resolve_date`] tries, in order, first match wins:
//! 1. `YYYY-MM-DD`, optionally followed by a `T`/space time part
//! 2. `YYYY-MM` → first of the month
//! 3. `YYYY` → January 1
//! 4. `YYYY-YYYY` (hyphen or en-dash) → January 1 of the first year
//! 5. `[day] month year` with a French month name → first of the month
//! 6. the first standalone `19xx`/`20xx` token → January 1
//! 7. RFC 3339, RFC 2822, `YYYY/MM/DD`, `DD/MM/YYYY`, `DD.MM.YYYY`
//!
//! Anything else is unresolved.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::text::fold;

/// French month names and abbreviations, accents folded away.
const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("janv", 1),
    ("jan", 1),
    ("fevrier", 2),
    ("fevr", 2),
    ("fev", 2),
    ("mars", 3),
    ("mar", 3),
    ("avril", 4),
    ("avr", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("juil", 7),
    ("aout", 8),
    ("septembre", 9),
    ("sept", 9),
    ("sep", 9),
    ("octobre", 10),
    ("oct", 10),
    ("novembre", 11),
    ("nov", 11),
    ("decembre", 12),
    ("dec", 12),
];

const GENERIC_FORMATS: &[&str] = &["%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];

struct Patterns {
    day: Regex,
    month: Regex,
    year: Regex,
    year_range: Regex,
    month_name: Regex,
    any_year: Regex,
    four_digits: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let mut names: Vec<&str> = MONTHS.iter().map(|(name, _)| *name).collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        let month_name = format!(r"\b(?:(?:1er|\d{{1,2}})\s+)?({})\.?\s+(\d{{4}})\b", names.join("|"));

        let compile = |pattern: &str| Regex::new(pattern).expect("valid date pattern");
        Patterns {
            day: compile(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ].*)?$"),
            month: compile(r"^(\d{4})-(\d{1,2})$"),
            year: compile(r"^(\d{4})$"),
            year_range: compile(r"^(\d{4})\s*[-–—]\s*(\d{4})$"),
            month_name: compile(&month_name),
            any_year: compile(r"\b((?:19|20)\d{2})\b"),
            four_digits: compile(r"\b(\d{4})\b"),
        }
    })
}

fn ymd(year: &str, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(variant, _)| *variant == name)
        .map(|(_, month)| *month)
}

/// Resolve free-form date text to a calendar day.
///
/// ```
/// use cabinet_bio::dates::resolve_date;
/// use chrono::NaiveDate;
///
/// let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
/// assert_eq!(resolve_date("2024-03-15"), day(2024, 3, 15));
/// assert_eq!(resolve_date("15 septembre 2024"), day(2024, 9, 1));
/// assert_eq!(resolve_date("circa 2024 appointment"), day(2024, 1, 1));
/// assert_eq!(resolve_date("unknown"), None);
/// ```
pub fn resolve_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let p = patterns();

    if let Some(c) = p.day.captures(text) {
        if let (Ok(month), Ok(day)) = (c[2].parse(), c[3].parse()) {
            if let Some(date) = ymd(&c[1], month, day) {
                return Some(date);
            }
        }
    }
    if let Some(c) = p.month.captures(text) {
        if let Some(date) = c[2].parse().ok().and_then(|month| ymd(&c[1], month, 1)) {
            return Some(date);
        }
    }
    if let Some(c) = p.year.captures(text).or_else(|| p.year_range.captures(text)) {
        if let Some(date) = ymd(&c[1], 1, 1) {
            return Some(date);
        }
    }

    let folded = fold(text);
    if let Some(c) = p.month_name.captures(&folded) {
        if let Some(date) = month_number(&c[1]).and_then(|month| ymd(&c[2], month, 1)) {
            return Some(date);
        }
    }
    if let Some(c) = p.any_year.captures(text) {
        if let Some(date) = ymd(&c[1], 1, 1) {
            return Some(date);
        }
    }

    generic_date(text)
}

fn generic_date(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }
    GENERIC_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Parse a creation timestamp. Naive values are taken as UTC; a bare date
/// resolves to midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    resolve_date(text)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// First standalone four-digit number in `text`.
pub fn find_year(text: &str) -> Option<&str> {
    patterns()
        .four_digits
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
