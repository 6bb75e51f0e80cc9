use chrono::{Datelike, NaiveDate};

use crate::dates::find_year;
use crate::entry::NormalizedCareerEntry;
use crate::text::capitalize;

/// Display label for an entry's period.
///
/// Events show their single point. Otherwise start and end are rendered as
/// years when possible and joined with an en-dash; a lone start on a
/// current entry reads `Depuis {start}`.
///
/// ```
/// use cabinet_bio::{period_label, NormalizedCareerEntry};
/// use chrono::NaiveDate;
///
/// let entry = NormalizedCareerEntry {
///     start_date: NaiveDate::from_ymd_opt(2017, 5, 17),
///     end_date: NaiveDate::from_ymd_opt(2020, 7, 3),
///     ..Default::default()
/// };
/// assert_eq!(period_label(&entry), "2017 – 2020");
/// ```
pub fn period_label(entry: &NormalizedCareerEntry) -> String {
    if entry.event_text.is_some() || entry.event_date.is_some() {
        return point_label(entry.event_date, entry.event_text.as_deref()).unwrap_or_default();
    }

    let start = point_label(entry.start_date, entry.start_text.as_deref());
    let end = point_label(entry.end_date, entry.end_text.as_deref());

    match (start, end) {
        (Some(start), Some(end)) if start == end => start,
        (Some(start), Some(end)) => format!("{start} – {end}"),
        (Some(start), None) if entry.is_current => format!("Depuis {start}"),
        (Some(start), None) => start,
        (None, Some(end)) => end,
        (None, None) => String::new(),
    }
}

fn point_label(date: Option<NaiveDate>, text: Option<&str>) -> Option<String> {
    if let Some(date) = date {
        return Some(date.year().to_string());
    }
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    Some(match find_year(text) {
        Some(year) => year.to_string(),
        None => capitalize(text),
    })
}
