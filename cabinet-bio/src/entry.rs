use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cabinet_core::row::{Candidates, RowView};

use crate::dates::{parse_timestamp, resolve_date};
use crate::details::normalize_details;
use crate::period::period_label;

/// Candidate keys per logical field, first match wins. The camelCase keys
/// come first so a serialized entry reads back unchanged.
pub mod keys {
    use cabinet_core::row::Candidates;

    pub const ID: Candidates = &["id", "uuid", "parcours_id"];
    pub const CATEGORY: Candidates = &["category", "categorie", "section", "rubrique", "type"];
    pub const TITLE: Candidates = &["title", "titre", "poste", "fonction", "intitule", "role", "label"];
    pub const ORGANIZATION: Candidates = &[
        "organization",
        "organisation",
        "organisme",
        "institution",
        "structure",
        "entreprise",
        "lieu",
    ];
    pub const DETAILS: Candidates = &["details", "detail", "description", "missions", "bullets"];

    pub const START_DATE: Candidates = &["startDate", "start_date", "date_debut", "debut", "start"];
    pub const START_TEXT: Candidates = &["startText", "start_text", "debut_texte", "periode", "period"];
    pub const END_DATE: Candidates = &["endDate", "end_date", "date_fin", "fin", "end"];
    pub const END_TEXT: Candidates = &["endText", "end_text", "fin_texte"];
    /// A bare `date` column is too generic to mean a point-in-time event.
    pub const EVENT_DATE: Candidates = &["eventDate", "event_date", "date_evenement"];
    pub const EVENT_TEXT: Candidates = &["eventText", "event_text", "evenement", "event"];

    pub const IS_CURRENT: Candidates = &["isCurrent", "is_current", "actuel", "current"];
    pub const ONGOING: Candidates = &["ongoing", "en_cours", "is_ongoing", "en_poste"];
    pub const SORT_INDEX: Candidates = &["sortIndex", "sort_index", "ordre", "order", "position", "rang"];
    pub const CREATED_AT: Candidates = &["createdAt", "created_at", "date_creation", "inserted_at"];
    pub const COLOR: Candidates = &["color", "couleur", "colour"];
}

/// One canonical career entry.
///
/// Serializes with camelCase keys; the serialized form normalizes back to
/// an equal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCareerEntry {
    pub id: Option<String>,
    pub category: String,
    pub title: String,
    pub organization: String,
    pub details: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub event_date: Option<NaiveDate>,
    pub event_text: Option<String>,
    /// Raw start text, kept only when it did not resolve to a date.
    pub start_text: Option<String>,
    pub end_text: Option<String>,
    pub is_current: bool,
    pub sort_index: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub color: Option<String>,
}

/// A date field after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DatePoint {
    date: Option<NaiveDate>,
    text: Option<String>,
}

impl DatePoint {
    /// Try every candidate in order; the first that resolves wins. When none
    /// does, keep the first raw text.
    fn read(row: &RowView<'_>, groups: &[Candidates]) -> Self {
        let mut text = None;
        for key in groups.iter().flat_map(|keys| keys.iter()) {
            let Some(raw) = row.text(&[*key]) else {
                continue;
            };
            if let Some(date) = resolve_date(&raw) {
                return Self {
                    date: Some(date),
                    text: None,
                };
            }
            text.get_or_insert(raw);
        }
        Self { date: None, text }
    }
}

impl NormalizedCareerEntry {
    /// Normalize one row. Returns `None` for non-objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        RowView::from_value(value).map(|row| Self::from_row(&row))
    }

    pub fn from_row(row: &RowView<'_>) -> Self {
        let start = DatePoint::read(row, &[keys::START_DATE, keys::START_TEXT]);
        let end = DatePoint::read(row, &[keys::END_DATE, keys::END_TEXT]);
        let event = DatePoint::read(row, &[keys::EVENT_DATE]);

        let is_current = row
            .flag(keys::IS_CURRENT)
            .or_else(|| row.flag(keys::ONGOING))
            .unwrap_or(end.date.is_none());

        Self {
            id: row.text(keys::ID),
            category: row.text(keys::CATEGORY).unwrap_or_default(),
            title: row.text(keys::TITLE).unwrap_or_default(),
            organization: row.text(keys::ORGANIZATION).unwrap_or_default(),
            details: row
                .first(keys::DETAILS)
                .map(normalize_details)
                .unwrap_or_default(),
            start_date: start.date,
            end_date: end.date,
            event_date: event.date,
            event_text: row.text(keys::EVENT_TEXT).or(event.text),
            start_text: start.text,
            end_text: end.text,
            is_current,
            sort_index: row.integer(keys::SORT_INDEX),
            created_at: row
                .text(keys::CREATED_AT)
                .and_then(|raw| parse_timestamp(&raw)),
            color: row.text(keys::COLOR),
        }
    }

    /// Whether the entry carries anything worth showing.
    pub fn is_meaningful(&self) -> bool {
        !self.category.is_empty()
            || !self.title.is_empty()
            || !self.organization.is_empty()
            || self.event_text.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
            || self.event_date.is_some()
    }

    /// Display label for the entry's period. See [`period_label`].
    pub fn period_label(&self) -> String {
        period_label(self)
    }
}

/// Normalize one row, dropping it when it is not an object or carries
/// nothing meaningful.
pub fn normalize_row(value: &Value) -> Option<NormalizedCareerEntry> {
    NormalizedCareerEntry::from_value(value).filter(NormalizedCareerEntry::is_meaningful)
}

/// Normalize a batch of rows. Each row is handled independently.
pub fn normalize_entries(rows: &[Value]) -> Vec<NormalizedCareerEntry> {
    let entries: Vec<_> = rows.iter().filter_map(normalize_row).collect();
    if entries.len() < rows.len() {
        tracing::trace!(
            kept = entries.len(),
            skipped = rows.len() - entries.len(),
            "dropped career rows without content"
        );
    }
    entries
}
