//! Normalization of the free-form `details` field.

use std::sync::OnceLock;

use cabinet_core::row::scalar_text;
use regex::Regex;
use serde_json::Value;

/// Markers stripped from the start of each line.
const LEADING_MARKERS: &[char] = &['-', '–', '—', '*', '•', '●', '◦', '▪', '‣'];

/// Line breaks and bullet glyphs separate items. A middle dot only does
/// when spaced on both sides: inside a word it is inclusive writing
/// (`conseiller·ère`).
fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| {
        Regex::new(r"[\r\n•●◦▪‣]|\s·\s").expect("valid details separator pattern")
    })
}

/// Turn a details value into ordered, trimmed, non-empty lines.
///
/// - arrays: each element stringified; objects use their `text` property or
///   all their values joined by spaces; nested arrays are flattened
/// - strings: decoded and recursed when they hold a JSON array/object,
///   otherwise split on bullets and newlines
/// - objects: their `items` property, else their values
/// - null: nothing
///
/// A string that looks like JSON but fails to decode is split like plain
/// text, so its content is kept.
///
/// ```
/// use cabinet_bio::details::normalize_details;
/// use serde_json::json;
///
/// assert_eq!(
///     normalize_details(&json!("• Rapporteur du budget\n- Vice-président")),
///     vec!["Rapporteur du budget", "Vice-président"],
/// );
/// assert_eq!(
///     normalize_details(&json!({"items": [{"text": "A"}, "B"]})),
///     vec!["A", "B"],
/// );
/// ```
pub fn normalize_details(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect(value, &mut out);
    out
}

fn collect(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                collect_item(item, out);
            }
        }
        Value::String(s) => collect_string(s, out),
        Value::Object(map) => match map.get("items") {
            Some(items) => collect(items, out),
            None => map.values().for_each(|v| collect(v, out)),
        },
        other => push(out, scalar_text(other)),
    }
}

fn collect_item(item: &Value, out: &mut Vec<String>) {
    match item {
        Value::Array(_) => collect(item, out),
        Value::Object(map) => {
            let line = match map.get("text").and_then(scalar_text) {
                Some(text) => text,
                None => {
                    let mut parts = Vec::new();
                    map.values().for_each(|v| collect(v, &mut parts));
                    parts.join(" ")
                }
            };
            push(out, Some(line));
        }
        Value::String(s) => push(out, Some(s.clone())),
        other => push(out, scalar_text(other)),
    }
}

fn collect_string(s: &str, out: &mut Vec<String>) {
    let trimmed = s.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(decoded) => return collect(&decoded, out),
            Err(e) => tracing::trace!(error = %e, "details string is not JSON, splitting as text"),
        }
    }
    for line in separators().split(trimmed) {
        let line = line.trim_start_matches(|c: char| LEADING_MARKERS.contains(&c) || c.is_whitespace());
        push(out, Some(line.to_string()));
    }
}

fn push(out: &mut Vec<String>, line: Option<String>) {
    if let Some(line) = line {
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
}
