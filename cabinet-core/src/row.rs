//! Field lookup over loosely-shaped JSON rows.
//!
//! Backend rows rarely agree on field names: the same logical field may be
//! `title`, `titre` or `role` depending on the table. Each logical field is
//! described by an ordered list of candidate keys and [`RowView`] returns the
//! first candidate that carries a usable value.

use serde_json::{Map, Value};

/// Ordered candidate keys for one logical field.
pub type Candidates = &'static [&'static str];

/// Read-only view over a JSON object row.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RowView<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// View a JSON value as a row. Returns `None` for non-objects.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// First candidate present with a non-null, non-blank value.
    pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| is_present(value))
    }

    /// First candidate rendering to non-empty trimmed text.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(scalar_text)
    }

    /// First candidate convertible to an integer.
    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(integer)
    }

    /// First candidate carrying a boolean-ish value.
    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find_map(flag)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Trimmed text for strings, numbers and booleans.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Integer value of a number or numeric string. Fractions are truncated.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// Boolean-ish value: JSON booleans, numbers (zero is false) and the
/// strings `true/false`, `1/0`, `yes/no`, `oui/non`.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "oui" | "vrai" => Some(true),
            "false" | "0" | "no" | "non" | "faux" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
