use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RestError;

/// Outcome of a query: data or error, never both.
pub type QueryResult = Result<Payload, RestError>;

/// Data returned by a successful query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// A JSON array.
    Rows(Vec<Value>),
    /// Any other JSON value (an object from an RPC, a scalar).
    Single(Value),
    /// JSON null, an empty body, or a body that was not JSON.
    #[default]
    Null,
}

impl Payload {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(rows) => Payload::Rows(rows),
            Value::Null => Payload::Null,
            other => Payload::Single(other),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }

    /// Rows as a slice. A single value is a one-row slice; null is empty.
    pub fn rows(&self) -> &[Value] {
        match self {
            Payload::Rows(rows) => rows,
            Payload::Single(value) => std::slice::from_ref(value),
            Payload::Null => &[],
        }
    }

    pub fn into_rows(self) -> Vec<Value> {
        match self {
            Payload::Rows(rows) => rows,
            Payload::Single(value) => vec![value],
            Payload::Null => Vec::new(),
        }
    }

    /// Deserialize every row into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, serde_json::Error> {
        self.into_rows()
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn shapes() {
        assert_eq!(
            Payload::from_json(json!([{"id": 1}])).rows().len(),
            1
        );
        assert!(Payload::from_json(Value::Null).is_null());
        assert_eq!(
            Payload::from_json(json!({"ok": true})).into_rows(),
            vec![json!({"ok": true})]
        );
        assert!(Payload::Null.rows().is_empty());
    }

    #[test]
    fn decode_rows() {
        #[derive(Deserialize)]
        struct Row {
            nom: String,
        }

        let rows: Vec<Row> = Payload::from_json(json!([{"nom": "A"}, {"nom": "B"}]))
            .decode()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].nom, "B");
    }
}
