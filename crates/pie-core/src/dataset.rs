// File: crates/pie-core/src/dataset.rs
// Summary: Resolved dataset (column names + rows) and extraction from provider payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

/// One row, keyed by column name.
pub type Row = Map<String, Value>;

/// Rows for one render cycle. Replaced wholesale on every fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        Self { column_names, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.column_names.is_empty()
    }

    /// Extract `metadata.column_names` and `rows` from a provider payload.
    ///
    /// Payloads wrapped in a `result` object (query-API style) are unwrapped
    /// first. Missing sections read as empty; wrongly typed ones are errors.
    pub fn from_payload(payload: Value) -> Result<Self, FetchError> {
        let mut body = match payload {
            Value::Object(map) => map,
            other => {
                return Err(FetchError::MalformedPayload(format!(
                    "expected an object, got {}",
                    kind_of(&other)
                )))
            }
        };
        if let Some(Value::Object(inner)) = body.remove("result") {
            body = inner;
        }

        let column_names = match body.get("metadata").and_then(|m| m.get("column_names")) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|n| match n {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(FetchError::MalformedPayload(format!(
                        "column name must be a string, got {}",
                        kind_of(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(FetchError::MalformedPayload(format!(
                    "column_names must be an array, got {}",
                    kind_of(other)
                )))
            }
        };

        let rows = match body.remove("rows") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(rows)) => rows
                .into_iter()
                .map(|r| match r {
                    Value::Object(row) => Ok(row),
                    other => Err(FetchError::MalformedPayload(format!(
                        "row must be an object, got {}",
                        kind_of(&other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(FetchError::MalformedPayload(format!(
                    "rows must be an array, got {}",
                    kind_of(&other)
                )))
            }
        };

        Ok(Self { column_names, rows })
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
