//! JSON-tagged encoding of a parsed document, for conformance testing.
//!
//! Scalar leaves become `{"type": <kind>, "value": <stringified>}` objects,
//! arrays become `{"type": "array", "value": [...]}`, tables become plain
//! JSON objects and table arrays become JSON arrays of objects.

use serde_json::{json, Map, Value as Json};

use crate::{ser, Table, Value};

/// Encode a document tree in the JSON-tagged conformance form.
pub fn to_tagged_json(table: &Table) -> Json {
    Json::Object(
        table
            .iter()
            .map(|(key, value)| (key.to_string(), value_json(value)))
            .collect::<Map<_, _>>(),
    )
}

fn value_json(value: &Value) -> Json {
    match value {
        Value::Table(table) => to_tagged_json(table),
        Value::TableArray(tables) => Json::Array(tables.iter().map(to_tagged_json).collect()),
        Value::Array(array) => json!({
            "type": "array",
            "value": array.iter().map(value_json).collect::<Vec<_>>(),
        }),
        scalar => json!({
            "type": kind_name(scalar),
            "value": scalar_repr(scalar),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "bool",
        Value::Datetime(_) => "datetime",
        Value::Array(_) | Value::Table(_) | Value::TableArray(_) => {
            unreachable!("containers are encoded structurally")
        }
    }
}

/// The raw stringification of a scalar: the printer's literal form, minus
/// string quoting.
fn scalar_repr(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => ser::float_repr(*f),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(_) | Value::Table(_) | Value::TableArray(_) => {
            unreachable!("containers are encoded structurally")
        }
    }
}
