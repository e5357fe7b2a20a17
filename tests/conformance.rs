//! The JSON-tagged scenarios the stdin driver must produce.

use serde_json::json;
use tomlite::{json::to_tagged_json, parse};

fn tagged(input: &str) -> serde_json::Value {
    to_tagged_json(&parse(input).unwrap())
}

#[test]
fn integer_leaf() {
    assert_eq!(tagged("x = 1"), json!({"x": {"type": "integer", "value": "1"}}));
}

#[test]
fn float_leaf() {
    assert_eq!(tagged("pi = 3.14"), json!({"pi": {"type": "float", "value": "3.14"}}));
}

#[test]
fn bool_leaf() {
    assert_eq!(tagged("flag = true"), json!({"flag": {"type": "bool", "value": "true"}}));
}

#[test]
fn datetime_leaf() {
    assert_eq!(
        tagged("t = 1979-05-27T07:32:00Z"),
        json!({"t": {"type": "datetime", "value": "1979-05-27T07:32:00Z"}})
    );
}

#[test]
fn array_of_integers() {
    assert_eq!(
        tagged("a = [1,2,3]"),
        json!({"a": {"type": "array", "value": [
            {"type": "integer", "value": "1"},
            {"type": "integer", "value": "2"},
            {"type": "integer", "value": "3"},
        ]}})
    );
}

#[test]
fn table_becomes_object() {
    assert_eq!(
        tagged("[srv]\nhost = \"h\"\nport = 80"),
        json!({"srv": {
            "host": {"type": "string", "value": "h"},
            "port": {"type": "integer", "value": "80"},
        }})
    );
}

#[test]
fn table_array_becomes_array_of_objects() {
    assert_eq!(
        tagged("[[pts]]\nx=1\n[[pts]]\nx=2"),
        json!({"pts": [
            {"x": {"type": "integer", "value": "1"}},
            {"x": {"type": "integer", "value": "2"}},
        ]})
    );
}
