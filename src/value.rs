use core::fmt;

use crate::{ser, Array, Datetime, Table, TableArray};

/// A TOML value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string.
    String(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double-precision float.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// An RFC 3339 datetime.
    Datetime(Datetime),
    /// An array of values.
    Array(Array),
    /// A table.
    Table(Table),
    /// An array of tables (the `[[a.b]]` construct).
    TableArray(TableArray),
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string.
    String,
    /// A 64-bit signed integer.
    Integer,
    /// A double-precision float.
    Float,
    /// A boolean.
    Boolean,
    /// An RFC 3339 datetime.
    Datetime,
    /// An array of values.
    Array,
    /// A table.
    Table,
    /// An array of tables.
    TableArray,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Datetime => "datetime",
            ValueKind::Array => "array",
            ValueKind::Table => "table",
            ValueKind::TableArray => "table array",
        })
    }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Datetime(_) => ValueKind::Datetime,
            Value::Array(_) => ValueKind::Array,
            Value::Table(_) => ValueKind::Table,
            Value::TableArray(_) => ValueKind::TableArray,
        }
    }

    /// If this value is a scalar (string, integer, float, boolean or datetime).
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Array(_) | Value::Table(_) | Value::TableArray(_)
        )
    }

    /// If this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// If this value is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If this value is an array of tables.
    pub fn is_table_array(&self) -> bool {
        matches!(self, Value::TableArray(_))
    }

    /// View this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// View this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// View this value as a datetime.
    pub fn as_datetime(&self) -> Option<Datetime> {
        match self {
            Value::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// View this value as an array.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// View this value as a table.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// View this value as an array of tables.
    pub fn as_table_array(&self) -> Option<&TableArray> {
        match self {
            Value::TableArray(ta) => Some(ta),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the TOML literal form of the value; tables render inline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        ser::write_value(&mut out, self);
        f.write_str(&out)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(table)
    }
}

impl From<TableArray> for Value {
    fn from(tables: TableArray) -> Self {
        Value::TableArray(tables)
    }
}

/// A type a [`Value`] can be viewed as.
///
/// Drives the typed lookups ([`Table::get_as`], [`Table::get_qualified_as`])
/// and the bulk array view ([`Array::values_as`]).
pub trait FromValue<'v>: Sized {
    /// Attempt to view `value` as this type.
    fn from_value(value: &'v Value) -> Option<Self>;
}

impl<'v> FromValue<'v> for &'v str {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'v> FromValue<'v> for i64 {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_integer()
    }
}

impl<'v> FromValue<'v> for f64 {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_float()
    }
}

impl<'v> FromValue<'v> for bool {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_bool()
    }
}

impl<'v> FromValue<'v> for Datetime {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_datetime()
    }
}

impl<'v> FromValue<'v> for &'v Array {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_array()
    }
}

impl<'v> FromValue<'v> for &'v Table {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_table()
    }
}

impl<'v> FromValue<'v> for &'v TableArray {
    fn from_value(value: &'v Value) -> Option<Self> {
        value.as_table_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_queries() {
        let value = Value::from(42);
        assert!(value.is_scalar());
        assert_eq!(value.kind(), ValueKind::Integer);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_str(), None);

        let value = Value::Table(Table::new());
        assert!(!value.is_scalar());
        assert!(value.is_table());
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(1.5), Value::Float(1.5));
    }

    #[test]
    fn display_literal_forms() {
        assert_eq!(Value::from("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(Value::from(3.0).to_string(), "3.0");
        assert_eq!(Value::from(false).to_string(), "false");
    }
}
