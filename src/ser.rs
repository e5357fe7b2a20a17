//! Rendering a document tree back as TOML text.
//!
//! The output is round-trip stable: parsing it again yields a structurally
//! equal tree. Literal and multi-line strings come back out in basic form;
//! comments and layout of the original input are not preserved.

use crate::{Table, Value};

/// Render a document tree as TOML text.
///
/// Direct scalar and array entries of each table come first, one `key =
/// value` assignment per line indented a tab per depth, followed by
/// sub-tables under `[dotted.path]` headers and table arrays as repeated
/// `[[dotted.path]]` sections.
pub fn to_string(root: &Table) -> String {
    let mut out = String::new();
    write_table(&mut out, root, &mut Vec::new());
    out
}

fn write_table(out: &mut String, table: &Table, path: &mut Vec<String>) {
    let depth = path.len();
    for (key, value) in table.iter() {
        if !matches!(value, Value::Table(_) | Value::TableArray(_)) {
            indent(out, depth);
            out.push_str(&key_repr(key));
            out.push_str(" = ");
            write_value(out, value);
            out.push('\n');
        }
    }
    for (key, value) in table.iter() {
        if let Value::Table(child) = value {
            path.push(key.to_string());
            indent(out, depth);
            out.push('[');
            write_header_path(out, path);
            out.push_str("]\n");
            write_table(out, child, path);
            path.pop();
        }
    }
    for (key, value) in table.iter() {
        if let Value::TableArray(children) = value {
            path.push(key.to_string());
            for child in children.iter() {
                indent(out, depth);
                out.push_str("[[");
                write_header_path(out, path);
                out.push_str("]]\n");
                write_table(out, child, path);
            }
            path.pop();
        }
    }
}

fn write_header_path(out: &mut String, path: &[String]) {
    for (i, part) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&key_repr(part));
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Writes the TOML literal form of a single value. Tables render inline;
/// the document printer never reaches those arms, but programmatic trees
/// can hold them anywhere.
pub(crate) fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(&string_repr(s)),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&float_repr(*f)),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Datetime(dt) => out.push_str(&dt.to_string()),
        Value::Array(array) => {
            out.push('[');
            for (i, element) in array.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, element);
            }
            out.push(']');
        }
        Value::Table(table) => write_inline_table(out, table),
        Value::TableArray(tables) => {
            out.push('[');
            for (i, table) in tables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_table(out, table);
            }
            out.push(']');
        }
    }
}

fn write_inline_table(out: &mut String, table: &Table) {
    out.push('{');
    for (i, (key, element)) in table.iter().enumerate() {
        out.push_str(if i > 0 { ", " } else { " " });
        out.push_str(&key_repr(key));
        out.push_str(" = ");
        write_value(out, element);
    }
    out.push_str(if table.is_empty() { "}" } else { " }" });
}

/// Floats print with round-trip precision; integral values keep a `.0` so
/// they parse back as floats.
pub(crate) fn float_repr(f: f64) -> String {
    let mut repr = f.to_string();
    if !repr.contains('.') && !repr.contains('e') && !repr.contains("inf") && !repr.contains("NaN")
    {
        repr.push_str(".0");
    }
    repr
}

fn string_repr(s: &str) -> String {
    let mut repr = String::with_capacity(s.len() + 2);
    repr.push('"');
    for c in s.chars() {
        match c {
            '\\' => repr.push_str("\\\\"),
            '"' => repr.push_str("\\\""),
            '\n' => repr.push_str("\\n"),
            _ => repr.push(c),
        }
    }
    repr.push('"');
    repr
}

fn key_repr(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        string_repr(key)
    }
}
