//! Layering an override document on top of a base document.

use std::path::Path;

use log::debug;

use crate::error::{Error, MergeError};
use crate::{parse_file, Table, Value};

/// Parse `base_path` and `override_path` and merge the override document
/// onto the base.
///
/// For each key of the override table: a key absent from the base is
/// inserted when `allow_additions` is true and silently skipped otherwise;
/// when both sides are tables they merge recursively; any other pair of
/// like-shaped values is replaced by the override. A table on exactly one
/// side is a merge conflict.
pub fn parse_base_and_override<P: AsRef<Path>>(
    base_path: P,
    override_path: P,
    allow_additions: bool,
) -> Result<Table, Error> {
    let mut base = parse_file(&base_path)?;
    let overlay = parse_file(&override_path)?;
    debug!(
        "merging {} onto {}",
        override_path.as_ref().display(),
        base_path.as_ref().display()
    );
    merge_into(&mut base, overlay, allow_additions)?;
    Ok(base)
}

/// Merge `overlay` onto `base`, as described on [`parse_base_and_override`].
pub fn merge_into(base: &mut Table, overlay: Table, allow_additions: bool) -> Result<(), Error> {
    merge_tables(base, overlay, allow_additions, &mut Vec::new())
}

fn merge_tables(
    base: &mut Table,
    overlay: Table,
    allow_additions: bool,
    path: &mut Vec<String>,
) -> Result<(), Error> {
    for (key, value) in overlay {
        if !base.contains_key(&key) {
            if allow_additions {
                base.insert(key, value);
            }
            continue;
        }
        path.push(key.clone());
        let existing = base.get_mut(&key).expect("presence checked above");
        match (existing, value) {
            (Value::Table(base_table), Value::Table(overlay_table)) => {
                merge_tables(base_table, overlay_table, allow_additions, path)?;
            }
            (Value::Table(_), _) | (_, Value::Table(_)) => {
                return Err(Error::Merge(MergeError::new(path.join("."))));
            }
            (slot, value) => *slot = value,
        }
        path.pop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn merged(base: &str, overlay: &str, allow_additions: bool) -> Result<Table, Error> {
        let mut base = parse(base).unwrap();
        let overlay = parse(overlay).unwrap();
        merge_into(&mut base, overlay, allow_additions)?;
        Ok(base)
    }

    #[test]
    fn override_replaces_scalars() {
        let doc = merged("x = 1\ny = 2\n", "y = 20\n", false).unwrap();
        assert_eq!(doc.get_as::<i64>("x"), Some(1));
        assert_eq!(doc.get_as::<i64>("y"), Some(20));
    }

    #[test]
    fn tables_merge_recursively() {
        let doc = merged(
            "[srv]\nhost = \"a\"\nport = 80\n",
            "[srv]\nport = 8080\n",
            false,
        )
        .unwrap();
        assert_eq!(doc.get_qualified_as::<&str>("srv.host"), Some("a"));
        assert_eq!(doc.get_qualified_as::<i64>("srv.port"), Some(8080));
    }

    #[test]
    fn additions_honor_the_flag() {
        let doc = merged("x = 1\n", "y = 2\n[t]\nz = 3\n", true).unwrap();
        assert_eq!(doc.get_as::<i64>("y"), Some(2));
        assert_eq!(doc.get_qualified_as::<i64>("t.z"), Some(3));

        let doc = merged("x = 1\n", "y = 2\n[t]\nz = 3\n", false).unwrap();
        assert!(!doc.contains_key("y"));
        assert!(!doc.contains_key("t"));
        assert_eq!(doc.get_as::<i64>("x"), Some(1));
    }

    #[test]
    fn arrays_replace_wholesale() {
        let doc = merged("a = [1, 2, 3]\n", "a = [9]\n", false).unwrap();
        assert_eq!(
            doc.get_as::<&crate::Array>("a").unwrap().values_as::<i64>(),
            vec![Some(9)]
        );
    }

    #[test]
    fn scalar_kind_change_is_replacement() {
        let doc = merged("x = 1\n", "x = \"one\"\n", false).unwrap();
        assert_eq!(doc.get_as::<&str>("x"), Some("one"));
    }

    #[test]
    fn table_vs_value_conflicts() {
        let err = merged("[srv]\nport = 80\n", "srv = 1\n", false).unwrap_err();
        match err {
            Error::Merge(e) => assert_eq!(e.path(), "srv"),
            other => panic!("expected a merge conflict, got {other:?}"),
        }
        let err = merged("[a]\n[a.b]\nx = 1\n", "[a]\nb = 2\n", false).unwrap_err();
        match err {
            Error::Merge(e) => assert_eq!(e.path(), "a.b"),
            other => panic!("expected a merge conflict, got {other:?}"),
        }
    }
}
