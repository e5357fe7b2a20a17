//! A TOML table.

use std::collections::{btree_map, BTreeMap};

use crate::{FromValue, Value};

/// A TOML table: a mapping from string keys to values.
///
/// The root of every parsed document is a `Table`. Iteration order is
/// unspecified by contract (currently key order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table(BTreeMap<String, Value>);

impl Table {
    /// Create a new, empty table.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a key-value pair into the table, replacing any existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// If the table contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Get the value for the given key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a mutable reference to the value for the given key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Resolve a dotted key path such as `"server.tls.cert"`.
    ///
    /// The path is split on `.` with no escaping and walked through tables
    /// only; `None` is returned as soon as an intermediate is missing or is
    /// not a table.
    pub fn get_qualified(&self, path: &str) -> Option<&Value> {
        let mut table = self;
        let mut parts = path.split('.').peekable();
        loop {
            let part = parts.next()?;
            let value = table.get(part)?;
            if parts.peek().is_none() {
                return Some(value);
            }
            table = value.as_table()?;
        }
    }

    /// Get the value for the given key, viewed as `T`.
    ///
    /// `None` when the key is missing or the value is of another kind.
    pub fn get_as<'v, T: FromValue<'v>>(&'v self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_value)
    }

    /// Resolve a dotted key path, viewed as `T`.
    pub fn get_qualified_as<'v, T: FromValue<'v>>(&'v self, path: &str) -> Option<T> {
        self.get_qualified(path).and_then(T::from_value)
    }

    /// Get the number of entries in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// If the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator over the key-value pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// If the table holds any entry that is not a sub-table or a table array.
    ///
    /// A table without such entries is purely implicit: it exists only as an
    /// intermediate of a deeper header and may be adopted by a later header.
    pub(crate) fn has_direct_values(&self) -> bool {
        self.0
            .values()
            .any(|v| !matches!(v, Value::Table(_) | Value::TableArray(_)))
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'t> IntoIterator for &'t Table {
    type Item = (&'t str, &'t Value);
    type IntoIter = Iter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the key-value pairs of a table.
#[derive(Debug)]
pub struct Iter<'t> {
    iter: btree_map::Iter<'t, String, Value>,
}

impl<'t> Iter<'t> {
    fn new(table: &'t Table) -> Iter<'t> {
        Iter {
            iter: table.0.iter(),
        }
    }
}

impl<'t> Iterator for Iter<'t> {
    type Item = (&'t str, &'t Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, v)| (k.as_str(), v))
    }
}
