//! Insertion-ordered tables.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that keeps
//! keys in the order they were defined. The document root is a `Table`, and
//! so is every `[section]` below it.
//!
//! Unlike a plain map, [`Table::insert`] refuses to overwrite: a key may be
//! defined at most once per table.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Node, Table};
//!
//! let mut table = Table::new();
//! table.insert("name", Node::string("Alice")).unwrap();
//! table.insert("age", Node::integer(30)).unwrap();
//!
//! assert!(table.insert("name", Node::string("Bob")).is_err());
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::{ser, Error, Node, Result};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// An ordered mapping from keys to nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table(IndexMap<String, Node>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a node under a key that is not yet defined.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateKey`] if the key already exists; the
    /// table is left unchanged.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Result<()> {
        match self.0.entry(key.into()) {
            Entry::Occupied(entry) => Err(Error::duplicate_key(entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(node);
                Ok(())
            }
        }
    }

    /// Returns the direct child stored under `key`.
    ///
    /// The key is not split on dots; see [`Table::get`] for dotted paths.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns the child under `key`, inserting the node built by `default`
    /// if the key is absent.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Node,
    ) -> &mut Node {
        self.0.entry(key.to_string()).or_insert_with(default)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the children, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the key/child pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Later pairs replace earlier ones with the same key.
impl FromIterator<(String, Node)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Table(iter.into_iter().collect())
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
