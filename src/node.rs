//! The typed document tree.
//!
//! Every value a document can hold is a [`Node`]. Scalars carry their typed
//! payload, [`Node::Array`] holds an ordered sequence of nodes, [`Table`]
//! maps keys to nodes and [`TableArray`] holds the tables produced by
//! repeated `[[path]]` headers.
//!
//! Nodes are built bottom-up by the parser and are owned by exactly one
//! parent container. Constructors take payloads that the caller has already
//! validated; the tree does not re-check them.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Kind, Node};
//!
//! let node = Node::integer(42);
//! assert_eq!(node.kind(), Kind::Integer);
//! assert_eq!(node.as_integer().unwrap(), 42);
//! assert!(node.as_str().is_err());
//! ```

use crate::table::Table;
use crate::timestamp::Timestamp;
use crate::{text, Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// The variant tag of a [`Node`] or [`Value`](crate::Value).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Array,
    Table,
    TableArray,
}

impl Kind {
    /// Returns the lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Timestamp => "timestamp",
            Kind::Array => "array",
            Kind::Table => "table",
            Kind::TableArray => "table array",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(Timestamp),
    Array(Vec<Node>),
    Table(Table),
    TableArray(TableArray),
}

impl Node {
    pub fn string(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    pub fn integer(value: i64) -> Self {
        Node::Integer(value)
    }

    pub fn float(value: f64) -> Self {
        Node::Float(value)
    }

    pub fn boolean(value: bool) -> Self {
        Node::Boolean(value)
    }

    pub fn timestamp(value: Timestamp) -> Self {
        Node::Timestamp(value)
    }

    pub fn array(items: Vec<Node>) -> Self {
        Node::Array(items)
    }

    /// Returns the variant tag of this node.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Node::String(_) => Kind::String,
            Node::Integer(_) => Kind::Integer,
            Node::Float(_) => Kind::Float,
            Node::Boolean(_) => Kind::Boolean,
            Node::Timestamp(_) => Kind::Timestamp,
            Node::Array(_) => Kind::Array,
            Node::Table(_) => Kind::Table,
            Node::TableArray(_) => Kind::TableArray,
        }
    }

    /// Returns `true` for tables and table arrays, which render as sections.
    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Node::Table(_) | Node::TableArray(_))
    }

    fn mismatch(&self, expected: Kind) -> Error {
        Error::type_mismatch(expected, self.kind())
    }

    /// Returns the string payload.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if this is not a string node.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Node::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if this is not an integer node.
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Node::Integer(i) => Ok(*i),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    /// Returns the float payload. Integers are not widened.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if this is not a float node.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Node::Float(f) => Ok(*f),
            _ => Err(self.mismatch(Kind::Float)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self {
            Node::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(Kind::Boolean)),
        }
    }

    pub fn as_timestamp(&self) -> Result<&Timestamp> {
        match self {
            Node::Timestamp(ts) => Ok(ts),
            _ => Err(self.mismatch(Kind::Timestamp)),
        }
    }

    pub fn as_array(&self) -> Result<&[Node]> {
        match self {
            Node::Array(items) => Ok(items),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    pub fn as_table(&self) -> Result<&Table> {
        match self {
            Node::Table(table) => Ok(table),
            _ => Err(self.mismatch(Kind::Table)),
        }
    }

    pub fn as_table_mut(&mut self) -> Result<&mut Table> {
        match self {
            Node::Table(table) => Ok(table),
            _ => Err(self.mismatch(Kind::Table)),
        }
    }

    pub fn as_table_array(&self) -> Result<&TableArray> {
        match self {
            Node::TableArray(tables) => Ok(tables),
            _ => Err(self.mismatch(Kind::TableArray)),
        }
    }

    /// Replaces the payload of a string node in place.
    ///
    /// The shape of the tree is unchanged.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if this is not a string node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Node;
    ///
    /// let mut node = Node::string("old");
    /// node.set_string("new").unwrap();
    /// assert_eq!(node.as_str().unwrap(), "new");
    ///
    /// assert!(Node::integer(1).set_string("x").is_err());
    /// ```
    pub fn set_string(&mut self, replacement: impl Into<String>) -> Result<()> {
        match self {
            Node::String(s) => {
                *s = replacement.into();
                Ok(())
            }
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// Renders the node the way [`Table::get_as_string`] exposes it: strings
    /// yield their raw payload, everything else its literal text.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Node::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Formats a float so that it reads back as a float literal.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut out = value.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::String(s) => write!(f, "\"{}\"", text::escape(s)),
            Node::Integer(i) => write!(f, "{}", i),
            Node::Float(fl) => f.write_str(&format_float(*fl)),
            Node::Boolean(b) => write!(f, "{}", b),
            Node::Timestamp(ts) => f.write_str(ts.as_str()),
            Node::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Node::Table(table) => write!(f, "{}", table),
            Node::TableArray(tables) => {
                for (i, table) in tables.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}", table)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::String(s) => serializer.serialize_str(s),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::Boolean(b) => serializer.serialize_bool(*b),
            Node::Timestamp(ts) => serializer.serialize_str(ts.as_str()),
            Node::Array(items) => serializer.collect_seq(items),
            Node::Table(table) => table.serialize(serializer),
            Node::TableArray(tables) => serializer.collect_seq(tables.iter()),
        }
    }
}

impl From<Table> for Node {
    fn from(value: Table) -> Self {
        Node::Table(value)
    }
}

impl From<TableArray> for Node {
    fn from(value: TableArray) -> Self {
        Node::TableArray(value)
    }
}

/// The ordered tables collected under one `[[path]]` header.
///
/// Insertion is always an append.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableArray(Vec<Table>);

impl TableArray {
    #[must_use]
    pub fn new() -> Self {
        TableArray(Vec::new())
    }

    pub fn push(&mut self, table: Table) {
        self.0.push(table);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Table> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Table> {
        self.0.iter()
    }

    pub fn last_mut(&mut self) -> Option<&mut Table> {
        self.0.last_mut()
    }

    /// Returns the most recently appended table, appending an empty one
    /// first if the array has none yet.
    pub(crate) fn last_or_insert(&mut self) -> &mut Table {
        if self.0.is_empty() {
            self.0.push(Table::new());
        }
        let last = self.0.len() - 1;
        &mut self.0[last]
    }

    pub(crate) fn as_slice(&self) -> &[Table] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TableArray {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Table> for TableArray {
    fn from_iter<T: IntoIterator<Item = Table>>(iter: T) -> Self {
        TableArray(iter.into_iter().collect())
    }
}
