//! Detached values for list getters and typed conversion.
//!
//! This module provides the [`Value`] enum, an owned copy of a document node
//! that no longer borrows from the tree. The list getters on [`Table`] hand
//! out `Value`s, and the [`TryFrom`] implementations below turn them into
//! concrete Rust types.
//!
//! A `Value` differs from a [`Node`] in one place: table arrays do not exist
//! as their own variant. They become an [`Value::Array`] of [`Value::Table`]
//! entries, one per `[[path]]` header.
//!
//! ## Usage Patterns
//!
//! ### Converting from Nodes
//!
//! ```rust
//! use toml_tree::{parse, Value};
//!
//! let doc = parse("ports = [8001, 8002]").unwrap();
//! let value = Value::from(doc.get("ports").unwrap());
//! assert_eq!(value.as_array().map(Vec::len), Some(2));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use toml_tree::Value;
//! use std::convert::TryFrom;
//!
//! let port = i64::try_from(Value::from(8001)).unwrap();
//! assert_eq!(port, 8001);
//!
//! assert!(String::try_from(Value::from(8001)).is_err());
//! ```

use crate::node::{format_float, Kind};
use crate::{text, Error, Node, Table, Timestamp};
use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An insertion-ordered map of detached values.
pub type Map = IndexMap<String, Value>;

/// An owned, detached copy of a document node.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Kind, Value};
///
/// let value = Value::from("hello");
/// assert!(value.is_string());
/// assert_eq!(value.kind(), Kind::String);
/// assert_eq!(value.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(Timestamp),
    Array(Vec<Value>),
    Table(Map),
}

impl Value {
    /// Returns the variant tag of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Array(_) => Kind::Array,
            Value::Table(_) => Kind::Table,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float, returns it. Integers are not widened.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Map> {
        match self {
            Value::Table(map) => Some(map),
            _ => None,
        }
    }

    fn mismatch(&self, expected: Kind) -> Error {
        Error::type_mismatch(expected, self.kind())
    }
}

fn detach_table(table: &Table) -> Map {
    table
        .iter()
        .map(|(key, node)| (key.clone(), Value::from(node)))
        .collect()
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::String(s) => Value::String(s.clone()),
            Node::Integer(i) => Value::Integer(*i),
            Node::Float(f) => Value::Float(*f),
            Node::Boolean(b) => Value::Boolean(*b),
            Node::Timestamp(ts) => Value::Timestamp(ts.clone()),
            Node::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Table(table) => Value::Table(detach_table(table)),
            Node::TableArray(tables) => Value::Array(
                tables
                    .iter()
                    .map(|table| Value::Table(detach_table(table)))
                    .collect(),
            ),
        }
    }
}

impl From<&Table> for Value {
    fn from(table: &Table) -> Self {
        Value::Table(detach_table(table))
    }
}

/// Rebuilds a tree node. Maps become tables; keys are unique by
/// construction, so no duplicate can arise.
impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Node::String(s),
            Value::Integer(i) => Node::Integer(i),
            Value::Float(f) => Node::Float(f),
            Value::Boolean(b) => Node::Boolean(b),
            Value::Timestamp(ts) => Node::Timestamp(ts),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Table(map) => Node::Table(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", text::escape(s)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => f.write_str(&format_float(*fl)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Timestamp(ts) => f.write_str(ts.as_str()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Table(_) => write!(f, "{}", Node::from(self.clone())),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Timestamp(ts) => serializer.serialize_str(ts.as_str()),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Table(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a document value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} out of range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Array(items))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(Value::Table(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(Kind::String)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(other.mismatch(Kind::Integer)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(other.mismatch(Kind::Float)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(other.mismatch(Kind::Boolean)),
        }
    }
}

impl TryFrom<Value> for Timestamp {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            other => Err(other.mismatch(Kind::Timestamp)),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(Kind::Array)),
        }
    }
}

impl TryFrom<Value> for Map {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Table(map) => Ok(map),
            other => Err(other.mismatch(Kind::Table)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Timestamp(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Table(value)
    }
}
