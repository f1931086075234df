//! Typed loading through serde.
//!
//! This module provides a [`Deserializer`] that reads Rust data structures
//! out of an already parsed tree. Strings and timestamps are handed to the
//! visitor borrowed from the tree, so `&str` fields work without copying.
//!
//! ## Mapping
//!
//! | Node           | serde data model                      |
//! |----------------|---------------------------------------|
//! | string         | `str`                                 |
//! | integer        | `i64`                                 |
//! | float          | `f64`                                 |
//! | boolean        | `bool`                                |
//! | timestamp      | `str` holding the literal text        |
//! | array          | sequence                              |
//! | table          | map (or struct)                       |
//! | table array    | sequence of maps                      |
//!
//! Absent keys deserialize as `None` for `Option` fields. Enums are read
//! from a string (unit variants) or from a table with a single key naming
//! the variant.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toml_tree::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { server: Server }
//!
//! let config: Config = from_str("[server]\nhost = \"db\"\nport = 5432").unwrap();
//! assert_eq!(config.server.port, 5432);
//! ```

use crate::{Error, Node, Result, Table};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, Deserialize};
use serde::forward_to_deserialize_any;

#[derive(Clone, Copy)]
enum Input<'de> {
    Node(&'de Node),
    Table(&'de Table),
}

/// A deserializer reading from a borrowed document tree.
///
/// Created with [`Deserializer::from_table`] for a document or section, or
/// [`Deserializer::from_node`] for a single node.
pub struct Deserializer<'de> {
    input: Input<'de>,
}

impl<'de> Deserializer<'de> {
    pub fn from_table(table: &'de Table) -> Self {
        Deserializer {
            input: Input::Table(table),
        }
    }

    pub fn from_node(node: &'de Node) -> Self {
        Deserializer {
            input: Input::Node(node),
        }
    }
}

/// Deserializes a value of type `T` from a parsed table.
///
/// # Errors
///
/// Fails with [`Error::Custom`] if the tree does not have the shape `T`
/// expects.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{from_table, parse};
/// use std::collections::HashMap;
///
/// let doc = parse("a = 1\nb = 2").unwrap();
/// let map: HashMap<String, i64> = from_table(&doc).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
pub fn from_table<'de, T>(table: &'de Table) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::from_table(table))
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let node = match self.input {
            Input::Table(table) => return visitor.visit_map(MapDeserializer::new(table)),
            Input::Node(node) => node,
        };
        match node {
            Node::String(s) => visitor.visit_borrowed_str(s),
            Node::Integer(i) => visitor.visit_i64(*i),
            Node::Float(f) => visitor.visit_f64(*f),
            Node::Boolean(b) => visitor.visit_bool(*b),
            Node::Timestamp(ts) => visitor.visit_borrowed_str(ts.as_str()),
            Node::Array(items) => {
                visitor.visit_seq(SeqDeserializer::new(items.iter().map(Input::Node)))
            }
            Node::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            Node::TableArray(tables) => {
                visitor.visit_seq(SeqDeserializer::new(tables.iter().map(Input::Table)))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let table = match self.input {
            Input::Node(Node::String(variant)) => {
                return visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: None,
                })
            }
            Input::Node(Node::Table(table)) | Input::Table(table) => table,
            Input::Node(other) => {
                return Err(Error::custom(format!(
                    "expected string or table for enum, found {}",
                    other.kind()
                )))
            }
        };

        let mut entries = table.iter();
        match (entries.next(), entries.next()) {
            (Some((variant, value)), None) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: Some(value),
            }),
            _ => Err(Error::custom(
                "expected a table with exactly one key for enum",
            )),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

struct SeqDeserializer<I> {
    iter: I,
}

impl<I> SeqDeserializer<I> {
    fn new(iter: I) -> Self {
        SeqDeserializer { iter }
    }
}

impl<'de, I> de::SeqAccess<'de> for SeqDeserializer<I>
where
    I: Iterator<Item = Input<'de>>,
{
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(input) => seed.deserialize(Deserializer { input }).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer<'de> {
    iter: indexmap::map::Iter<'de, String, Node>,
    value: Option<&'de Node>,
}

impl<'de> MapDeserializer<'de> {
    fn new(table: &'de Table) -> Self {
        MapDeserializer {
            iter: table.iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(key.as_str()))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(Deserializer::from_node(node)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer<'de> {
    variant: &'de str,
    value: Option<&'de Node>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer<'de> {
    value: Option<&'de Node>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(_) => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(node) => seed.deserialize(Deserializer::from_node(node)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Node::Array(items)) => {
                visitor.visit_seq(SeqDeserializer::new(items.iter().map(Input::Node)))
            }
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Node::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
