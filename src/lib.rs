//! # toml_tree
//!
//! A parser and generator for a line-oriented, TOML-like configuration
//! format. Text is parsed into a typed document tree that can be queried by
//! dotted key paths, loaded into Rust types through serde, and rendered
//! back to text.
//!
//! ## The Format
//!
//! ```text
//! # comments run to the end of the line
//! title = "TOML Example"
//!
//! [owner]
//! name = "Tom"
//! dob = 1979-05-27T07:32:00-08:00
//!
//! [database]
//! ports = [ 8001, 8001, 8002 ]
//! connection_max = 5000
//! enabled = true
//!
//! [servers.alpha]
//! ip = "10.0.0.1"
//!
//! [clients]
//! data = [ ["gamma", "delta"], [1, 2] ]
//! hosts = [
//!   "alpha",
//!   "omega"
//! ]
//!
//! [[products]]
//! name = "Hammer"
//! sku = 738594937
//!
//! [[products]]
//! name = "Nail"
//! ```
//!
//! Every line is one of: a `[[path]]` table array header, a `[path]` table
//! header, or a `key = value` pair. Values are strings, 64-bit integers,
//! floats with a mandatory fraction, booleans, timestamps and homogeneous
//! arrays. An array may continue over several lines until a line ends
//! with `]`.
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::parse;
//!
//! let doc = parse("[database]\nports = [8001, 8002]\nenabled = true").unwrap();
//!
//! assert_eq!(doc.get_boolean("database.enabled").unwrap(), Some(true));
//! let ports: Vec<i64> = doc.get_list_of("database.ports").unwrap().unwrap();
//! assert_eq!(ports, vec![8001, 8002]);
//!
//! // Missing keys are not errors
//! assert_eq!(doc.get_string("database.user").unwrap(), None);
//! ```
//!
//! ### Typed Loading
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_tree::from_str;
//!
//! #[derive(Deserialize)]
//! struct Product { name: String, sku: Option<u64> }
//!
//! #[derive(Deserialize)]
//! struct Catalog { products: Vec<Product> }
//!
//! let catalog: Catalog = from_str("[[products]]\nname = \"Hammer\"\nsku = 1\n[[products]]\nname = \"Nail\"").unwrap();
//! assert_eq!(catalog.products.len(), 2);
//! assert_eq!(catalog.products[1].sku, None);
//! ```
//!
//! ### Editing and Rendering
//!
//! ```rust
//! use toml_tree::{parse, to_string};
//!
//! let mut doc = parse("[owner]\nname = \"Tom\"").unwrap();
//! doc.replace_string("owner.name", "Tom Preston-Werner").unwrap();
//! assert_eq!(to_string(&doc).unwrap(), "[owner]\nname = \"Tom Preston-Werner\"\n");
//! ```
//!
//! ## Error Reporting
//!
//! Parse errors are line-granular: every error names the 1-based line it was
//! detected on and the offending text. The first error aborts the parse;
//! there is no partial tree.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for sections and multi-line
//! arrays, `trace` for every inserted value) and never installs a
//! subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parsing a document and reading values by path
//! - **`table_arrays.rs`** - Repeated `[[section]]` headers
//! - **`typed_config.rs`** - Loading a config struct through serde
//! - **`custom_options.rs`** - Controlling the rendered layout
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
mod literal;
pub mod node;
pub mod options;
mod parser;
mod path;
mod preprocess;
pub mod ser;
pub mod table;
mod text;
pub mod timestamp;
pub mod value;

pub use de::{from_table, Deserializer};
pub use error::{Error, Result};
pub use node::{Kind, Node, TableArray};
pub use options::WriteOptions;
pub use ser::{to_string, to_string_with_options, Serializer};
pub use table::Table;
pub use timestamp::Timestamp;
pub use value::{Map, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, BufRead};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// A parsed document.
///
/// A `Document` owns the root [`Table`] and dereferences to it, so every
/// path getter is available directly on the document.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Document, Node, Table};
///
/// let doc: Document = "answer = 42".parse().unwrap();
/// assert_eq!(doc.get_integer("answer").unwrap(), Some(42));
///
/// let mut root = Table::new();
/// root.insert("answer", Node::integer(42)).unwrap();
/// assert_eq!(Document::from(root), doc);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Table,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_table(&self) -> &Table {
        &self.root
    }

    #[must_use]
    pub fn into_table(self) -> Table {
        self.root
    }

    /// Renders the document to a writer with default options.
    ///
    /// # Errors
    ///
    /// Fails if the tree cannot be rendered or the writer fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<()> {
        to_writer(writer, &self.root)
    }
}

impl Deref for Document {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Table {
        &mut self.root
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Document { root }
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.root.iter())
    }
}

/// Parses a document from text.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse;
///
/// let doc = parse("[my.key.group]\nmystring = \"x\"").unwrap();
/// assert_eq!(doc.get_string("my.key.group.mystring").unwrap(), Some("x"));
/// ```
///
/// # Errors
///
/// Returns the first syntax, duplicate key, unclosed array or invalid value
/// error, with the line it was found on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Document> {
    parser::parse_lines(input.lines().map(|line| Ok(Cow::Borrowed(line)))).map(Document::from)
}

/// Parses a document from a stream, line by line.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse_reader;
/// use std::io::Cursor;
///
/// let doc = parse_reader(Cursor::new("a = 1\nb = [\n  2,\n  3\n]")).unwrap();
/// assert_eq!(doc.get_list_of::<i64>("b").unwrap(), Some(vec![2, 3]));
/// ```
///
/// # Errors
///
/// Read failures become [`Error::Io`]; otherwise as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(reader: R) -> Result<Document>
where
    R: io::Read,
{
    let lines = io::BufReader::new(reader)
        .lines()
        .map(|line| line.map(Cow::Owned).map_err(Error::from));
    parser::parse_lines(lines).map(Document::from)
}

/// Parses a document from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8; otherwise as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    parse(s)
}

/// Renders a table as a document with sections indented two spaces per
/// level.
///
/// # Errors
///
/// See [`Serializer::serialize_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(table: &Table) -> Result<String> {
    to_string_with_options(table, WriteOptions::pretty())
}

/// Renders a table to a writer.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{parse, to_writer};
///
/// let doc = parse("a = 1").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"a = 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, table: &Table) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, table, WriteOptions::default())
}

/// Renders a table to a writer with custom options.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, table: &Table, options: WriteOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(table, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parses text and deserializes an instance of type `T` from it.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a parse error, or an error if the tree cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(parse(s)?.as_table())
}

/// Parses a stream and deserializes an instance of type `T` from it.
///
/// # Errors
///
/// Returns an error if reading fails, the input does not parse, or the
/// tree cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_table(parse_reader(reader)?.as_table())
}

/// Parses UTF-8 bytes and deserializes an instance of type `T` from them.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, do not parse, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(parse_slice(v)?.as_table())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Cursor;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_parse_and_query() {
        let doc = parse("mystring = \"This is a string\"").unwrap();
        assert_eq!(
            doc.get_string("mystring").unwrap(),
            Some("This is a string")
        );
        assert_eq!(doc.get_string("missing").unwrap(), None);
    }

    #[test]
    fn test_from_str_struct() {
        let point: Point = from_str("x = 1\ny = -2").unwrap();
        assert_eq!(point, Point { x: 1, y: -2 });
    }

    #[test]
    fn test_from_reader_and_slice() {
        let point: Point = from_reader(Cursor::new("x = 3\ny = 4")).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
        let point: Point = from_slice(b"x = 5\ny = 6").unwrap();
        assert_eq!(point, Point { x: 5, y: 6 });
    }

    #[test]
    fn test_parse_slice_rejects_bad_utf8() {
        assert!(parse_slice(&[b'a', b' ', b'=', b' ', 0xff]).is_err());
    }

    #[test]
    fn test_parse_error_aborts() {
        let err = parse("a = 1\nb = [1, \"x\"]\nc = 3").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_document_from_table_and_write_to() {
        let mut root = Table::new();
        root.insert("name", Node::string("x")).unwrap();
        let doc = Document::from(root);

        let mut buffer = Vec::new();
        doc.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "name = \"x\"\n");
        assert_eq!(doc.to_string(), "name = \"x\"\n");
    }

    #[test]
    fn test_document_serializes_as_map() {
        let doc = parse("a = 1\n[t]\nb = [true]").unwrap();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"a":1,"t":{"b":[true]}}"#);
    }

    #[test]
    fn test_to_string_pretty_round_trips() {
        let doc = parse("[a]\nx = 1\n[a.b]\ny = \"z\"").unwrap();
        let text = to_string_pretty(&doc).unwrap();
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_reader_error_surfaces_as_io() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }
        assert!(matches!(parse_reader(Failing), Err(Error::Io(_))));
    }
}
