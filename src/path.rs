//! Dotted-path queries on tables.
//!
//! A path such as `"servers.alpha.ip"` is split on `.` and each segment is
//! looked up as a direct child of the table reached so far. Resolution stops
//! with `None` as soon as a segment is absent or an intermediate node is not
//! a table.
//!
//! Every typed getter follows the same contract:
//!
//! - `Ok(None)` when the path does not resolve
//! - `Ok(Some(_))` when it resolves to the requested kind
//! - [`Error::TypeMismatch`] naming the path when it resolves to another kind
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::parse;
//!
//! let doc = parse("[server]\nport = 8080").unwrap();
//! assert_eq!(doc.get_integer("server.port").unwrap(), Some(8080));
//! assert_eq!(doc.get_integer("server.missing").unwrap(), None);
//! assert!(doc.get_string("server.port").is_err());
//! ```

use crate::{Error, Kind, Node, Result, Table, Timestamp, Value};
use chrono::{DateTime, FixedOffset};
use tracing::debug;

impl Table {
    /// Resolves a dotted path to a node.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut node = self.get_key(segments.next()?)?;
        for segment in segments {
            node = match node {
                Node::Table(table) => table.get_key(segment)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Resolves a dotted path to a mutable handle on the node.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut segments = path.split('.');
        let mut node = self.get_key_mut(segments.next()?)?;
        for segment in segments {
            node = match node {
                Node::Table(table) => table.get_key_mut(segment)?,
                _ => return None,
            };
        }
        Some(node)
    }

    fn lookup<'a, T>(
        &'a self,
        path: &str,
        read: impl FnOnce(&'a Node) -> Result<T>,
    ) -> Result<Option<T>> {
        self.get(path)
            .map(read)
            .transpose()
            .map_err(|e| e.for_key(path))
    }

    pub fn get_string(&self, path: &str) -> Result<Option<&str>> {
        self.lookup(path, Node::as_str)
    }

    pub fn get_integer(&self, path: &str) -> Result<Option<i64>> {
        self.lookup(path, Node::as_integer)
    }

    pub fn get_float(&self, path: &str) -> Result<Option<f64>> {
        self.lookup(path, Node::as_float)
    }

    pub fn get_boolean(&self, path: &str) -> Result<Option<bool>> {
        self.lookup(path, Node::as_boolean)
    }

    pub fn get_timestamp(&self, path: &str) -> Result<Option<&Timestamp>> {
        self.lookup(path, Node::as_timestamp)
    }

    /// Resolves a timestamp and interprets it with its offset preserved.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if the node is not a timestamp, or
    /// with [`Error::InvalidValue`] if the literal names a date the calendar
    /// does not have.
    pub fn get_datetime(&self, path: &str) -> Result<Option<DateTime<FixedOffset>>> {
        self.get_timestamp(path)?
            .map(Timestamp::to_datetime)
            .transpose()
    }

    /// Returns any node as text. Strings yield their raw payload, other
    /// nodes their literal form.
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// let doc = parse("name = \"x\"\nport = 80\nratio = 1.5").unwrap();
    /// assert_eq!(doc.get_as_string("name").as_deref(), Some("x"));
    /// assert_eq!(doc.get_as_string("port").as_deref(), Some("80"));
    /// assert_eq!(doc.get_as_string("ratio").as_deref(), Some("1.5"));
    /// ```
    #[must_use]
    pub fn get_as_string(&self, path: &str) -> Option<String> {
        self.get(path).map(Node::as_text)
    }

    /// Returns the elements of an array, or the entries of a table array,
    /// as detached values.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if the node is neither.
    pub fn get_list(&self, path: &str) -> Result<Option<Vec<Value>>> {
        self.lookup(path, |node| match node {
            Node::Array(items) => Ok(items.iter().map(Value::from).collect()),
            Node::TableArray(tables) => Ok(tables.iter().map(Value::from).collect()),
            other => Err(Error::type_mismatch(Kind::Array, other.kind())),
        })
    }

    /// Returns a list with every element converted to `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] if the node is not a list or any
    /// element is not a `T`. Nothing is truncated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// let doc = parse("ports = [8001, 8002]").unwrap();
    /// let ports: Vec<i64> = doc.get_list_of("ports").unwrap().unwrap();
    /// assert_eq!(ports, vec![8001, 8002]);
    ///
    /// assert!(doc.get_list_of::<String>("ports").is_err());
    /// ```
    pub fn get_list_of<T>(&self, path: &str) -> Result<Option<Vec<T>>>
    where
        T: TryFrom<Value, Error = Error>,
    {
        self.get_list(path)?
            .map(|items| items.into_iter().map(T::try_from).collect::<Result<Vec<T>>>())
            .transpose()
            .map_err(|e| e.for_key(path))
    }

    /// Returns the table at `path` as a section view.
    pub fn get_section(&self, path: &str) -> Result<Option<&Table>> {
        self.lookup(path, Node::as_table)
    }

    /// Returns the entries of the table array at `path` as section views.
    pub fn get_sections(&self, path: &str) -> Result<Option<Vec<&Table>>> {
        self.lookup(path, |node| Ok(node.as_table_array()?.iter().collect()))
    }

    /// Replaces the payload of the string at `path` in place.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the path does not resolve and
    /// with [`Error::TypeMismatch`] if it resolves to a non-string. The tree
    /// is unchanged on failure.
    pub fn replace_string(&mut self, path: &str, replacement: impl Into<String>) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| Error::KeyNotFound(path.to_string()))?;
        node.set_string(replacement).map_err(|e| e.for_key(path))?;
        debug!(key = path, "replaced string value");
        Ok(())
    }
}
