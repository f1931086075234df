//! Rendering a document tree back to text.
//!
//! This module provides the [`Serializer`] that walks a [`Table`] tree and
//! writes it in the same line-oriented grammar the parser reads.
//!
//! ## Layout
//!
//! For the table at dotted path `P` the serializer writes, in order:
//!
//! - every non-section entry as `key = literal`, in insertion order
//! - every sub-table as a `[P.key]` header followed by its own layout; the
//!   header is left out when the sub-table is not empty and holds nothing
//!   but sections, since the deeper headers recreate it
//! - every table array as one `[[P.key]]` header per entry, each followed
//!   by that entry's layout
//!
//! Sections nest the way the parser builds them: plain tables under plain
//! tables, table arrays under table-array entries. A table array inside a
//! plain table, or a plain table inside a table-array entry, has no header
//! form that reads back to the same tree and is rejected.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toml_tree::{parse, to_string, to_string_pretty};
//!
//! let doc = parse("[server]\nhost = \"localhost\"").unwrap();
//!
//! let text = to_string(&doc).unwrap();
//! assert_eq!(text, "[server]\nhost = \"localhost\"\n");
//!
//! let pretty = to_string_pretty(&doc).unwrap();
//! assert_eq!(pretty, "[server]\n  host = \"localhost\"\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use toml_tree::{parse, Serializer, WriteOptions};
//!
//! let doc = parse("ports = [1, 2]").unwrap();
//! let mut serializer = Serializer::new(WriteOptions::new().with_spaced_arrays(false));
//! serializer.serialize_document(&doc).unwrap();
//! assert_eq!(serializer.into_inner(), "ports = [1,2]\n");
//! ```

use crate::literal::MAX_ARRAY_DEPTH;
use crate::node::format_float;
use crate::parser::is_name;
use crate::{text, Error, Node, Result, Table, WriteOptions};

/// The kind of section a table was reached through.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Table,
    Entry,
}

/// The document serializer.
///
/// Renders a [`Table`] tree into text under the given [`WriteOptions`].
pub struct Serializer {
    output: String,
    options: WriteOptions,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `root` as a whole document.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidValue`] if the tree holds something the
    /// grammar cannot express: a non-finite float, a table inside an inline
    /// array, a mixed array, a key the parser would not accept, or sections
    /// nested in a way no header sequence reproduces.
    pub fn serialize_document(&mut self, root: &Table) -> Result<()> {
        let mut path = Vec::new();
        self.write_body(root, 0)?;
        self.write_sections(root, &mut path, Scope::Root)
    }

    fn write_indent(&mut self, level: usize) {
        for _ in 0..self.options.indent * level {
            self.output.push(' ');
        }
    }

    fn write_body(&mut self, table: &Table, level: usize) -> Result<()> {
        for (key, node) in table.iter().filter(|(_, node)| !node.is_section()) {
            if !is_name(key) || key.contains('#') {
                return Err(Error::invalid_value(key, "key cannot be written"));
            }
            self.write_indent(level);
            self.output.push_str(key);
            self.output.push_str(" = ");
            self.write_literal(node, 0)?;
            self.output.push('\n');
        }
        Ok(())
    }

    fn write_sections<'t>(
        &mut self,
        table: &'t Table,
        path: &mut Vec<&'t str>,
        scope: Scope,
    ) -> Result<()> {
        for (key, node) in table.iter() {
            if let Node::Table(child) = node {
                path.push(key);
                if scope == Scope::Entry {
                    return Err(unreadable_nesting(path, "table inside a table array entry"));
                }
                self.write_table(child, path)?;
                path.pop();
            }
        }

        for (key, node) in table.iter() {
            if let Node::TableArray(tables) = node {
                path.push(key);
                if scope == Scope::Table {
                    return Err(unreadable_nesting(path, "table array inside a table"));
                }
                for entry in tables {
                    self.write_header(path, true)?;
                    self.write_body(entry, path.len())?;
                    self.write_sections(entry, path, Scope::Entry)?;
                }
                path.pop();
            }
        }
        Ok(())
    }

    fn write_table<'t>(&mut self, table: &'t Table, path: &mut Vec<&'t str>) -> Result<()> {
        let implied = !table.is_empty() && table.values().all(Node::is_section);
        if !implied {
            self.write_header(path, false)?;
            self.write_body(table, path.len())?;
        }
        self.write_sections(table, path, Scope::Table)
    }

    fn write_header(&mut self, path: &[&str], array: bool) -> Result<()> {
        if let Some(bad) = path
            .iter()
            .find(|segment| !is_name(segment) || segment.contains('.'))
        {
            return Err(Error::invalid_value(bad, "section name cannot be written"));
        }

        if self.options.section_spacing && !self.output.is_empty() {
            self.output.push('\n');
        }
        self.write_indent(path.len().saturating_sub(1));
        let (open, close) = if array { ("[[", "]]") } else { ("[", "]") };
        self.output.push_str(open);
        self.output.push_str(&path.join("."));
        self.output.push_str(close);
        self.output.push('\n');
        Ok(())
    }

    fn write_literal(&mut self, node: &Node, depth: usize) -> Result<()> {
        match node {
            Node::String(s) => {
                self.output.push('"');
                self.output.push_str(&text::escape(s));
                self.output.push('"');
            }
            Node::Integer(i) => self.output.push_str(&i.to_string()),
            Node::Float(f) if !f.is_finite() => {
                return Err(Error::invalid_value(
                    &format_float(*f),
                    "non-finite floats cannot be written",
                ));
            }
            Node::Float(f) => self.output.push_str(&format_float(*f)),
            Node::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Timestamp(ts) => self.output.push_str(ts.as_str()),
            Node::Array(items) => self.write_array(items, depth)?,
            Node::Table(_) | Node::TableArray(_) => {
                return Err(Error::invalid_value(
                    node.kind().as_str(),
                    "tables cannot be written inside an array",
                ));
            }
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Node], depth: usize) -> Result<()> {
        if depth >= MAX_ARRAY_DEPTH {
            return Err(Error::invalid_value("[...]", "arrays nested too deeply"));
        }
        if let Some(first) = items.first() {
            if items.iter().any(|item| item.kind() != first.kind()) {
                return Err(Error::invalid_value(
                    "[...]",
                    "cannot mix data types in an array",
                ));
            }
        }

        self.output.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(self.options.array_separator());
            }
            self.write_literal(item, depth + 1)?;
        }
        self.output.push(']');
        Ok(())
    }
}

fn unreadable_nesting(path: &[&str], what: &str) -> Error {
    Error::invalid_value(&path.join("."), &format!("{} cannot be written", what))
}

/// Renders a table as a document with default options.
///
/// # Errors
///
/// See [`Serializer::serialize_document`].
pub fn to_string(table: &Table) -> Result<String> {
    to_string_with_options(table, WriteOptions::default())
}

/// Renders a table as a document with custom options.
///
/// # Errors
///
/// See [`Serializer::serialize_document`].
pub fn to_string_with_options(table: &Table, options: WriteOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(table)?;
    Ok(serializer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, TableArray, Timestamp};

    fn render(input: &str) -> String {
        to_string(&parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_scalars_render_as_literals() {
        let mut table = Table::new();
        table.insert("s", Node::string("a\tb \"c\"")).unwrap();
        table.insert("i", Node::integer(-3)).unwrap();
        table.insert("f", Node::float(2.0)).unwrap();
        table.insert("b", Node::boolean(true)).unwrap();
        table
            .insert(
                "t",
                Node::timestamp(Timestamp::parse("1979-05-27T07:32:12Z").unwrap()),
            )
            .unwrap();
        assert_eq!(
            to_string(&table).unwrap(),
            "s = \"a\\tb \\\"c\\\"\"\ni = -3\nf = 2.0\nb = true\nt = 1979-05-27T07:32:12Z\n"
        );
    }

    #[test]
    fn test_body_comes_before_sections() {
        let text = render("[a]\nx = 1\n[a.b]\ny = 2\n[[list]]\nz = 3");
        assert_eq!(text, "[a]\nx = 1\n\n[a.b]\ny = 2\n\n[[list]]\nz = 3\n");
    }

    #[test]
    fn test_implied_header_is_omitted() {
        let text = render("[my.key.group]\nv = 1");
        assert_eq!(text, "[my.key.group]\nv = 1\n");
    }

    #[test]
    fn test_table_array_inside_table_is_rejected() {
        let mut inner = Table::new();
        let tables: TableArray = std::iter::once(Table::new()).collect();
        inner.insert("b", Node::TableArray(tables)).unwrap();
        let mut root = Table::new();
        root.insert("a", Node::Table(inner)).unwrap();

        let err = to_string(&root).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref value, .. } if value == "a.b"));
        assert!(parse("[a]\n[[a.b]]").is_err());
    }

    #[test]
    fn test_table_inside_table_array_entry_is_rejected() {
        let mut entry = Table::new();
        entry.insert("inner", Node::Table(Table::new())).unwrap();
        let mut root = Table::new();
        root.insert("list", Node::TableArray(std::iter::once(entry).collect()))
            .unwrap();

        let err = to_string(&root).unwrap_err();
        assert!(err.to_string().contains("list.inner"));
        assert!(parse("[[list]]\n[list.inner]").is_err());
    }

    #[test]
    fn test_empty_table_keeps_header() {
        assert_eq!(render("[empty]"), "[empty]\n");
    }

    #[test]
    fn test_table_array_entries_each_get_a_header() {
        let text = render("[[p]]\nn = 1\n[[p]]\n[[p]]\nn = 3");
        assert_eq!(text, "[[p]]\nn = 1\n\n[[p]]\n\n[[p]]\nn = 3\n");
    }

    #[test]
    fn test_nested_table_arrays() {
        let text = render("[[a]]\nx = 1\n[[a.b]]\ny = 2");
        assert_eq!(text, "[[a]]\nx = 1\n\n[[a.b]]\ny = 2\n");
    }

    #[test]
    fn test_pretty_indents_by_depth() {
        let doc = parse("top = 1\n[a]\nx = 1\n[a.b]\ny = 2").unwrap();
        let text = to_string_with_options(&doc, WriteOptions::pretty()).unwrap();
        assert_eq!(text, "top = 1\n\n[a]\n  x = 1\n\n  [a.b]\n    y = 2\n");
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let mut table = Table::new();
        table.insert("x", Node::float(f64::NAN)).unwrap();
        assert!(matches!(
            to_string(&table),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_table_inside_array_is_rejected() {
        let mut table = Table::new();
        table
            .insert("x", Node::array(vec![Node::Table(Table::new())]))
            .unwrap();
        let err = to_string(&table).unwrap_err();
        assert!(err.to_string().contains("inside an array"));
    }

    #[test]
    fn test_mixed_array_is_rejected() {
        let mut table = Table::new();
        table
            .insert("x", Node::array(vec![Node::integer(1), Node::string("a")]))
            .unwrap();
        assert!(to_string(&table).is_err());
    }

    #[test]
    fn test_unwritable_key_is_rejected() {
        let mut table = Table::new();
        table.insert("has space", Node::integer(1)).unwrap();
        assert!(to_string(&table).is_err());

        let mut root = Table::new();
        let tables: TableArray = std::iter::once(Table::new()).collect();
        root.insert("a.b", Node::TableArray(tables)).unwrap();
        assert!(to_string(&root).is_err());
    }

    #[test]
    fn test_rendered_text_parses_back() {
        let input = r#"
name = "demo # not a comment"
list = [[1, 2], [3]]
ratio = 10.0

[server.alpha]
ip = "10.0.0.1"

[[fruit]]
name = "apple"

[[fruit.variety]]
name = "red"
"#;
        let doc = parse(input).unwrap();
        let again = parse(&to_string(&doc).unwrap()).unwrap();
        assert_eq!(doc, again);
    }
}
