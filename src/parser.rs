//! Structural parsing.
//!
//! The parser walks preprocessed lines in order and keeps a cursor to the
//! table that key/value lines currently land in. Each line is tried against
//! these shapes, first match wins:
//!
//! 1. `[[a.b.c]]` opens a new entry of a table array
//! 2. `[a.b.c]` opens (or re-opens) a table
//! 3. `key = value` inserts a value into the current table
//!
//! Anything else is a syntax error. An array value that opens with `[` but
//! does not close on its line keeps consuming lines until one ends with `]`.

use crate::literal::parse_value;
use crate::node::TableArray;
use crate::preprocess::strip_comment_and_whitespace;
use crate::{Error, Node, Result, Table};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Parses a sequence of raw lines into a document root.
pub(crate) fn parse_lines<'a, I>(lines: I) -> Result<Table>
where
    I: IntoIterator<Item = Result<Cow<'a, str>>>,
{
    Parser::new(lines.into_iter()).parse()
}

/// One step from a table to the table below it.
#[derive(Debug)]
enum Step {
    /// Into the table stored under the key.
    Table(String),
    /// Into the last table of the table array stored under the key.
    LastOf(String),
}

/// Path from the root to the table key/value lines are inserted into.
#[derive(Debug, Default)]
struct Cursor(Vec<Step>);

impl Cursor {
    fn resolve<'t>(&self, root: &'t mut Table) -> Result<&'t mut Table> {
        let mut table = root;
        for step in &self.0 {
            table = match step {
                Step::Table(key) => match table.get_key_mut(key) {
                    Some(Node::Table(child)) => child,
                    _ => return Err(Error::custom(format!("section '{}' vanished", key))),
                },
                Step::LastOf(key) => match table.get_key_mut(key) {
                    Some(Node::TableArray(tables)) => tables.last_or_insert(),
                    _ => return Err(Error::custom(format!("section '{}' vanished", key))),
                },
            };
        }
        Ok(table)
    }
}

/// Numbered, preprocessed, non-blank lines.
struct LineSource<I> {
    lines: I,
    number: usize,
}

impl<'a, I> LineSource<I>
where
    I: Iterator<Item = Result<Cow<'a, str>>>,
{
    fn next_line(&mut self) -> Result<Option<(usize, Cow<'a, str>)>> {
        for raw in self.lines.by_ref() {
            let raw = raw?;
            self.number += 1;
            let first = self.number == 1;
            if let Some(line) = strip(raw, first) {
                return Ok(Some((self.number, line)));
            }
        }
        Ok(None)
    }
}

fn strip(raw: Cow<'_, str>, first: bool) -> Option<Cow<'_, str>> {
    fn clean(line: &str, first: bool) -> Option<&str> {
        let line = if first {
            line.trim_start_matches('\u{feff}')
        } else {
            line
        };
        strip_comment_and_whitespace(line)
    }

    match raw {
        Cow::Borrowed(line) => clean(line, first).map(Cow::Borrowed),
        Cow::Owned(line) => clean(&line, first).map(|stripped| Cow::Owned(stripped.to_string())),
    }
}

struct Parser<I> {
    source: LineSource<I>,
    root: Table,
    cursor: Cursor,
}

impl<'a, I> Parser<I>
where
    I: Iterator<Item = Result<Cow<'a, str>>>,
{
    fn new(lines: I) -> Self {
        Parser {
            source: LineSource { lines, number: 0 },
            root: Table::new(),
            cursor: Cursor::default(),
        }
    }

    fn parse(mut self) -> Result<Table> {
        while let Some((number, line)) = self.source.next_line()? {
            self.parse_line(number, &line)?;
        }
        debug!(
            lines = self.source.number,
            keys = self.root.len(),
            "parsed document"
        );
        Ok(self.root)
    }

    fn parse_line(&mut self, number: usize, line: &str) -> Result<()> {
        if let Some(path) = array_of_tables_header(line) {
            return self.open_table_array(number, line, path);
        }
        if let Some(path) = table_header(line) {
            return self.open_table(number, line, path);
        }
        if let Some((key, value)) = key_value(line) {
            return self.insert_key_value(number, key, value);
        }
        Err(Error::syntax(number, line))
    }

    fn open_table(&mut self, number: usize, line: &str, path: &str) -> Result<()> {
        let segments = split_path(number, line, path)?;
        let mut steps = Vec::with_capacity(segments.len());
        let mut table = &mut self.root;

        for segment in segments {
            table = match table.get_or_insert_with(segment, || Node::Table(Table::new())) {
                Node::Table(child) => child,
                _ => return Err(Error::duplicate_key(path).at_line(number)),
            };
            steps.push(Step::Table(segment.to_string()));
        }

        debug!(line = number, path, "opened table");
        self.cursor = Cursor(steps);
        Ok(())
    }

    fn open_table_array(&mut self, number: usize, line: &str, path: &str) -> Result<()> {
        let segments = split_path(number, line, path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::syntax(number, line));
        };
        let mut steps = Vec::with_capacity(segments.len());
        let mut table = &mut self.root;

        for segment in parents {
            table = match table.get_or_insert_with(segment, || Node::TableArray(TableArray::new()))
            {
                Node::TableArray(tables) => tables.last_or_insert(),
                _ => return Err(Error::duplicate_key(path).at_line(number)),
            };
            steps.push(Step::LastOf(segment.to_string()));
        }

        match table.get_or_insert_with(last, || Node::TableArray(TableArray::new())) {
            Node::TableArray(tables) => tables.push(Table::new()),
            _ => return Err(Error::duplicate_key(path).at_line(number)),
        }
        steps.push(Step::LastOf(last.to_string()));

        debug!(line = number, path, "opened table array entry");
        self.cursor = Cursor(steps);
        Ok(())
    }

    fn insert_key_value(&mut self, number: usize, key: &str, value: &str) -> Result<()> {
        if self.cursor.resolve(&mut self.root)?.contains_key(key) {
            return Err(Error::duplicate_key(key).at_line(number));
        }

        let node = if value.starts_with('[') && !value.ends_with(']') {
            let literal = self.read_multiline_array(number, value)?;
            parse_value(&literal)
        } else {
            parse_value(value)
        }
        .map_err(|e| e.at_line(number))?;

        trace!(line = number, key, kind = %node.kind(), "inserted value");
        self.cursor
            .resolve(&mut self.root)?
            .insert(key, node)
            .map_err(|e| e.at_line(number))
    }

    fn read_multiline_array(&mut self, start: usize, first: &str) -> Result<String> {
        let mut literal = first.to_string();
        let mut count = 1;

        while let Some((_, line)) = self.source.next_line()? {
            literal.push_str(&line);
            count += 1;
            if line.ends_with(']') {
                debug!(line = start, lines = count, "assembled multi-line array");
                return Ok(literal);
            }
        }

        Err(Error::UnclosedArray { line: start })
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '_' | '-' | ':' | '.' | ',' | '?' | '!' | '@' | '#' | '"')
}

pub(crate) fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_name_char)
}

fn array_of_tables_header(line: &str) -> Option<&str> {
    let path = line.strip_prefix("[[")?.strip_suffix("]]")?;
    is_name(path).then_some(path)
}

fn table_header(line: &str) -> Option<&str> {
    let path = line.strip_prefix('[')?.strip_suffix(']')?;
    is_name(path).then_some(path)
}

fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim_end();
    if !is_name(key) || value.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn split_path<'p>(number: usize, line: &str, path: &'p str) -> Result<Vec<&'p str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::syntax(number, line));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    fn parse(input: &str) -> Result<Table> {
        parse_lines(input.lines().map(|line| Ok(Cow::Borrowed(line))))
    }

    #[test]
    fn test_header_shapes() {
        assert_eq!(array_of_tables_header("[[a.b]]"), Some("a.b"));
        assert_eq!(array_of_tables_header("[a.b]"), None);
        assert_eq!(table_header("[a.b]"), Some("a.b"));
        assert_eq!(table_header("[[a.b]]"), None);
        assert_eq!(table_header("[]"), None);
        assert_eq!(table_header("[a b]"), None);
    }

    #[test]
    fn test_keys_and_headers_share_name_characters() {
        let root = parse("[a-b]\nx:y = 1\n[servers.#1]\nk@v = 2").unwrap();
        let dashed = root.get_key("a-b").unwrap().as_table().unwrap();
        assert_eq!(dashed.get_key("x:y"), Some(&Node::integer(1)));
        assert!(is_name("a\"b"));
        assert!(!is_name("a b"));
        assert!(!is_name("a=b"));
    }

    #[test]
    fn test_quote_in_key_shifts_comment_detection() {
        let err = parse("a\"b = \"x#y\"").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { line: Some(1), .. }));
    }

    #[test]
    fn test_key_value_shape() {
        assert_eq!(key_value("a = 1"), Some(("a", "1")));
        assert_eq!(key_value("a=1"), Some(("a", "1")));
        assert_eq!(key_value("url = \"x=y\""), Some(("url", "\"x=y\"")));
        assert_eq!(key_value("a ="), None);
        assert_eq!(key_value("= 1"), None);
        assert_eq!(key_value("my key = 1"), None);
    }

    #[test]
    fn test_root_key_values() {
        let root = parse("a = 1\nb = \"two\"").unwrap();
        assert_eq!(root.get_key("a"), Some(&Node::integer(1)));
        assert_eq!(root.get_key("b"), Some(&Node::string("two")));
    }

    #[test]
    fn test_table_header_creates_intermediate_tables() {
        let root = parse("[my.key.group]\nvalue = true").unwrap();
        let my = root.get_key("my").unwrap().as_table().unwrap();
        let key = my.get_key("key").unwrap().as_table().unwrap();
        let group = key.get_key("group").unwrap().as_table().unwrap();
        assert_eq!(group.get_key("value"), Some(&Node::boolean(true)));
    }

    #[test]
    fn test_header_resets_to_root_path() {
        let root = parse("[a]\nx = 1\n[b]\nx = 2\n[a.c]\nx = 3").unwrap();
        let a = root.get_key("a").unwrap().as_table().unwrap();
        assert_eq!(a.get_key("x"), Some(&Node::integer(1)));
        let c = a.get_key("c").unwrap().as_table().unwrap();
        assert_eq!(c.get_key("x"), Some(&Node::integer(3)));
    }

    #[test]
    fn test_table_array_entries() {
        let root = parse("[[p]]\nn = 1\n[[p]]\n[[p]]\nn = 3").unwrap();
        let tables = root.get_key("p").unwrap().as_table_array().unwrap();
        assert_eq!(tables.len(), 3);
        assert!(tables.get(1).unwrap().is_empty());
        assert_eq!(tables.get(2).unwrap().get_key("n"), Some(&Node::integer(3)));
    }

    #[test]
    fn test_nested_table_array_uses_last_parent_entry() {
        let root = parse("[[a]]\n[[a.b]]\nx = 1\n[[a]]\n[[a.b]]\nx = 2\n[[a.b]]\nx = 3").unwrap();
        let outer = root.get_key("a").unwrap().as_table_array().unwrap();
        assert_eq!(outer.len(), 2);
        let first = outer.get(0).unwrap().get_key("b").unwrap();
        let second = outer.get(1).unwrap().get_key("b").unwrap();
        assert_eq!(first.as_table_array().unwrap().len(), 1);
        assert_eq!(second.as_table_array().unwrap().len(), 2);
    }

    #[test]
    fn test_intermediate_table_array_is_auto_created() {
        let root = parse("[[fruit.variety]]\nname = \"red\"").unwrap();
        let fruit = root.get_key("fruit").unwrap().as_table_array().unwrap();
        assert_eq!(fruit.len(), 1);
        let variety = fruit.get(0).unwrap().get_key("variety").unwrap();
        assert_eq!(variety.kind(), Kind::TableArray);
    }

    #[test]
    fn test_duplicate_key_reports_line() {
        let err = parse("a = 1\n\n# note\na = 2").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key, line: Some(4) } if key == "a"));
    }

    #[test]
    fn test_table_header_over_value_is_duplicate() {
        let err = parse("a = 1\n[a]").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { line: Some(2), .. }));
    }

    #[test]
    fn test_table_array_over_table_is_duplicate() {
        assert!(matches!(
            parse("[a]\n[[a]]").unwrap_err(),
            Error::DuplicateKey { .. }
        ));
        assert!(matches!(
            parse("[[a]]\n[a]").unwrap_err(),
            Error::DuplicateKey { .. }
        ));
        assert!(matches!(
            parse("[a]\n[[a.b]]\n[[a]]").unwrap_err(),
            Error::DuplicateKey { .. }
        ));
    }

    #[test]
    fn test_value_over_table_is_duplicate() {
        let err = parse("[a.b]\n[a]\nb = 1").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { line: Some(3), .. }));
    }

    #[test]
    fn test_multiline_array() {
        let root = parse("list = [\n  1,\n\n  2, # two\n  3\n]\nafter = true").unwrap();
        assert_eq!(
            root.get_key("list"),
            Some(&Node::array(vec![
                Node::integer(1),
                Node::integer(2),
                Node::integer(3)
            ]))
        );
        assert_eq!(root.get_key("after"), Some(&Node::boolean(true)));
    }

    #[test]
    fn test_unclosed_array_reports_start_line() {
        let err = parse("x = 1\nlist = [\n  1,\n  2").unwrap_err();
        assert!(matches!(err, Error::UnclosedArray { line: 2 }));
    }

    #[test]
    fn test_invalid_value_reports_line() {
        let err = parse("a = 1\nb = nope").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { line: Some(2), .. }));
    }

    #[test]
    fn test_syntax_error_names_line() {
        let err = parse("a = 1\nthis is not valid").unwrap_err();
        match err {
            Error::Syntax { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "this is not valid");
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_path_segment_is_syntax_error() {
        assert!(matches!(parse("[a..b]").unwrap_err(), Error::Syntax { .. }));
        assert!(matches!(parse("[[.a]]").unwrap_err(), Error::Syntax { .. }));
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let root = parse("\u{feff}a = 1").unwrap();
        assert_eq!(root.get_key("a"), Some(&Node::integer(1)));
    }

    #[test]
    fn test_owned_lines() {
        let lines = vec!["[t]".to_string(), "k = 2".to_string()];
        let root = parse_lines(lines.into_iter().map(|line| Ok(Cow::Owned(line)))).unwrap();
        let t = root.get_key("t").unwrap().as_table().unwrap();
        assert_eq!(t.get_key("k"), Some(&Node::integer(2)));
    }

    #[test]
    fn test_strip_keeps_borrowed_and_owned_lines() {
        let borrowed = strip(Cow::Borrowed("\u{feff}  a = 1 # c"), true);
        assert!(matches!(borrowed, Some(Cow::Borrowed("a = 1"))));

        let owned = strip(Cow::Owned("\u{feff}b = 2  ".to_string()), true);
        assert_eq!(owned.as_deref(), Some("b = 2"));

        let later = strip(Cow::Borrowed("\u{feff}c = 3"), false);
        assert_eq!(later.as_deref(), Some("\u{feff}c = 3"));
        assert_eq!(strip(Cow::Owned("   # only".to_string()), false), None);
    }
}
