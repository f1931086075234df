//! Value literal classification.
//!
//! The right-hand side of `key = value` is matched against an ordered list of
//! literal shapes and the first shape that matches builds the node. The
//! order matters because shapes overlap: `"[1]"` is a string, not an array,
//! and `12` is an integer before it could be anything else.
//!
//! | Order | Shape     | Example                        |
//! |-------|-----------|--------------------------------|
//! | 1     | string    | `"text with \"escapes\""`      |
//! | 2     | integer   | `-42`                          |
//! | 3     | boolean   | `true`                         |
//! | 4     | float     | `3.14`                         |
//! | 5     | timestamp | `1979-05-27T07:32:00Z`         |
//! | 6     | array     | `[1, 2]`, `[[1, 2], ["a"]]`    |

use crate::timestamp::{self, Timestamp};
use crate::{text, Error, Node, Result};

/// Deepest array nesting a literal may use.
pub(crate) const MAX_ARRAY_DEPTH: usize = 128;

type Classifier = fn(&str) -> bool;
type Builder = fn(&str, usize) -> Result<Node>;

const SHAPES: [(Classifier, Builder); 6] = [
    (is_quoted_string, build_string),
    (is_integer, build_integer),
    (is_boolean, build_boolean),
    (is_float, build_float),
    (timestamp::is_timestamp, build_timestamp),
    (is_array, build_array),
];

/// Parses one trimmed value literal into a node.
///
/// # Errors
///
/// Fails with [`Error::InvalidValue`] if the literal matches no shape, if an
/// array mixes element kinds, or if a matched literal cannot be converted
/// (integer overflow, bad unicode escape).
pub(crate) fn parse_value(literal: &str) -> Result<Node> {
    parse_at_depth(literal, 0)
}

fn parse_at_depth(literal: &str, depth: usize) -> Result<Node> {
    SHAPES
        .iter()
        .find(|(matches, _)| matches(literal))
        .map(|(_, build)| build(literal, depth))
        .unwrap_or_else(|| Err(Error::invalid_value(literal, "unrecognized literal")))
}

fn is_quoted_string(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(text: &str) -> bool {
    is_digits(text.strip_prefix('-').unwrap_or(text))
}

fn is_boolean(text: &str) -> bool {
    text == "true" || text == "false"
}

fn is_float(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => false,
    }
}

fn is_array(text: &str) -> bool {
    text.starts_with('[') && text.ends_with(']')
}

fn build_string(text: &str, _depth: usize) -> Result<Node> {
    let body = &text[1..text.len() - 1];
    Ok(Node::String(text::unescape(body)?))
}

fn build_integer(text: &str, _depth: usize) -> Result<Node> {
    text.parse::<i64>()
        .map(Node::Integer)
        .map_err(|_| Error::invalid_value(text, "integer out of range"))
}

fn build_boolean(text: &str, _depth: usize) -> Result<Node> {
    Ok(Node::Boolean(text == "true"))
}

fn build_float(text: &str, _depth: usize) -> Result<Node> {
    text.parse::<f64>()
        .map(Node::Float)
        .map_err(|_| Error::invalid_value(text, "invalid float"))
}

fn build_timestamp(text: &str, _depth: usize) -> Result<Node> {
    Ok(Node::Timestamp(Timestamp::from_literal(text)))
}

fn build_array(text: &str, depth: usize) -> Result<Node> {
    if depth >= MAX_ARRAY_DEPTH {
        return Err(Error::invalid_value(text, "arrays nested too deeply"));
    }

    let interior = text[1..text.len() - 1].trim();
    if interior.is_empty() {
        return Ok(Node::Array(Vec::new()));
    }

    let mut elements = split_elements(interior);
    // A single trailing comma leaves one empty element behind.
    if elements.len() > 1 && elements.last().is_some_and(|last| last.is_empty()) {
        elements.pop();
    }

    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        if element.is_empty() {
            return Err(Error::invalid_value(text, "empty array element"));
        }
        let node = parse_at_depth(element, depth + 1)?;
        if let Some(first) = items.first().map(Node::kind) {
            if node.kind() != first {
                return Err(Error::invalid_value(
                    text,
                    "cannot mix data types in an array",
                ));
            }
        }
        items.push(node);
    }

    Ok(Node::Array(items))
}

/// Splits an array interior into trimmed element literals.
///
/// An interior containing `],` holds nested arrays and is cut right after
/// every such closing bracket. Any other interior is cut at commas outside
/// brackets and quoted strings.
fn split_elements(interior: &str) -> Vec<&str> {
    if interior.contains("],") {
        split_after_closing_brackets(interior)
    } else {
        split_top_level_commas(interior)
    }
}

// The `],` scan ignores nesting and quoting: a string element containing
// `],` is cut in two.
fn split_after_closing_brackets(interior: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut start = 0;
    for (at, _) in interior.match_indices("],") {
        elements.push(interior[start..=at].trim());
        start = at + 2;
    }
    elements.push(interior[start..].trim());
    elements
}

fn split_top_level_commas(interior: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (at, ch) in interior.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                elements.push(interior[start..at].trim());
                start = at + 1;
            }
            _ => {}
        }
    }
    elements.push(interior[start..].trim());
    elements
}
