//! Error types for parsing, querying and rendering documents.
//!
//! Error reporting is line-granular: parser errors carry the 1-based line
//! number where the problem was detected plus the offending line or literal.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: a line matches none of the recognised shapes
//! - **Duplicate Keys**: a key or section path is defined twice
//! - **Unclosed Arrays**: a multi-line array never finds its closing bracket
//! - **Invalid Values**: a literal is malformed or an array mixes kinds
//! - **Type Mismatches**: a getter asks for a kind the node does not hold
//!
//! Missing keys are never an error for getters; they resolve to `None`.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let err = parse("name = \"a\"\nname = \"b\"").unwrap_err();
//! assert!(matches!(err, Error::DuplicateKey { .. }));
//! assert!(err.to_string().contains("line 2"));
//! ```

use crate::node::Kind;
use std::fmt;
use thiserror::Error;

/// Represents every failure the library can report.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A line that is neither a section header nor a key/value pair.
    #[error("Invalid line {line}: {text} - please check the document")]
    Syntax { line: usize, text: String },

    /// A key or section path defined more than once in the same table.
    #[error("Duplicate key found{}: {key}", line_suffix(.line))]
    DuplicateKey { key: String, line: Option<usize> },

    /// A multi-line array literal ran into the end of input.
    #[error("Unclosed array starting at line {line}")]
    UnclosedArray { line: usize },

    /// A malformed literal, or an array mixing element kinds.
    #[error("Invalid value{}: {value} ({reason})", line_suffix(.line))]
    InvalidValue {
        value: String,
        reason: String,
        line: Option<usize>,
    },

    /// A typed accessor was asked for a kind the node does not hold.
    #[error("{} is {found}, expected {expected}", subject(.key))]
    TypeMismatch {
        key: Option<String>,
        expected: Kind,
        found: Kind,
    },

    /// `replace_string` targeted a path that does not exist.
    #[error("Matching value of key '{0}' not found")]
    KeyNotFound(String),

    /// IO error while reading or writing a stream
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised during typed loading
    #[error("Error: {0}")]
    Custom(String),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

fn subject(key: &Option<String>) -> String {
    match key {
        Some(key) => format!("Matching value of key '{}'", key),
        None => "Value".to_string(),
    }
}

impl Error {
    /// Creates a syntax error for an unrecognised line.
    pub fn syntax(line: usize, text: &str) -> Self {
        Error::Syntax {
            line,
            text: text.to_string(),
        }
    }

    /// Creates a duplicate key error without line information.
    ///
    /// The parser attaches the line with [`Error::at_line`].
    pub fn duplicate_key(key: &str) -> Self {
        Error::DuplicateKey {
            key: key.to_string(),
            line: None,
        }
    }

    /// Creates an invalid value error naming the offending literal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::invalid_value("1.", "unrecognized literal");
    /// assert!(err.to_string().contains("1."));
    /// ```
    pub fn invalid_value(value: &str, reason: &str) -> Self {
        Error::InvalidValue {
            value: value.to_string(),
            reason: reason.to_string(),
            line: None,
        }
    }

    /// Creates a type mismatch error without a key.
    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch {
            key: None,
            expected,
            found,
        }
    }

    /// Creates an I/O error from the underlying failure's message.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Fills in the line number of errors raised below the structural parser.
    ///
    /// Errors that already carry a line are returned unchanged.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::DuplicateKey { key, line: None } => Error::DuplicateKey {
                key,
                line: Some(line),
            },
            Error::InvalidValue {
                value,
                reason,
                line: None,
            } => Error::InvalidValue {
                value,
                reason,
                line: Some(line),
            },
            other => other,
        }
    }

    /// Names the dotted path a type mismatch was raised for.
    #[must_use]
    pub fn for_key(self, key: &str) -> Self {
        match self {
            Error::TypeMismatch {
                key: None,
                expected,
                found,
            } => Error::TypeMismatch {
                key: Some(key.to_string()),
                expected,
                found,
            },
            other => other,
        }
    }

    /// Returns the line number the error was detected on, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::UnclosedArray { line } => Some(*line),
            Error::DuplicateKey { line, .. } | Error::InvalidValue { line, .. } => *line,
            _ => None,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_fills_missing_line() {
        let err = Error::duplicate_key("name").at_line(7);
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.to_string(), "Duplicate key found at line 7: name");
    }

    #[test]
    fn test_at_line_keeps_existing_line() {
        let err = Error::invalid_value("x", "bad").at_line(2).at_line(9);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_for_key_names_path() {
        let err = Error::type_mismatch(Kind::String, Kind::Integer).for_key("a.b");
        assert_eq!(
            err.to_string(),
            "Matching value of key 'a.b' is integer, expected string"
        );
    }

    #[test]
    fn test_type_mismatch_without_key() {
        let err = Error::type_mismatch(Kind::Boolean, Kind::Float);
        assert_eq!(err.to_string(), "Value is float, expected boolean");
    }

    #[test]
    fn test_syntax_message_contains_line_text() {
        let err = Error::syntax(3, "what is this");
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("what is this"));
    }
}
