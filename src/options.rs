//! Configuration options for rendering documents.
//!
//! Parsing has no knobs; these options only shape the text the generator
//! writes. Every combination produces text that parses back to the same
//! tree.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse, to_string_with_options, WriteOptions};
//!
//! let doc = parse("list = [1, 2]\n[a.b]\nx = 1").unwrap();
//!
//! let options = WriteOptions::new()
//!     .with_spaced_arrays(false)
//!     .with_section_spacing(false);
//! let text = to_string_with_options(&doc, options).unwrap();
//! assert_eq!(text, "list = [1,2]\n[a.b]\nx = 1\n");
//! ```

/// Configuration options for the generator.
///
/// # Examples
///
/// ```rust
/// use toml_tree::WriteOptions;
///
/// // Flush-left output with blank lines between sections
/// let options = WriteOptions::new();
///
/// // Section bodies indented by two spaces per level
/// let options = WriteOptions::pretty();
///
/// // Custom configuration
/// let options = WriteOptions::new()
///     .with_indent(4)
///     .with_spaced_arrays(false);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per section level in front of headers and key/value lines.
    pub indent: usize,
    /// Whether array elements are separated by `", "` rather than `","`.
    pub spaced_arrays: bool,
    /// Whether a blank line precedes every section header.
    pub section_spacing: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 0,
            spaced_arrays: true,
            section_spacing: true,
        }
    }
}

impl WriteOptions {
    /// Creates default options (no indentation, spaced arrays, blank line
    /// before each section).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::WriteOptions;
    ///
    /// let options = WriteOptions::new();
    /// assert_eq!(options.indent, 0);
    /// assert!(options.spaced_arrays);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that indent nested sections by two spaces per level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::WriteOptions;
    ///
    /// assert_eq!(WriteOptions::pretty().indent, 2);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            indent: 2,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per section level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Chooses between `[1, 2]` and `[1,2]`.
    #[must_use]
    pub fn with_spaced_arrays(mut self, spaced: bool) -> Self {
        self.spaced_arrays = spaced;
        self
    }

    /// Chooses whether a blank line is written before each section header.
    #[must_use]
    pub fn with_section_spacing(mut self, spacing: bool) -> Self {
        self.section_spacing = spacing;
        self
    }

    pub(crate) fn array_separator(&self) -> &'static str {
        if self.spaced_arrays {
            ", "
        } else {
            ","
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let options = WriteOptions::pretty()
            .with_indent(4)
            .with_spaced_arrays(false)
            .with_section_spacing(false);
        assert_eq!(
            options,
            WriteOptions {
                indent: 4,
                spaced_arrays: false,
                section_spacing: false,
            }
        );
        assert_eq!(options.array_separator(), ",");
    }
}
