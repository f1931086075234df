//! Line preprocessing.
//!
//! Each raw input line is trimmed and loses its trailing `#` comment before
//! the structural parser sees it. A `#` does not start a comment inside a
//! double-quoted string or inside an open `[...]` span, so
//!
//! ```text
//! url = "http://host/#anchor"   # the comment starts here
//! [servers.#1]
//! ```
//!
//! keep their `#` characters. Quote and bracket state is local to the line;
//! a string or bracket left open at the end of the line is not an error here.

/// Strips the trailing comment and surrounding whitespace from one line.
///
/// Returns `None` if nothing is left, in which case the line is skipped.
pub(crate) fn strip_comment_and_whitespace(line: &str) -> Option<&str> {
    let line = line.trim();
    let mut in_string = false;
    let mut in_brackets = false;
    let mut previous = None;
    let mut end = line.len();

    for (at, ch) in line.char_indices() {
        match ch {
            '"' if !in_string => in_string = true,
            '"' if previous != Some('\\') => in_string = false,
            '[' if !in_string => in_brackets = true,
            ']' if !in_string => in_brackets = false,
            '#' if !in_string && !in_brackets => {
                end = at;
                break;
            }
            _ => {}
        }
        previous = Some(ch);
    }

    let stripped = line[..end].trim_end();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_only_lines() {
        assert_eq!(strip_comment_and_whitespace(""), None);
        assert_eq!(strip_comment_and_whitespace("   \t "), None);
        assert_eq!(strip_comment_and_whitespace("  # just a comment"), None);
    }

    #[test]
    fn test_trailing_comment_is_removed() {
        assert_eq!(
            strip_comment_and_whitespace("  port = 8080   # default  "),
            Some("port = 8080")
        );
    }

    #[test]
    fn test_hash_inside_string_is_kept() {
        assert_eq!(
            strip_comment_and_whitespace(r##"color = "#ff0000" # red"##),
            Some(r##"color = "#ff0000""##)
        );
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        assert_eq!(
            strip_comment_and_whitespace(r##"q = "say \"#1\" now" # c"##),
            Some(r##"q = "say \"#1\" now""##)
        );
    }

    #[test]
    fn test_hash_inside_header_is_kept() {
        assert_eq!(
            strip_comment_and_whitespace("[servers.#1] # first"),
            Some("[servers.#1]")
        );
    }

    #[test]
    fn test_open_bracket_keeps_rest_of_line() {
        assert_eq!(
            strip_comment_and_whitespace("list = [1, 2 # not stripped"),
            Some("list = [1, 2 # not stripped")
        );
    }

    #[test]
    fn test_comment_after_closed_array() {
        assert_eq!(
            strip_comment_and_whitespace("list = [1, 2] # two"),
            Some("list = [1, 2]")
        );
    }

    #[test]
    fn test_bracket_inside_string_does_not_hide_comment() {
        assert_eq!(
            strip_comment_and_whitespace(r#"a = "[" # c"#),
            Some(r#"a = "[""#)
        );
        assert_eq!(
            strip_comment_and_whitespace(r#"list = ["]", "[#"] # c"#),
            Some(r#"list = ["]", "[#"]"#)
        );
    }

    #[test]
    fn test_unterminated_string_is_not_an_error() {
        assert_eq!(
            strip_comment_and_whitespace(r#"s = "open # still string"#),
            Some(r#"s = "open # still string"#)
        );
    }
}
