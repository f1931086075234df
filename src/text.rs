//! Backslash escaping for quoted string literals.

use crate::{Error, Result};

/// Resolves the backslash sequences of a string literal's body.
///
/// Unknown escapes are preserved literally.
pub(crate) fn unescape(body: &str) -> Result<String> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('0') => result.push('\0'),
            Some(marker @ ('u' | 'U')) => {
                let width = if marker == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                if hex.len() != width || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(Error::invalid_value(
                        body,
                        "invalid unicode escape sequence",
                    ));
                }
                let code_point = u32::from_str_radix(&hex, 16)
                    .map_err(|_| Error::invalid_value(body, "invalid unicode escape sequence"))?;
                let ch = char::from_u32(code_point)
                    .ok_or_else(|| Error::invalid_value(body, "invalid unicode code point"))?;
                result.push(ch);
            }
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    Ok(result)
}

/// Escapes quotes, backslashes and control characters for a quoted literal.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_common_sequences() {
        assert_eq!(
            unescape(r#"a\"b\\c\nd\te\/f"#).unwrap(),
            "a\"b\\c\nd\te/f"
        );
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape(r"\u00e9t\u00E9").unwrap(), "été");
        assert_eq!(unescape(r"\U0001F600").unwrap(), "😀");
    }

    #[test]
    fn test_unescape_rejects_short_unicode() {
        assert!(unescape(r"\u12").is_err());
        assert!(unescape(r"\uD800").is_err());
    }

    #[test]
    fn test_unescape_keeps_unknown_escape() {
        assert_eq!(unescape(r"C:\path\q").unwrap(), r"C:\path\q");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape("tab\there"), r"tab\there");
        assert_eq!(escape("say \"hi\""), r#"say \"hi\""#);
        assert_eq!(escape("\u{0001}"), r"\u0001");
    }

    #[test]
    fn test_escape_then_unescape_restores_text() {
        let original = "line one\nline \"two\"\\ \u{0007} # not a comment";
        assert_eq!(unescape(&escape(original)).unwrap(), original);
    }
}
