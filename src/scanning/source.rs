//! Source text preparation.
//!
//! Comments and string/char literal contents are blanked out before keyword
//! matching so that `// class Fake {}` or `"namespace"` inside a string can
//! never produce a symbol. Newlines are preserved, keeping 1-based line
//! numbers valid in the blanked text.

use crate::error::{ParseError, ParseResult};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment { start: u32 },
    StringLiteral { start: u32 },
    CharLiteral { start: u32 },
}

/// Replace comments and literal contents with spaces.
///
/// Fails when a block comment or a string/char literal is left open.
/// A `'` only opens a char literal when the previous character is not part
/// of an identifier or number, so digit separators like `1'000` pass through.
pub fn sanitize(code: &str) -> ParseResult<String> {
    let mut out = String::with_capacity(code.len());
    let mut state = State::Normal;
    let mut line: u32 = 1;
    let mut prev_ident = false;
    let mut chars = code.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Normal => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                    prev_ident = false;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment { start: line };
                    prev_ident = false;
                }
                '"' => {
                    out.push(' ');
                    state = State::StringLiteral { start: line };
                    prev_ident = false;
                }
                '\'' if !prev_ident => {
                    out.push(' ');
                    state = State::CharLiteral { start: line };
                }
                _ => {
                    prev_ident = c.is_alphanumeric() || c == '_';
                    out.push(c);
                }
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Normal;
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment { .. } => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Normal;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::StringLiteral { start } => match c {
                '\\' => {
                    out.push(' ');
                    if let Some(escaped) = chars.next() {
                        if escaped == '\n' {
                            line += 1;
                            out.push('\n');
                        } else {
                            out.push(' ');
                        }
                    }
                }
                '"' => {
                    out.push(' ');
                    state = State::Normal;
                }
                '\n' => {
                    return Err(ParseError::UnterminatedLiteral {
                        kind: "string",
                        line: start,
                    });
                }
                _ => out.push(' '),
            },
            State::CharLiteral { start } => match c {
                '\\' => {
                    out.push(' ');
                    if chars.next().is_some() {
                        out.push(' ');
                    }
                }
                '\'' => {
                    out.push(' ');
                    state = State::Normal;
                }
                '\n' => {
                    return Err(ParseError::UnterminatedLiteral {
                        kind: "char",
                        line: start,
                    });
                }
                _ => out.push(' '),
            },
        }
    }

    match state {
        State::Normal | State::LineComment => Ok(out),
        State::BlockComment { start } => Err(ParseError::UnterminatedBlockComment { line: start }),
        State::StringLiteral { start } => Err(ParseError::UnterminatedLiteral {
            kind: "string",
            line: start,
        }),
        State::CharLiteral { start } => Err(ParseError::UnterminatedLiteral {
            kind: "char",
            line: start,
        }),
    }
}

static INCLUDE_RE: OnceLock<Regex> = OnceLock::new();

/// Extract `#include` targets from raw source, in first-occurrence order.
///
/// Runs on the raw text because [`sanitize`] blanks the quoted form
/// (`#include "local.h"`) before directives are dropped.
pub fn collect_includes(code: &str) -> Vec<String> {
    let re = INCLUDE_RE.get_or_init(|| {
        Regex::new(r#"^\s*#\s*include\s*["<]([^">]+)[">]"#).expect("valid include regex")
    });

    let mut includes: Vec<String> = Vec::new();
    for line in code.lines() {
        if let Some(captures) = re.captures(line) {
            let target = captures[1].to_string();
            if !includes.contains(&target) {
                includes.push(target);
            }
        }
    }
    includes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_comment_blanked() {
        let out = sanitize("int x; // class Fake {}\nint y;").unwrap();
        assert!(!out.contains("Fake"));
        assert!(!out.contains('{'));
        assert!(out.contains("int y;"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let out = sanitize("a /* first\nsecond */ b").unwrap();
        assert!(out.contains('a'));
        assert!(out.contains('b'));
        assert!(!out.contains("second"));
        // Newline inside the comment survives so line numbers stay aligned
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_string_contents_blanked() {
        let out = sanitize(r#"auto s = "class Fake {";"#).unwrap();
        assert!(!out.contains("Fake"));
        assert!(!out.contains('{'));
        assert!(out.contains("auto s ="));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let out = sanitize(r#"auto s = "a\"b{"; int z;"#).unwrap();
        assert!(!out.contains('{'));
        assert!(out.contains("int z;"));
    }

    #[test]
    fn test_char_literal_with_brace() {
        let out = sanitize("char c = '{';").unwrap();
        assert!(!out.contains('{'));
    }

    #[test]
    fn test_digit_separator_is_not_char_literal() {
        let out = sanitize("int big = 1'000'000;").unwrap();
        assert!(out.contains("000"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = sanitize("int x;\n/* never closed").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedBlockComment { line: 2 });
    }

    #[test]
    fn test_unterminated_string() {
        let err = sanitize("auto s = \"open\nint x;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedLiteral {
                kind: "string",
                line: 1
            }
        );
    }

    #[test]
    fn test_collect_includes_ordered_dedup() {
        let code = "#include <iostream>\n#include \"local.h\"\n#include <iostream>\n";
        assert_eq!(collect_includes(code), vec!["iostream", "local.h"]);
    }

    #[test]
    fn test_include_not_matched_mid_line() {
        assert!(collect_includes("int x; // #include <fake>").is_empty());
    }
}
