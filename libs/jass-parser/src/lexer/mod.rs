//! # JASS Lexer
//!
//! Turns source text into a flat list of token strings.
//!
//! Line comments are stripped first: everything from the first `//` on a
//! line is dropped, even inside a string literal. The remaining text is
//! scanned with one priority-ordered pattern; anything the pattern does not
//! match (whitespace, stray characters such as `'` or `$`) produces no token.
//! The lexer never fails.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::lexer::Lexer;
//!
//! let tokens = Lexer::new("set x = a[1] // bump").tokenize();
//! assert_eq!(tokens, ["set", "x", "=", "a", "[", "1", "]"]);
//! ```

mod cursor;
mod pattern;

pub use cursor::Cursor;
pub use pattern::{is_reserved, Pattern, RESERVED_WORDS, TOKEN_PATTERN};

use pattern::token_regex;

// =============================================================================
// LEXER
// =============================================================================

/// JASS lexer.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Tokens in source order. There is no end-of-file marker; the cursor
    /// reports end of input when the list runs out.
    pub fn tokenize(self) -> Vec<String> {
        let stripped = strip_comments(self.source);
        token_regex()
            .find_iter(&stripped)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Drop everything from the first `//` on each line.
///
/// ## Example
///
/// ```rust
/// use jass_parser::lexer::strip_comments;
///
/// assert_eq!(strip_comments("a // b\nc"), "a \nc");
/// ```
pub fn strip_comments(source: &str) -> String {
    source
        .split('\n')
        .map(|line| match line.find("//") {
            Some(at) => &line[..at],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<String> {
        Lexer::new(source).tokenize()
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            lex("function Foo takes integer a, real b returns nothing"),
            ["function", "Foo", "takes", "integer", "a", ",", "real", "b", "returns", "nothing"]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(lex("a<=b"), ["a", "<=", "b"]);
        assert_eq!(lex("a<b"), ["a", "<", "b"]);
        assert_eq!(lex("a!=b==c"), ["a", "!=", "b", "==", "c"]);
        assert_eq!(lex("x=-1"), ["x", "=", "-", "1"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("1.5 .5 2. 0x1F 017"), ["1.5", ".5", "2.", "0x1F", "017"]);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex(r#"call F("a b", "")"#), ["call", "F", "(", "\"a b\"", ",", "\"\"", ")"]);
        assert_eq!(lex(r#""say \"hi\"""#), [r#""say \"hi\"""#]);
    }

    #[test]
    fn test_comment_inside_string_truncates_line() {
        // The unterminated quote is dropped and the rest lexes as a word.
        assert_eq!(
            lex("call F(\"http://x\")\nreturn"),
            ["call", "F", "(", "http:", "return"]
        );
    }

    #[test]
    fn test_unmatched_characters_dropped() {
        assert_eq!(lex("'hfoo' $FF"), ["hfoo", "FF"]);
    }

    #[test]
    fn test_words_allow_colon_and_at() {
        assert_eq!(lex("a:b @c"), ["a:b", "@c"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(lex("").is_empty());
        assert!(lex("// only a comment").is_empty());
    }
}
