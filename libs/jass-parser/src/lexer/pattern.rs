//! # Lexical Patterns
//!
//! Tokens are plain strings. Instead of tagging each token once, the parser
//! tests the current token against one of these patterns at every decision
//! point, so one lexeme may be tried as several categories before the
//! grammar commits to an interpretation.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::lexer::Pattern;
//!
//! assert!(Pattern::Identifier.is_match("GetTriggerUnit"));
//! assert!(Pattern::Octal.is_match("017"));
//! assert!(!Pattern::Decimal.is_match("017"));
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Words that can never be consumed as an identifier.
///
/// Contextual words such as `debug`, `then`, `true`, `null`, `and` or
/// `endloop` are deliberately absent.
pub const RESERVED_WORDS: &[&str] = &[
    "function", "takes", "returns", "return", "nothing", "endfunction", "if", "else", "elseif",
    "endif", "loop", "exitwhen", "globals", "endglobals", "local", "set", "call", "constant",
    "type", "extends", "native", "array",
];

/// Check whether a word is reserved.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

// =============================================================================
// PATTERN
// =============================================================================

/// Token categories the parser can test the current token against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `[a-zA-Z_][a-zA-Z_0-9]*`
    Identifier,
    /// Decimal integer without leading zero.
    Decimal,
    /// `0` followed by digits (a lone `0` is octal).
    Octal,
    /// `$FF`, `0xFF` or `0XFF`.
    Hex,
    /// `1.5`, `1.` or `.5`.
    Real,
    /// Additive/relational tier operators.
    LowPrecedenceOp,
    /// Multiplicative tier operators.
    HighPrecedenceOp,
    /// `not`, `-`, `+` in front of the first term.
    UnaryOp,
}

impl Pattern {
    /// Regular expression source, anchored to the whole token.
    pub fn source(self) -> &'static str {
        match self {
            Self::Identifier => r"^[a-zA-Z_][a-zA-Z_0-9]*$",
            Self::Decimal => r"^[1-9][0-9]*$",
            Self::Octal => r"^0[0-9]*$",
            Self::Hex => r"^(?:\$[0-9a-fA-F]+|0[xX][0-9a-fA-F]+)$",
            Self::Real => r"^(?:[0-9]+\.[0-9]*|\.[0-9]+)$",
            Self::LowPrecedenceOp => r"^(?:[+\-><]|==|<=|>=|!=|and|or)$",
            Self::HighPrecedenceOp => r"^[*/]$",
            Self::UnaryOp => r"^(?:not|[\-+])$",
        }
    }

    /// Test a token against this pattern.
    pub fn is_match(self, token: &str) -> bool {
        compiled()[self as usize].is_match(token)
    }
}

const ALL: [Pattern; 8] = [
    Pattern::Identifier,
    Pattern::Decimal,
    Pattern::Octal,
    Pattern::Hex,
    Pattern::Real,
    Pattern::LowPrecedenceOp,
    Pattern::HighPrecedenceOp,
    Pattern::UnaryOp,
];

#[allow(clippy::expect_used)]
fn compiled() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ALL.iter()
            .map(|p| Regex::new(p.source()).expect("lexical pattern is a valid regex"))
            .collect()
    })
}

// =============================================================================
// TOKEN PATTERN
// =============================================================================

/// Priority-ordered alternation used by the tokenizer.
///
/// Alternatives are tried left to right at each position: real numbers,
/// punctuation, operators (longest first), brackets, empty quote pairs,
/// escape-aware string literals, then words.
pub const TOKEN_PATTERN: &str = concat!(
    r"(?s)",
    r"[0-9]+\.[0-9]*|\.[0-9]+",
    r"|[.,;]",
    r"|<>|<=>|>=|<=|==|=|!=|!|<<|>>|<|>|\|\||\||&&|&|-|\+|\*|/|%|~|\^|\?",
    r"|[\[\]()]",
    r"|''",
    r#"|"""#,
    r#"|"[^"\\]*(?:\\.[^"\\]*)*""#,
    r"|[A-Za-z0-9_:@]+",
);

#[allow(clippy::expect_used)]
pub(crate) fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

// =============================================================================
// TESTS
// =============================================================================
