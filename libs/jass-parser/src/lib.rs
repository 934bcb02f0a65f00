//! # JASS Parser
//!
//! Tokenizer and backtracking recursive-descent parser for JASS, the
//! Pascal-like scripting language of RTS map files.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Program (jass-ast)
//! ```
//!
//! Tokens are untyped strings. The parser classifies them on demand and
//! resolves ambiguous prefixes by speculating and rolling back.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::{parse, ParseOptions};
//!
//! let program = parse(
//!     "function Main takes nothing returns nothing\ncall Init()\nendfunction",
//!     ParseOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(program.functions[0].decl.id, "Main");
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! jass-parser → jass-ast (fold_constant, write)
//! ```

pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;

pub use jass_ast;

// Re-export public API
pub use error::{CallbackError, ParseError};
pub use jass_ast::{fold_constant, write, Expr, Literal, Program, Stmt, WriteOptions};
pub use options::ParseOptions;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse a JASS script into a [`Program`].
///
/// ## Parameters
///
/// - `source`: Script text
/// - `options`: Observation callbacks and limits
///
/// ## Errors
///
/// The first syntax error, stuck cursor, malformed number or callback
/// failure aborts the parse. No partial tree is returned.
///
/// ## Example
///
/// ```rust
/// use jass_parser::{parse, ParseError, ParseOptions};
///
/// let err = parse("function F takes nothing returns nothing\nendif", ParseOptions::default());
/// assert!(matches!(err, Err(ParseError::UnexpectedToken { .. })));
/// ```
pub fn parse(source: &str, options: ParseOptions<'_>) -> Result<Program, ParseError> {
    parser::Parser::new(tokenize(source), options).parse()
}

/// Parse a single expression spanning the whole input.
///
/// ## Example
///
/// ```rust
/// use jass_parser::{fold_constant, parse_expression, Literal};
///
/// let expr = parse_expression("2 * 3 + 1").unwrap();
/// assert_eq!(fold_constant(&expr).as_literal(), Some(&Literal::Real(7.0)));
/// ```
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    parser::Parser::new(tokenize(source), ParseOptions::default()).parse_expression()
}

/// Split a script into tokens. Never fails.
pub fn tokenize(source: &str) -> Vec<String> {
    lexer::Lexer::new(source).tokenize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_native() {
        let program = parse("native GetTriggerUnit takes nothing returns unit", ParseOptions::default()).unwrap();
        assert_eq!(program.natives.len(), 1);
        assert!(program.functions.is_empty());
    }

    #[test]
    fn test_parse_expression_entry() {
        let expr = parse_expression("1 + x").unwrap();
        assert!(matches!(expr, Expr::Chain(_)));
        // Folding aborts on the variable and hands back the same tree.
        assert_eq!(fold_constant(&expr), expr);
    }

    #[test]
    fn test_tokenize_strips_comments() {
        assert_eq!(tokenize("set x = 1 // note"), ["set", "x", "=", "1"]);
    }

    #[test]
    fn test_first_error_only() {
        let source = "function F takes nothing returns nothing\nset = 1\nset = 2\nendfunction";
        let err = parse(source, ParseOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "identifier expected, '=' found");
    }
}
