//! # JASS Parser
//!
//! Backtracking recursive-descent parser producing a [`Program`].
//!
//! Tokens are untyped strings; every decision point tests the current token
//! against a [`Pattern`] or a literal keyword. Productions that share a
//! prefix (array reference, call and plain variable all start with an
//! identifier) are tried speculatively: the cursor is marked, the production
//! attempted, and the mark rolled back if it fails with a syntax error.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::lexer::Lexer;
//! use jass_parser::parser::Parser;
//! use jass_parser::ParseOptions;
//!
//! let source = "native GetTriggerUnit takes nothing returns unit";
//! let tokens = Lexer::new(source).tokenize();
//! let program = Parser::new(tokens, ParseOptions::default()).parse().unwrap();
//! assert_eq!(program.natives[0].decl.returns.as_deref(), Some("unit"));
//! ```

mod control_flow;
mod declarations;
mod expressions;
mod primaries;
mod statements;

use crate::error::ParseError;
use crate::lexer::{is_reserved, Cursor, Pattern};
use crate::options::ParseOptions;
use jass_ast::{Expr, Program};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for JASS.
///
/// A parser owns its cursor and options and is consumed by one parse.
pub struct Parser<'a> {
    /// Token cursor.
    cursor: Cursor,
    /// Observation hooks.
    options: ParseOptions<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `tokens`: Tokens from the lexer
    /// - `options`: Callbacks and limits
    pub fn new(tokens: Vec<String>, options: ParseOptions<'a>) -> Self {
        let cursor = Cursor::with_peek_limit(tokens, options.peek_limit);
        Self { cursor, options }
    }

    /// Parse a whole script.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// file = declaration* function*
    /// declaration = type_def | globals | native
    /// ```
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        while self.declaration(&mut program)? {}
        while self.function(&mut program)? {}
        Ok(program)
    }

    /// Parse a single expression that must span every token.
    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        let expr = self.expression()?;
        match self.cursor.peek_nth(0) {
            Some(extra) => Err(ParseError::unexpected_token("end of input", extra)),
            None => Ok(expr),
        }
    }

    // =========================================================================
    // SPECULATION
    // =========================================================================

    /// Attempt `production`, rolling the cursor back if it fails.
    ///
    /// Recoverable errors turn into `Ok(None)` with no tokens consumed.
    /// Fatal errors (stuck cursor, bad number, callback failure) drop the
    /// mark and propagate.
    fn speculate<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        self.cursor.mark();
        match production(self) {
            Ok(value) => {
                self.cursor.commit();
                Ok(Some(value))
            }
            Err(e) if e.is_recoverable() => {
                self.cursor.rollback();
                Ok(None)
            }
            Err(e) => {
                self.cursor.commit();
                Err(e)
            }
        }
    }

    // =========================================================================
    // TOKEN HELPERS
    // =========================================================================

    /// Consume an identifier that is not a reserved word.
    fn id(&mut self) -> Result<String, ParseError> {
        if self.cursor.matches(Pattern::Identifier)? && !is_reserved(self.cursor.peek()?) {
            return self.cursor.next();
        }
        Err(ParseError::unexpected_token("identifier", self.cursor.peek()?))
    }

    /// Like [`Cursor::matches`], but false at end of input.
    fn at(&self, pattern: Pattern) -> Result<bool, ParseError> {
        if !self.cursor.has_more() {
            return Ok(false);
        }
        self.cursor.matches(pattern)
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    fn notify_call(&mut self, id: &str, args: &[Expr]) -> Result<(), ParseError> {
        if let Some(hook) = self.options.on_call.as_mut() {
            hook(id, args).map_err(ParseError::Callback)?;
        }
        Ok(())
    }

    fn notify_string(&mut self, value: &str) -> Result<(), ParseError> {
        if let Some(hook) = self.options.on_string_literal.as_mut() {
            hook(value).map_err(ParseError::Callback)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
