//! # Token Cursor
//!
//! Backtracking reader over the token list.
//!
//! Positions are plain indices. `mark` saves the
//! index on a stack, `rollback` restores it and `commit` drops it.
//!
//! `peek` doubles as a trip-wire: inspecting the same position more than the
//! configured limit without advancing fails with
//! [`ParseError::StuckCursor`] instead of letting a grammar loop spin.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::lexer::{Cursor, Lexer};
//!
//! let mut cursor = Cursor::new(Lexer::new("a [ 1 ]").tokenize());
//! cursor.mark();
//! cursor.next().unwrap();
//! assert!(!cursor.next_is("(").unwrap());
//! cursor.rollback();
//! assert_eq!(cursor.peek().unwrap(), "a");
//! ```

use super::Pattern;
use crate::error::ParseError;
use config::constants::STUCK_PEEK_LIMIT;
use std::cell::Cell;

// =============================================================================
// CURSOR
// =============================================================================

/// Token cursor with lookahead, pattern matching and a mark stack.
pub struct Cursor {
    /// Token list.
    tokens: Vec<String>,
    /// Index of the current token.
    pos: usize,
    /// Saved positions for speculative parses.
    marks: Vec<usize>,
    /// Position seen by the last peek.
    last_peek: Cell<usize>,
    /// Consecutive peeks at `last_peek`.
    peeks: Cell<usize>,
    /// Maximum consecutive peeks before reporting a stuck parse.
    peek_limit: usize,
}

impl Cursor {
    /// Create a cursor at the first token.
    pub fn new(tokens: Vec<String>) -> Self {
        Self::with_peek_limit(tokens, STUCK_PEEK_LIMIT)
    }

    /// Create a cursor with a custom stuck-detection limit.
    pub fn with_peek_limit(tokens: Vec<String>, peek_limit: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            marks: Vec::new(),
            last_peek: Cell::new(0),
            peeks: Cell::new(0),
            peek_limit,
        }
    }

    /// Current token index.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Current token without consuming it.
    ///
    /// ## Errors
    ///
    /// - `StuckCursor` after more than `peek_limit` peeks at one position
    /// - `UnexpectedEndOfInput` when no tokens remain
    pub fn peek(&self) -> Result<&str, ParseError> {
        if self.last_peek.get() != self.pos {
            self.last_peek.set(self.pos);
            self.peeks.set(0);
        }
        let peeks = self.peeks.get() + 1;
        self.peeks.set(peeks);
        if peeks > self.peek_limit {
            return Err(ParseError::StuckCursor {
                position: self.pos,
                peeks,
            });
        }
        self.tokens
            .get(self.pos)
            .map(String::as_str)
            .ok_or(ParseError::UnexpectedEndOfInput)
    }

    /// Token `n` places after the current one. Does not count as a peek.
    pub fn peek_nth(&self, n: usize) -> Option<&str> {
        self.tokens.get(self.pos + n).map(String::as_str)
    }

    /// Consume and return the current token.
    pub fn next(&mut self) -> Result<String, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEndOfInput)?;
        self.pos += 1;
        Ok(token)
    }

    /// Consume the current token if it equals `token`.
    pub fn next_is(&mut self, token: &str) -> Result<bool, ParseError> {
        if self.peek()? == token {
            self.pos += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume and return the current token if it is one of `tokens`.
    pub fn next_in(&mut self, tokens: &[&str]) -> Result<Option<String>, ParseError> {
        let current = self.peek()?;
        if tokens.contains(&current) {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Whether the current token matches `pattern`. Consumes nothing.
    pub fn matches(&self, pattern: Pattern) -> Result<bool, ParseError> {
        Ok(pattern.is_match(self.peek()?))
    }

    /// Consume `token` or fail with `"<token> expected, '<found>' found"`.
    pub fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        let found = self.peek()?;
        if found == token {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::unexpected_token(token, found))
        }
    }

    // =========================================================================
    // SPECULATION
    // =========================================================================

    /// Save the current position.
    pub fn mark(&mut self) {
        self.marks.push(self.pos);
    }

    /// Discard the most recent mark, keeping the current position.
    pub fn commit(&mut self) {
        self.marks.pop();
    }

    /// Return to the most recent mark and discard it.
    pub fn rollback(&mut self) {
        if let Some(pos) = self.marks.pop() {
            self.pos = pos;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(tokens: &[&str]) -> Cursor {
        Cursor::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_peek_does_not_consume() {
        let c = cursor(&["a", "b"]);
        assert_eq!(c.peek().unwrap(), "a");
        assert_eq!(c.peek().unwrap(), "a");
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_next_advances() {
        let mut c = cursor(&["a", "b"]);
        assert_eq!(c.next().unwrap(), "a");
        assert_eq!(c.peek().unwrap(), "b");
        assert_eq!(c.next().unwrap(), "b");
        assert!(!c.has_more());
    }

    #[test]
    fn test_peek_at_end() {
        let c = cursor(&[]);
        assert!(matches!(c.peek(), Err(ParseError::UnexpectedEndOfInput)));
    }

    #[test]
    fn test_expect() {
        let mut c = cursor(&["then", "x"]);
        c.expect("then").unwrap();
        match c.expect("endif") {
            Err(ParseError::UnexpectedToken { expected, found }) => {
                assert_eq!(expected, "endif");
                assert_eq!(found, "x");
            }
            other => panic!("expected UnexpectedToken, got {:?}", other),
        }
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_next_is_and_next_in() {
        let mut c = cursor(&["else", "endif"]);
        assert!(!c.next_is("elseif").unwrap());
        assert_eq!(c.next_in(&["else", "endif"]).unwrap().as_deref(), Some("else"));
        assert_eq!(c.next_in(&["else"]).unwrap(), None);
        assert!(c.next_is("endif").unwrap());
    }

    #[test]
    fn test_matches_pattern() {
        let c = cursor(&["0x10"]);
        assert!(c.matches(Pattern::Hex).unwrap());
        assert!(!c.matches(Pattern::Identifier).unwrap());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_mark_rollback() {
        let mut c = cursor(&["a", "[", "1"]);
        c.mark();
        c.next().unwrap();
        c.next().unwrap();
        c.rollback();
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_nested_marks() {
        let mut c = cursor(&["a", "b", "c"]);
        c.mark();
        c.next().unwrap();
        c.mark();
        c.next().unwrap();
        c.rollback();
        assert_eq!(c.position(), 1);
        c.commit();
        assert_eq!(c.position(), 1);
        // Nothing left to roll back to.
        c.rollback();
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn test_lookahead() {
        let c = cursor(&["debug", "call"]);
        assert_eq!(c.peek_nth(1), Some("call"));
        assert_eq!(c.peek_nth(2), None);
    }

    #[test]
    fn test_stuck_cursor_trips() {
        let c = cursor(&["x"]);
        for _ in 0..STUCK_PEEK_LIMIT {
            c.peek().unwrap();
        }
        match c.peek() {
            Err(ParseError::StuckCursor { position, peeks }) => {
                assert_eq!(position, 0);
                assert_eq!(peeks, STUCK_PEEK_LIMIT + 1);
            }
            other => panic!("expected StuckCursor, got {:?}", other),
        }
    }

    #[test]
    fn test_advancing_resets_stuck_counter() {
        let mut c = cursor(&["x", "y"]);
        for _ in 0..STUCK_PEEK_LIMIT {
            c.peek().unwrap();
        }
        c.next().unwrap();
        for _ in 0..STUCK_PEEK_LIMIT {
            c.peek().unwrap();
        }
        assert!(c.peek().is_err());
    }

    #[test]
    fn test_custom_peek_limit() {
        let c = Cursor::with_peek_limit(vec!["x".into()], 2);
        c.peek().unwrap();
        c.peek().unwrap();
        assert!(matches!(c.peek(), Err(ParseError::StuckCursor { .. })));
    }
}
