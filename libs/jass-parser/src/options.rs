//! # Parse Options
//!
//! Observation hooks and limits for a single parse.
//!
//! The two callbacks fire synchronously, in the middle of parsing, at the
//! moment their construct is recognized: `on_call` after a complete
//! `call <id>(<args>)` statement, `on_string_literal` for every string
//! literal in any expression. Returning an error aborts the parse.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::{parse, ParseOptions};
//!
//! let mut called = Vec::new();
//! let options = ParseOptions::new().on_call(|id, args| {
//!     called.push((id.to_string(), args.len()));
//!     Ok(())
//! });
//! parse("function F takes nothing returns nothing\ncall G(1, 2)\nendfunction", options).unwrap();
//! assert_eq!(called, [("G".to_string(), 2)]);
//! ```

use crate::error::CallbackError;
use config::constants::STUCK_PEEK_LIMIT;
use jass_ast::Expr;

/// Hook invoked for every recognized `call` statement.
pub type CallHook<'a> = Box<dyn FnMut(&str, &[Expr]) -> Result<(), CallbackError> + 'a>;

/// Hook invoked for every recognized string literal.
pub type StringHook<'a> = Box<dyn FnMut(&str) -> Result<(), CallbackError> + 'a>;

/// Options for [`crate::parse`].
///
/// Callbacks may borrow caller state for `'a`.
pub struct ParseOptions<'a> {
    pub(crate) on_call: Option<CallHook<'a>>,
    pub(crate) on_string_literal: Option<StringHook<'a>>,
    pub(crate) peek_limit: usize,
}

impl Default for ParseOptions<'_> {
    fn default() -> Self {
        Self {
            on_call: None,
            on_string_literal: None,
            peek_limit: STUCK_PEEK_LIMIT,
        }
    }
}

impl<'a> ParseOptions<'a> {
    /// Options with no observers and the default stuck-cursor peek limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `call` statements. Receives the called identifier and the
    /// arguments exactly as parsed, before any folding.
    pub fn on_call(
        mut self,
        hook: impl FnMut(&str, &[Expr]) -> Result<(), CallbackError> + 'a,
    ) -> Self {
        self.on_call = Some(Box::new(hook));
        self
    }

    /// Observe string literals. Receives the unescaped value.
    pub fn on_string_literal(
        mut self,
        hook: impl FnMut(&str) -> Result<(), CallbackError> + 'a,
    ) -> Self {
        self.on_string_literal = Some(Box::new(hook));
        self
    }

    /// Override the stuck-cursor peek limit.
    pub fn peek_limit(mut self, limit: usize) -> Self {
        self.peek_limit = limit;
        self
    }
}

impl std::fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("on_call", &self.on_call.is_some())
            .field("on_string_literal", &self.on_string_literal.is_some())
            .field("peek_limit", &self.peek_limit)
            .finish()
    }
}
