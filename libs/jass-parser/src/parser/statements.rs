//! # Statement Parsing
//!
//! Statement dispatch and the simple statements.
//!
//! ## Grammar
//!
//! ```text
//! statement = set | call | if | loop | exitwhen | return | debug
//! set       = "set" id ("[" expression "]")? "=" expression
//! call      = "call" id args
//! exitwhen  = "exitwhen" expression
//! return    = "return" expression?
//! debug     = "debug" (set | call | if | loop)
//! ```
//!
//! Statements are keyword-led, so dispatch never needs to backtrack.

use super::Parser;
use crate::error::ParseError;
use crate::lexer::is_reserved;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use jass_ast::Stmt;
use stacker::maybe_grow;

impl<'a> Parser<'a> {
    /// Parse one statement.
    ///
    /// ## Returns
    ///
    /// `None` when the current token does not start a statement. Nothing is
    /// consumed in that case.
    pub(super) fn statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.statement_inner()
        })
    }

    fn statement_inner(&mut self) -> Result<Option<Stmt>, ParseError> {
        if let Some(stmt) = self.set()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.call()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.if_stmt()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.loop_stmt()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.exitwhen()? {
            return Ok(Some(stmt));
        }
        if let Some(stmt) = self.return_stmt()? {
            return Ok(Some(stmt));
        }
        self.debug()
    }

    /// Parse statements up to and including `terminator`.
    pub(super) fn statements_until(&mut self, terminator: &str) -> Result<Vec<Stmt>, ParseError> {
        let (body, _) = self.block_until(&[terminator])?;
        Ok(body)
    }

    /// Parse statements until one of `terminators` is consumed.
    ///
    /// ## Returns
    ///
    /// The statements and the terminator that closed them.
    ///
    /// ## Errors
    ///
    /// A token that neither starts a statement nor terminates the block is
    /// reported as `UnexpectedToken` naming the terminators.
    pub(super) fn block_until(
        &mut self,
        terminators: &[&str],
    ) -> Result<(Vec<Stmt>, String), ParseError> {
        let mut body = Vec::new();
        loop {
            if let Some(terminator) = self.cursor.next_in(terminators)? {
                return Ok((body, terminator));
            }
            match self.statement()? {
                Some(stmt) => body.push(stmt),
                None => {
                    let expected = describe(terminators);
                    return Err(ParseError::unexpected_token(&expected, self.cursor.peek()?));
                }
            }
        }
    }

    fn set(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("set")? {
            return Ok(None);
        }
        let id = self.id()?;
        let index = if self.cursor.next_is("[")? {
            let index = self.expression()?;
            self.cursor.expect("]")?;
            Some(index)
        } else {
            None
        };
        self.cursor.expect("=")?;
        let value = self.expression()?;
        Ok(Some(Stmt::Set { id, index, value }))
    }

    /// The call observer sees the statement before it is returned.
    fn call(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("call")? {
            return Ok(None);
        }
        let id = self.id()?;
        let args = self.args()?;
        self.notify_call(&id, &args)?;
        Ok(Some(Stmt::Call { id, args }))
    }

    fn exitwhen(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("exitwhen")? {
            return Ok(None);
        }
        let condition = self.expression()?;
        Ok(Some(Stmt::ExitWhen { condition }))
    }

    fn return_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("return")? {
            return Ok(None);
        }
        let value = if self.at_statement_boundary() {
            None
        } else {
            Some(self.expression()?)
        };
        Ok(Some(Stmt::Return { value }))
    }

    fn debug(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("debug")? {
            return Ok(None);
        }
        let found = self.cursor.peek()?;
        if !matches!(found, "set" | "call" | "if" | "loop") {
            return Err(ParseError::unexpected_token("set, call, if or loop", found));
        }
        Ok(self.statement()?.map(|inner| Stmt::Debug(Box::new(inner))))
    }

    /// Whether the next token ends the current statement.
    ///
    /// `function` is reserved but starts a function reference, so it never
    /// counts as a boundary.
    fn at_statement_boundary(&self) -> bool {
        match self.cursor.peek_nth(0) {
            None | Some("endloop") => true,
            Some("function") => false,
            Some("debug") => matches!(
                self.cursor.peek_nth(1),
                Some("set" | "call" | "if" | "loop")
            ),
            Some(token) => is_reserved(token),
        }
    }
}

/// `["endif"]` → `endif`, `["else", "elseif", "endif"]` → `else, elseif or endif`.
fn describe(terminators: &[&str]) -> String {
    match terminators {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

// =============================================================================
// TESTS
// =============================================================================
