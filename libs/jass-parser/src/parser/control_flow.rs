//! # Control Flow Parsing
//!
//! Conditional and loop statements.
//!
//! ## Grammar
//!
//! ```text
//! if   = "if" expression "then" statement*
//!        ("elseif" expression "then" statement*)*
//!        ("else" statement*)?
//!        "endif"
//! loop = "loop" statement* "endloop"
//! ```

use super::Parser;
use crate::error::ParseError;
use jass_ast::{Branch, Expr, Stmt};

/// Tokens that close a conditional branch.
const BRANCH_END: &[&str] = &["else", "elseif", "endif"];

/// After `else` only `endif` may follow.
const ELSE_END: &[&str] = &["endif"];

impl<'a> Parser<'a> {
    /// Parse an `if` statement into its ordered branches.
    pub(super) fn if_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("if")? {
            return Ok(None);
        }
        let mut branches = Vec::new();
        let mut condition = Some(self.condition()?);
        let mut terminators = BRANCH_END;

        loop {
            let (body, closed_by) = self.block_until(terminators)?;
            branches.push(Branch { condition, body });
            match closed_by.as_str() {
                "elseif" => condition = Some(self.condition()?),
                "else" => {
                    condition = None;
                    terminators = ELSE_END;
                }
                _ => break,
            }
        }

        Ok(Some(Stmt::If { branches }))
    }

    /// `expression "then"`
    fn condition(&mut self) -> Result<Expr, ParseError> {
        let condition = self.expression()?;
        self.cursor.expect("then")?;
        Ok(condition)
    }

    pub(super) fn loop_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        if !self.cursor.next_is("loop")? {
            return Ok(None);
        }
        let body = self.statements_until("endloop")?;
        Ok(Some(Stmt::Loop { body }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
