//! # Expression Parsing
//!
//! Two precedence tiers, each parsed into a flat [`OperatorChain`].
//!
//! ## Grammar
//!
//! ```text
//! expression = unary_op? term (low_op term)*
//! term       = factor (high_op factor)*
//! low_op     = "+" | "-" | "<" | ">" | "==" | "<=" | ">=" | "!=" | "and" | "or"
//! high_op    = "*" | "/"
//! unary_op   = "not" | "-" | "+"
//! ```
//!
//! A unary operator is only accepted in front of the first term and applies
//! to that whole term: `-a * b + c` is `(-(a * b)) + c`. A chain with a
//! single operand collapses to the operand itself.

use super::Parser;
use crate::error::ParseError;
use crate::lexer::Pattern;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use jass_ast::{BinaryOp, Expr, OperatorChain, UnaryOp};
use stacker::maybe_grow;

impl<'a> Parser<'a> {
    /// Parenthesized operands recurse back here, so deep nesting grows the
    /// stack on demand instead of overflowing it.
    pub(super) fn expression(&mut self) -> Result<Expr, ParseError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.expression_inner()
        })
    }

    fn expression_inner(&mut self) -> Result<Expr, ParseError> {
        let first = match self.unary_op()? {
            Some(op) => Expr::Unary {
                op,
                operand: Box::new(self.term()?),
            },
            None => self.term()?,
        };

        let mut chain = OperatorChain::new(first);
        while self.at(Pattern::LowPrecedenceOp)? {
            let op = self.binary_op()?;
            chain.push(op, self.term()?);
        }
        Ok(chain.into_expr())
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut chain = OperatorChain::new(self.factor()?);
        while self.at(Pattern::HighPrecedenceOp)? {
            let op = self.binary_op()?;
            chain.push(op, self.factor()?);
        }
        Ok(chain.into_expr())
    }

    fn unary_op(&mut self) -> Result<Option<UnaryOp>, ParseError> {
        if !self.at(Pattern::UnaryOp)? {
            return Ok(None);
        }
        let token = self.cursor.next()?;
        UnaryOp::from_token(&token)
            .map(Some)
            .ok_or_else(|| ParseError::unexpected_token("unary operator", &token))
    }

    fn binary_op(&mut self) -> Result<BinaryOp, ParseError> {
        let token = self.cursor.next()?;
        BinaryOp::from_token(&token).ok_or_else(|| ParseError::unexpected_token("operator", &token))
    }
}

// =============================================================================
// TESTS
// =============================================================================
