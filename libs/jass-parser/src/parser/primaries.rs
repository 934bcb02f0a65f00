//! # Primary Expression Parsing
//!
//! Factors: literals, references, calls and parenthesized expressions.
//!
//! ## Grammar
//!
//! ```text
//! factor   = constant | array_ref | function_ref | call | "(" expression ")" | id
//! constant = "null" | integer | real | "true" | "false" | string
//! array_ref = id "[" expression "]"
//! function_ref = "function" id
//! call     = id args
//! args     = "(" (expression ("," expression)*)? ")"
//! ```
//!
//! `array_ref`, `call` and the plain variable share the identifier prefix.
//! The first two are tried speculatively in that order, so `A[0]`, `A(0)`
//! and `A` each land on their own production.

use super::Parser;
use crate::error::ParseError;
use crate::lexer::{is_reserved, Pattern};
use jass_ast::{Expr, Literal};

impl<'a> Parser<'a> {
    pub(super) fn factor(&mut self) -> Result<Expr, ParseError> {
        if let Some(literal) = self.constant()? {
            return Ok(Expr::Literal(literal));
        }
        if let Some(expr) = self.speculate(Self::array_ref)? {
            return Ok(expr);
        }
        if let Some(expr) = self.function_ref()? {
            return Ok(expr);
        }
        if let Some(expr) = self.speculate(Self::function_call)? {
            return Ok(expr);
        }
        if let Some(expr) = self.parenthesized()? {
            return Ok(expr);
        }
        if self.at(Pattern::Identifier)? && !is_reserved(self.cursor.peek()?) {
            return Ok(Expr::Variable(self.cursor.next()?));
        }
        Err(ParseError::unexpected_token("expression", self.cursor.peek()?))
    }

    // =========================================================================
    // LITERALS
    // =========================================================================

    fn constant(&mut self) -> Result<Option<Literal>, ParseError> {
        if self.cursor.next_is("null")? {
            return Ok(Some(Literal::Null));
        }
        if let Some(literal) = self.integer()? {
            return Ok(Some(literal));
        }
        if self.cursor.matches(Pattern::Real)? {
            let text = self.cursor.next()?;
            // Reals that overflow to infinity have no written form.
            let value = text
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ParseError::InvalidNumber { text: text.clone() })?;
            return Ok(Some(Literal::Real(value)));
        }
        if let Some(token) = self.cursor.next_in(&["true", "false"])? {
            return Ok(Some(Literal::Bool(token == "true")));
        }
        if self.cursor.peek()?.starts_with('"') {
            let value = unescape(&self.cursor.next()?);
            self.notify_string(&value)?;
            return Ok(Some(Literal::String(value)));
        }
        Ok(None)
    }

    /// Decimal, octal or hex integer. Octal and hex keep their spelling.
    fn integer(&mut self) -> Result<Option<Literal>, ParseError> {
        if self.cursor.matches(Pattern::Decimal)? {
            let text = self.cursor.next()?;
            let value = parse_int(&text, &text, 10)?;
            return Ok(Some(Literal::Decimal(value)));
        }
        if self.cursor.matches(Pattern::Octal)? {
            let spelling = self.cursor.next()?;
            let value = parse_int(&spelling, &spelling, 8)?;
            return Ok(Some(Literal::Octal { value, spelling }));
        }
        if self.cursor.matches(Pattern::Hex)? {
            let spelling = self.cursor.next()?;
            let digits = spelling
                .strip_prefix("0x")
                .or_else(|| spelling.strip_prefix("0X"))
                .or_else(|| spelling.strip_prefix('$'))
                .unwrap_or(spelling.as_str());
            let value = parse_int(digits, &spelling, 16)?;
            return Ok(Some(Literal::Hex { value, spelling }));
        }
        Ok(None)
    }

    // =========================================================================
    // REFERENCES AND CALLS
    // =========================================================================

    /// Tried speculatively.
    fn array_ref(&mut self) -> Result<Expr, ParseError> {
        let id = self.id()?;
        self.cursor.expect("[")?;
        let index = self.expression()?;
        self.cursor.expect("]")?;
        Ok(Expr::ArrayRef {
            id,
            index: Box::new(index),
        })
    }

    fn function_ref(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.cursor.next_is("function")? {
            return Ok(None);
        }
        Ok(Some(Expr::FunctionRef(self.id()?)))
    }

    /// Tried speculatively. Unlike the call statement, a call inside an
    /// expression is not reported to the call observer.
    fn function_call(&mut self) -> Result<Expr, ParseError> {
        let id = self.id()?;
        let args = self.args()?;
        Ok(Expr::Call { id, args })
    }

    /// Parenthesized argument list.
    pub(super) fn args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect("(")?;
        let mut args = Vec::new();
        while !self.cursor.next_is(")")? {
            if !args.is_empty() {
                self.cursor.expect(",")?;
            }
            args.push(self.expression()?);
        }
        Ok(args)
    }

    /// Parentheses group but leave no node behind.
    fn parenthesized(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.cursor.next_is("(")? {
            return Ok(None);
        }
        let expr = self.expression()?;
        self.cursor.expect(")")?;
        Ok(Some(expr))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn parse_int(digits: &str, spelling: &str, radix: u32) -> Result<i64, ParseError> {
    i64::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidNumber {
        text: spelling.to_string(),
    })
}

/// Strip the quotes from a string token and resolve escapes.
///
/// `\n`, `\t` and `\r` become control characters; any other escaped
/// character stands for itself.
fn unescape(token: &str) -> String {
    let inner = token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
