//! # Constant Folding
//!
//! Best-effort evaluation of expressions made only of numeric literals.
//!
//! Folding walks an operator chain left to right, folding each operand
//! first. As soon as one operand does not reduce to a numeric literal the
//! whole fold is abandoned and the input node is returned untouched; partial
//! results are never mixed back into the tree. A successful fold always
//! produces a real literal, even when every operand was an integer.
//!
//! ## Example
//!
//! ```rust
//! use jass_ast::{fold_constant, BinaryOp, Expr, Literal, OperatorChain};
//!
//! let mut chain = OperatorChain::new(Expr::decimal(6));
//! chain.push(BinaryOp::Div, Expr::decimal(4));
//!
//! let folded = fold_constant(&Expr::Chain(chain));
//! assert_eq!(folded, Expr::Literal(Literal::Real(1.5)));
//! ```

use crate::ast::{BinaryOp, Expr, Literal, OperatorChain, UnaryOp};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

/// Fold `expr` into a single real literal where every operand is numeric.
///
/// Leaves (literals, variables, array references, calls, function
/// references) are returned unchanged. Chains and unary expressions fold
/// only when every operand does and the result is finite; otherwise the
/// original node comes back.
pub fn fold_constant(expr: &Expr) -> Expr {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        try_fold(expr).unwrap_or_else(|| expr.clone())
    })
}

fn try_fold(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Unary { op, operand } => {
            let value = numeric(&fold_constant(operand))?;
            match op {
                UnaryOp::Neg => Some(Expr::real(-value)),
                UnaryOp::Pos => Some(Expr::real(value)),
                UnaryOp::Not => None,
            }
        }
        Expr::Chain(chain) => fold_chain(chain).map(Expr::real),
        _ => Some(expr.clone()),
    }
}

fn fold_chain(chain: &OperatorChain) -> Option<f64> {
    let mut acc = numeric(&fold_constant(&chain.head))?;
    for (op, operand) in &chain.tail {
        let value = numeric(&fold_constant(operand))?;
        acc = match op {
            BinaryOp::Add => acc + value,
            BinaryOp::Sub => acc - value,
            BinaryOp::Mul => acc * value,
            BinaryOp::Div if value != 0.0 => acc / value,
            _ => return None,
        };
    }
    Some(acc).filter(|value| value.is_finite())
}

fn numeric(expr: &Expr) -> Option<f64> {
    expr.as_literal().and_then(Literal::numeric_value)
}

// =============================================================================
// TESTS
// =============================================================================
