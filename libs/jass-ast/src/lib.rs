//! # JASS AST Crate
//!
//! Typed syntax tree for JASS map scripts, plus the two pure operations that
//! work on it without a parser: constant folding and source writing.
//!
//! ## Architecture
//!
//! ```text
//! jass-parser (source → Program) ──► jass-ast
//!                                     ├── fold_constant(&Expr) → Expr
//!                                     └── write(&Program, &WriteOptions) → String
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use jass_ast::{fold_constant, write_expr, BinaryOp, Expr, OperatorChain};
//!
//! let mut chain = OperatorChain::new(Expr::decimal(1));
//! chain.push(BinaryOp::Add, Expr::decimal(2));
//! let expr = Expr::Chain(chain);
//!
//! assert_eq!(write_expr(&expr), "1 + 2");
//! assert_eq!(write_expr(&fold_constant(&expr)), "3.0");
//! ```
//!
//! ## Design Principles
//!
//! - **Plain values**: nodes are owned trees, cloned and compared freely
//! - **Flat chains**: binary operators are stored as left-to-right runs at
//!   one of two precedence tiers, never as a binary tree
//! - **No validation**: the writer trusts the tree it is given

pub mod ast;
pub mod fold;
pub mod printer;

// Re-exports for convenience
pub use ast::*;
pub use fold::fold_constant;
pub use printer::{write, write_expr, WriteOptions};
