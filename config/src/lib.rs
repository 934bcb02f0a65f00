//! # Config Crate
//!
//! Centralized configuration constants for the JASS parser and writer.
//! Tunable limits and formatting defaults live here so the parser and
//! writer crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_INDENT_UNIT, STUCK_PEEK_LIMIT};
//!
//! assert_eq!(STUCK_PEEK_LIMIT, 100);
//! let nested = DEFAULT_INDENT_UNIT.repeat(2);
//! assert_eq!(nested.len(), 2 * DEFAULT_INDENT_UNIT.len());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants, safe to depend on from any crate

pub mod constants;
