//! # Configuration Constants
//!
//! Centralized constants for the JASS toolchain.
//!
//! ## Categories
//!
//! - **Limits**: Safety trip-wires for the parser
//! - **Formatting**: Defaults for the source writer

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of consecutive peeks at one token position.
///
/// The token cursor counts how often the current token is inspected without
/// the position moving. Grammar productions that loop without consuming
/// input trip this limit and abort the parse instead of spinning forever.
///
/// # Example
///
/// ```rust
/// use config::constants::STUCK_PEEK_LIMIT;
///
/// let peeks_at_same_token = 101;
/// assert!(peeks_at_same_token > STUCK_PEEK_LIMIT);
/// ```
pub const STUCK_PEEK_LIMIT: usize = 100;

/// Remaining stack below which recursive parsing, folding and writing
/// switch to a freshly allocated segment.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
///
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 128 * 1024;

/// Size of each stack segment allocated by the `stacker` crate when deeply
/// nested expressions or statements exhaust the red zone.
pub const STACKER_STACK_SIZE_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// FORMATTING CONSTANTS
// =============================================================================

/// Indentation unit repeated once per nesting level by the writer.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_INDENT_UNIT;
///
/// let depth = 2;
/// assert_eq!(DEFAULT_INDENT_UNIT.repeat(depth), "        ");
/// ```
pub const DEFAULT_INDENT_UNIT: &str = "    ";

/// Line terminator emitted after every line of written source.
pub const DEFAULT_LINE_TERMINATOR: &str = "\n";
