//! # Parse Errors
//!
//! Error type for the JASS parser.
//!
//! Errors carry the offending token, not a source location. The first error
//! aborts the whole parse; there is no recovery and no partial tree.
//!
//! ## Example
//!
//! ```rust
//! use jass_parser::error::ParseError;
//!
//! let error = ParseError::unexpected_token("endfunction", "endif");
//! assert_eq!(error.to_string(), "endfunction expected, 'endif' found");
//! ```

use thiserror::Error;

/// Error returned by an observation callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// Errors that abort a parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    #[error("{expected} expected, '{found}' found")]
    UnexpectedToken {
        /// Expected literal token, or a description such as `identifier`.
        expected: String,
        /// Token that was found.
        found: String,
    },

    /// Ran out of tokens.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// The same token was peeked too often without the cursor moving.
    #[error("parser stuck at token {position} after {peeks} peeks")]
    StuckCursor {
        /// Index of the token the cursor is stuck on.
        position: usize,
        /// Number of consecutive peeks.
        peeks: usize,
    },

    /// An integer literal that cannot be represented.
    #[error("invalid number literal '{text}'")]
    InvalidNumber {
        /// The literal as written.
        text: String,
    },

    /// An observation callback failed.
    #[error("callback failed: {0}")]
    Callback(#[source] CallbackError),
}

impl ParseError {
    /// Create unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `expected`: Expected token or description
    /// - `found`: Token that was found
    pub fn unexpected_token(expected: &str, found: &str) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Whether a speculative production may roll back on this error and try
    /// the next alternative.
    ///
    /// Only plain syntax mismatches qualify. A stuck cursor, a malformed
    /// number or a failing callback always aborts the parse.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnexpectedToken { .. } | Self::UnexpectedEndOfInput)
    }
}

// =============================================================================
// TESTS
// =============================================================================
