// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Errors raised while validating or generating order keys.
//!
//! Every failure is reported before any output is produced; there are no
//! partial results and nothing is retried.

use thiserror::Error;

/// Result type alias for key generation.
pub type Result<T> = std::result::Result<T, RankError>;

/// Error returned by key validation and generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// The lower bound does not sort strictly below the upper bound.
    #[error("{lower} >= {upper}")]
    OutOfOrder {
        /// The lower bound as given.
        lower: String,
        /// The upper bound as given.
        upper: String,
    },

    /// The first character is not a valid integer head (`a..z` or `A..Z`).
    #[error("invalid order key head: {0}")]
    InvalidHead(char),

    /// The integer part is not as long as its head says it should be.
    #[error("invalid integer part of order key: {0}")]
    InvalidInteger(String),

    /// The key is malformed as a whole.
    #[error("invalid order key: {0}")]
    InvalidKey(String),

    /// A fractional string passed to `midpoint` ends in the zero digit.
    #[error("trailing zero: {0}")]
    TrailingZero(String),

    /// There is no integer part below the minimum.
    #[error("cannot decrement any more")]
    CannotDecrement,

    /// There is no integer part above the maximum.
    #[error("cannot increment any more")]
    CannotIncrement,

    /// A custom digit alphabet was rejected.
    #[error("invalid digit alphabet: {0}")]
    InvalidDigits(String),
}
