// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Ordkey - fractional-indexing order keys.
//!
//! An order key is a short string that sorts lexicographically. Given two
//! neighbours we can always mint a key strictly between them, so a record can
//! be moved or inserted without renumbering anything else.
//!
//! # Quick Start
//!
//! ```
//! use ordkey::generate_key_between;
//! use ordkey::generate_n_keys_between;
//!
//! let first = generate_key_between(None, None).unwrap();
//! assert_eq!(first, "a0");
//!
//! let next = generate_key_between(Some(first.as_str()), None).unwrap();
//! let middle = generate_key_between(Some(first.as_str()), Some(next.as_str())).unwrap();
//! assert!(first < middle && middle < next);
//!
//! let batch = generate_n_keys_between(Some(first.as_str()), Some(middle.as_str()), 3).unwrap();
//! assert_eq!(batch.len(), 3);
//! ```
//!
//! # Key layout
//!
//! ```text
//! a0V
//! ^^-- integer part: head 'a' says "two characters long"
//!   ^- fractional part: never ends in the zero digit
//! ```
//!
//! Lowercase heads `a..z` encode integer parts of length 2..27, uppercase
//! heads `Z..A` encode length 2..27 for the negative side, so every integer
//! part sorts correctly against every other one as a plain string.

pub mod backlog;
pub mod digits;
pub mod error;
pub mod integer;
pub mod key;
pub mod midpoint;

pub use backlog::Backlog;
pub use backlog::BacklogConfig;
pub use backlog::BacklogError;
pub use digits::BASE_62;
pub use digits::BASE_62_DIGITS;
pub use digits::Digits;
pub use error::RankError;
pub use error::Result;
pub use integer::decrement_integer;
pub use integer::get_integer_length;
pub use integer::get_integer_part;
pub use integer::increment_integer;
pub use integer::validate_integer;
pub use key::generate_key_between;
pub use key::generate_key_between_with_digits;
pub use key::generate_n_keys_between;
pub use key::generate_n_keys_between_with_digits;
pub use key::is_strictly_ascending;
pub use key::max_rank_len;
pub use key::needs_rebalance;
pub use key::rebalance_ranks;
pub use key::validate_order_key;
pub use midpoint::midpoint;
