// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Digit alphabets for the body of an order key.
//!
//! The integer body and the fractional part of a key are numerals written in
//! an alphabet of ASCII symbols. Symbols must be in strictly ascending byte
//! order so that comparing two keys as strings is the same as comparing them
//! as numbers. Integer heads (`a..z`, `A..Z`) are not part of the alphabet.

use crate::error::RankError;
use crate::error::Result;

/// The default alphabet: `0-9A-Za-z`.
pub const BASE_62_DIGITS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The default 62 symbol alphabet.
pub static BASE_62: Digits<'static> = Digits::from_sorted_ascii(BASE_62_DIGITS);

/// Marks a byte that is not a symbol of the alphabet.
const NOT_A_DIGIT: u8 = u8::MAX;

/// An ordered alphabet of ASCII digit symbols.
///
/// Index 0 is the zero symbol. Lookup from symbol to index is a table read.
#[derive(Clone)]
pub struct Digits<'a> {
    symbols: &'a str,
    table: [u8; 256],
}

const fn build_table(symbols: &[u8]) -> [u8; 256] {
    let mut table = [NOT_A_DIGIT; 256];
    let mut i = 0;
    while i < symbols.len() {
        table[symbols[i] as usize] = i as u8;
        i += 1;
    }
    return table;
}

impl<'a> Digits<'a> {
    /// Build an alphabet the caller already knows to be valid.
    const fn from_sorted_ascii(symbols: &'a str) -> Digits<'a> {
        return Digits {
            symbols,
            table: build_table(symbols.as_bytes()),
        };
    }

    /// Validate and build a custom alphabet.
    ///
    /// The alphabet needs at least two symbols, all ASCII, in strictly
    /// ascending byte order.
    pub fn new(symbols: &'a str) -> Result<Digits<'a>> {
        let bytes = symbols.as_bytes();
        if bytes.len() < 2 {
            return Err(RankError::InvalidDigits(format!(
                "need at least two symbols, got {}",
                bytes.len()
            )));
        }
        if !symbols.is_ascii() {
            return Err(RankError::InvalidDigits(format!("non-ascii symbols in {symbols:?}")));
        }
        for pair in bytes.windows(2) {
            if pair[0] >= pair[1] {
                return Err(RankError::InvalidDigits(format!(
                    "{:?} is not strictly after {:?}",
                    pair[1] as char, pair[0] as char
                )));
            }
        }
        return Ok(Digits::from_sorted_ascii(symbols));
    }

    /// Number of symbols (the base).
    #[inline]
    pub fn len(&self) -> usize {
        return self.symbols.len();
    }

    /// Always false: an alphabet has at least two symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.symbols.is_empty();
    }

    /// The zero symbol.
    #[inline]
    pub fn zero(&self) -> u8 {
        return self.symbols.as_bytes()[0];
    }

    /// The largest symbol.
    #[inline]
    pub fn max(&self) -> u8 {
        return self.symbols.as_bytes()[self.len() - 1];
    }

    /// The symbol at `index`. Panics if `index >= len()`.
    #[inline]
    pub fn symbol(&self, index: usize) -> u8 {
        return self.symbols.as_bytes()[index];
    }

    /// The index of a symbol, or None if it isn't in the alphabet.
    #[inline]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        let index = self.table[symbol as usize];
        if index == NOT_A_DIGIT {
            return None;
        }
        return Some(index as usize);
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        return self.table[symbol as usize] != NOT_A_DIGIT;
    }

    pub fn as_str(&self) -> &'a str {
        return self.symbols;
    }
}

impl std::fmt::Debug for Digits<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "Digits({:?})", self.symbols);
    }
}

impl Default for Digits<'static> {
    fn default() -> Self {
        return BASE_62.clone();
    }
}
