// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! The integer part of an order key.
//!
//! An integer part is a head character followed by a fixed number of digits.
//! The head alone decides the total length:
//!
//! ```text
//! head:    A  B  ...  Y  Z | a  b  ...  y  z
//! length: 27 26  ...  3  2 | 2  3  ... 26 27
//! ```
//!
//! Uppercase heads hold the "negative" integers, lowercase heads the
//! "positive" ones. Longer negative integers sort first, longer positive
//! integers sort last, so plain string comparison orders integer parts
//! numerically. `get_integer_length` is the only place this table lives.

use smallvec::SmallVec;

use crate::digits::Digits;
use crate::error::RankError;
use crate::error::Result;

/// Longest possible integer part (heads `A` and `z`).
pub const MAX_INTEGER_LEN: usize = 27;

/// Digit indices of an integer body; never spills since integers are short.
type IntegerBuf = SmallVec<[usize; MAX_INTEGER_LEN]>;

/// Length of the integer part introduced by `head`, head included.
pub fn get_integer_length(head: u8) -> Result<usize> {
    return match head {
        b'a'..=b'z' => Ok((head - b'a') as usize + 2),
        b'A'..=b'Z' => Ok((b'Z' - head) as usize + 2),
        _ => Err(RankError::InvalidHead(head as char)),
    };
}

/// Check that an integer part is exactly as long as its head says.
pub fn validate_integer(int: &str) -> Result<()> {
    let Some(&head) = int.as_bytes().first() else {
        return Err(RankError::InvalidInteger(int.to_string()));
    };
    if int.len() != get_integer_length(head)? {
        return Err(RankError::InvalidInteger(int.to_string()));
    }
    return Ok(());
}

/// Split off the integer part of a full order key.
pub fn get_integer_part(key: &str) -> Result<&str> {
    let Some(&head) = key.as_bytes().first() else {
        return Err(RankError::InvalidKey(key.to_string()));
    };
    let len = get_integer_length(head)?;
    if len > key.len() || !key.is_char_boundary(len) {
        return Err(RankError::InvalidKey(key.to_string()));
    }
    return Ok(&key[..len]);
}

/// The smallest integer part: `A` followed by 26 zero digits.
///
/// Nothing can sort below it, so it is never a valid key on its own.
pub fn smallest_integer(digits: &Digits<'_>) -> String {
    let mut out = String::with_capacity(MAX_INTEGER_LEN);
    out.push('A');
    for _ in 1..MAX_INTEGER_LEN {
        out.push(digits.zero() as char);
    }
    return out;
}

fn body_digits(x: &str, digits: &Digits<'_>) -> Result<IntegerBuf> {
    let mut body = IntegerBuf::new();
    for &b in &x.as_bytes()[1..] {
        let Some(d) = digits.index_of(b) else {
            return Err(RankError::InvalidInteger(x.to_string()));
        };
        body.push(d);
    }
    return Ok(body);
}

fn assemble(head: u8, body: &[usize], digits: &Digits<'_>) -> String {
    let mut out = String::with_capacity(body.len() + 1);
    out.push(head as char);
    out.extend(body.iter().map(|&d| digits.symbol(d) as char));
    return out;
}

/// The next integer part after `x`.
///
/// Carries ripple right to left through the body. When the carry leaves the
/// body the head steps up one class: `Z` jumps across to `a0`, other heads
/// grow (lowercase) or shrink (uppercase) the body by one digit. `z` with an
/// all-max body has no successor and yields `Ok(None)`.
pub fn increment_integer(x: &str, digits: &Digits<'_>) -> Result<Option<String>> {
    validate_integer(x)?;
    let head = x.as_bytes()[0];
    let mut body = body_digits(x, digits)?;

    let mut carry = true;
    for d in body.iter_mut().rev() {
        if *d + 1 == digits.len() {
            *d = 0;
        } else {
            *d += 1;
            carry = false;
            break;
        }
    }

    if !carry {
        return Ok(Some(assemble(head, &body, digits)));
    }
    if head == b'Z' {
        return Ok(Some(assemble(b'a', &[0], digits)));
    }
    if head == b'z' {
        return Ok(None);
    }
    let next = head + 1;
    if next > b'a' {
        body.push(0);
    } else {
        body.pop();
    }
    return Ok(Some(assemble(next, &body, digits)));
}

/// The integer part before `x`.
///
/// Mirror image of `increment_integer`: `a` drops across to `Z` followed by
/// the max digit, and `A` with an all-zero body has no predecessor.
pub fn decrement_integer(x: &str, digits: &Digits<'_>) -> Result<Option<String>> {
    validate_integer(x)?;
    let head = x.as_bytes()[0];
    let mut body = body_digits(x, digits)?;

    let mut borrow = true;
    for d in body.iter_mut().rev() {
        if *d == 0 {
            *d = digits.len() - 1;
        } else {
            *d -= 1;
            borrow = false;
            break;
        }
    }

    if !borrow {
        return Ok(Some(assemble(head, &body, digits)));
    }
    if head == b'a' {
        return Ok(Some(assemble(b'Z', &[digits.len() - 1], digits)));
    }
    if head == b'A' {
        return Ok(None);
    }
    let prev = head - 1;
    if prev < b'Z' {
        body.push(digits.len() - 1);
    } else {
        body.pop();
    }
    return Ok(Some(assemble(prev, &body, digits)));
}
