// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Midpoints between fractional parts.
//!
//! A fractional part is read as the digits after a radix point, so `""` is
//! 0 and `"V"` is one half in base 62. `midpoint(a, b)` returns the shortest
//! reasonable string strictly between the two:
//!
//! 1. Drop the common prefix (a missing digit in `a` counts as zero).
//! 2. If the first digits differ by two or more, pick the digit halfway
//!    between them and stop.
//! 3. If they differ by one and `b` continues, `b`'s first digit alone is
//!    already below `b` and above `a`.
//! 4. Otherwise keep `a`'s digit and recurse on the rest of `a` against
//!    an open upper bound.
//!
//! Step 2 keeps keys short; repeatedly inserting at the same spot adds
//! roughly one digit every log2(62) insertions.

use crate::digits::Digits;
use crate::error::RankError;
use crate::error::Result;

/// A string strictly between fractional parts `a` and `b`.
///
/// `b = None` means no upper bound. Fails if `a >= b`, if either ends in the
/// zero digit, or if either contains a symbol outside `digits`.
pub fn midpoint(a: &str, b: Option<&str>, digits: &Digits<'_>) -> Result<String> {
    if let Some(b) = b {
        if a >= b {
            return Err(RankError::OutOfOrder {
                lower: a.to_string(),
                upper: b.to_string(),
            });
        }
    }
    check_fraction(a, digits)?;
    if let Some(b) = b {
        check_fraction(b, digits)?;
    }

    let mut out = String::new();
    midpoint_into(&mut out, a.as_bytes(), b.map(str::as_bytes), digits);
    return Ok(out);
}

fn check_fraction(f: &str, digits: &Digits<'_>) -> Result<()> {
    if f.bytes().any(|b| !digits.contains(b)) {
        return Err(RankError::InvalidKey(f.to_string()));
    }
    if f.as_bytes().last() == Some(&digits.zero()) {
        return Err(RankError::TrailingZero(f.to_string()));
    }
    return Ok(());
}

/// Inputs are checked by `midpoint`; this only walks the digits.
fn midpoint_into(out: &mut String, a: &[u8], b: Option<&[u8]>, digits: &Digits<'_>) {
    let zero = digits.zero();

    if let Some(b) = b {
        let mut n = 0;
        while n < b.len() && a.get(n).copied().unwrap_or(zero) == b[n] {
            n += 1;
        }
        if n > 0 {
            out.extend(b[..n].iter().map(|&c| c as char));
            let rest_a = a.get(n..).unwrap_or(&[]);
            return midpoint_into(out, rest_a, Some(&b[n..]), digits);
        }
    }

    let digit_a = match a.first() {
        Some(&c) => digits.index_of(c).unwrap_or(0),
        None => 0,
    };
    let digit_b = match b {
        Some(b) => b.first().and_then(|&c| digits.index_of(c)).unwrap_or(digits.len()),
        None => digits.len(),
    };

    if digit_b > digit_a + 1 {
        // Round half up, so 0..62 picks 31 ('V').
        let mid = (digit_a + digit_b + 1) / 2;
        out.push(digits.symbol(mid) as char);
        return;
    }

    match b {
        Some(b) if b.len() > 1 => {
            out.push(b[0] as char);
        }
        _ => {
            out.push(digits.symbol(digit_a) as char);
            midpoint_into(out, a.get(1..).unwrap_or(&[]), None, digits);
        }
    }
}
