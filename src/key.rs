// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Generating order keys between neighbours.
//!
//! A key is an integer part followed by an optional fractional part (see
//! `integer` and `midpoint`). New keys prefer bumping the integer part,
//! which keeps them short when appending or prepending, and only fall back
//! to the fractional part when two integer parts are adjacent.
//!
//! All functions are pure: no shared state, safe to call from any thread.

use tracing::trace;

use crate::digits::BASE_62;
use crate::digits::Digits;
use crate::error::RankError;
use crate::error::Result;
use crate::integer::decrement_integer;
use crate::integer::get_integer_part;
use crate::integer::increment_integer;
use crate::integer::smallest_integer;
use crate::midpoint::midpoint;

/// Check that `key` is a well formed order key.
///
/// Rejects an empty key, a bad head, a key shorter than its integer part,
/// symbols outside `digits`, a fractional part ending in the zero digit, and
/// the smallest integer part on its own (nothing could ever sort before it).
pub fn validate_order_key(key: &str, digits: &Digits<'_>) -> Result<()> {
    let int = get_integer_part(key)?;
    if key.len() == int.len() && key == smallest_integer(digits) {
        return Err(RankError::InvalidKey(key.to_string()));
    }
    if key.bytes().skip(1).any(|b| !digits.contains(b)) {
        return Err(RankError::InvalidKey(key.to_string()));
    }
    let frac = &key[int.len()..];
    if frac.as_bytes().last() == Some(&digits.zero()) {
        return Err(RankError::InvalidKey(key.to_string()));
    }
    return Ok(());
}

/// A key strictly between `a` and `b` in the default base 62 alphabet.
///
/// `None` stands for an open end: `(None, None)` is `"a0"`, `(None, Some(b))`
/// inserts at the head and `(Some(a), None)` at the tail.
pub fn generate_key_between(a: Option<&str>, b: Option<&str>) -> Result<String> {
    return generate_key_between_with_digits(a, b, &BASE_62);
}

/// A key strictly between `a` and `b` using a custom alphabet.
pub fn generate_key_between_with_digits(
    a: Option<&str>,
    b: Option<&str>,
    digits: &Digits<'_>,
) -> Result<String> {
    if let Some(a) = a {
        validate_order_key(a, digits)?;
    }
    if let Some(b) = b {
        validate_order_key(b, digits)?;
    }
    if let (Some(a), Some(b)) = (a, b) {
        if a >= b {
            return Err(RankError::OutOfOrder {
                lower: a.to_string(),
                upper: b.to_string(),
            });
        }
    }

    return match (a, b) {
        (None, None) => {
            let mut key = String::with_capacity(2);
            key.push('a');
            key.push(digits.zero() as char);
            Ok(key)
        }
        (None, Some(b)) => key_before(b, digits),
        (Some(a), None) => key_after(a, digits),
        (Some(a), Some(b)) => key_inside(a, b, digits),
    };
}

fn key_before(b: &str, digits: &Digits<'_>) -> Result<String> {
    let ib = get_integer_part(b)?;
    let fb = &b[ib.len()..];
    let smallest = smallest_integer(digits);
    if ib == smallest {
        trace!(key = b, "head insert below smallest integer, extending fraction");
        return Ok(format!("{}{}", ib, midpoint("", Some(fb), digits)?));
    }
    if ib < b {
        return Ok(ib.to_string());
    }
    let prev = decrement_integer(ib, digits)?.ok_or(RankError::CannotDecrement)?;
    if prev == smallest {
        // The smallest integer alone is not a valid key.
        return Ok(format!("{}{}", prev, midpoint("", None, digits)?));
    }
    return Ok(prev);
}

fn key_after(a: &str, digits: &Digits<'_>) -> Result<String> {
    let ia = get_integer_part(a)?;
    let fa = &a[ia.len()..];
    if let Some(next) = increment_integer(ia, digits)? {
        return Ok(next);
    }
    trace!(key = a, "largest integer reached, extending fraction");
    return Ok(format!("{}{}", ia, midpoint(fa, None, digits)?));
}

fn key_inside(a: &str, b: &str, digits: &Digits<'_>) -> Result<String> {
    let ia = get_integer_part(a)?;
    let fa = &a[ia.len()..];
    let ib = get_integer_part(b)?;
    let fb = &b[ib.len()..];
    if ia == ib {
        return Ok(format!("{}{}", ia, midpoint(fa, Some(fb), digits)?));
    }
    let next = increment_integer(ia, digits)?.ok_or(RankError::CannotIncrement)?;
    if next.as_str() < b {
        return Ok(next);
    }
    return Ok(format!("{}{}", ia, midpoint(fa, None, digits)?));
}

/// `n` ascending keys strictly between `a` and `b`, base 62.
pub fn generate_n_keys_between(a: Option<&str>, b: Option<&str>, n: usize) -> Result<Vec<String>> {
    return generate_n_keys_between_with_digits(a, b, n, &BASE_62);
}

/// `n` ascending keys strictly between `a` and `b` using a custom alphabet.
///
/// With an open end the keys are chained one after another (or one before
/// another), which matches append and prepend workloads. With both bounds the
/// range is bisected recursively so key length grows with log(n), not n.
pub fn generate_n_keys_between_with_digits(
    a: Option<&str>,
    b: Option<&str>,
    n: usize,
    digits: &Digits<'_>,
) -> Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if n == 1 {
        return Ok(vec![generate_key_between_with_digits(a, b, digits)?]);
    }

    let Some(b) = b else {
        let mut keys = Vec::with_capacity(n);
        let mut c = generate_key_between_with_digits(a, None, digits)?;
        for _ in 1..n {
            let next = generate_key_between_with_digits(Some(c.as_str()), None, digits)?;
            keys.push(c);
            c = next;
        }
        keys.push(c);
        return Ok(keys);
    };

    let Some(a) = a else {
        let mut keys = Vec::with_capacity(n);
        let mut c = generate_key_between_with_digits(None, Some(b), digits)?;
        for _ in 1..n {
            let prev = generate_key_between_with_digits(None, Some(c.as_str()), digits)?;
            keys.push(c);
            c = prev;
        }
        keys.push(c);
        keys.reverse();
        return Ok(keys);
    };

    let half = n / 2;
    let c = generate_key_between_with_digits(Some(a), Some(b), digits)?;
    let mut keys = Vec::with_capacity(n);
    keys.extend(generate_n_keys_between_with_digits(Some(a), Some(c.as_str()), half, digits)?);
    let upper = generate_n_keys_between_with_digits(Some(c.as_str()), Some(b), n - half - 1, digits)?;
    keys.push(c);
    keys.extend(upper);
    return Ok(keys);
}

/// Fresh, evenly spaced keys for a list of the same length.
///
/// Only the length of `ranks` is used; the old keys are thrown away. This is
/// an explicit maintenance step for when repeated inserts have made keys
/// long (see `needs_rebalance`).
pub fn rebalance_ranks<S: AsRef<str>>(ranks: &[S]) -> Vec<String> {
    // With both bounds open every step is `key_after` on a key this loop
    // just produced, so it is valid. `key_after` bumps the integer part and,
    // once `increment_integer` returns `None` at the largest integer, falls
    // back to `midpoint(fraction, None)`, which has no upper bound to
    // violate. Neither path can return an error.
    return generate_n_keys_between(None, None, ranks.len())
        .expect("open ended key generation is infallible");
}

/// Length of the longest key, or 0 if there are none.
pub fn max_rank_len<T, S>(ranks: T) -> usize
where
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    return ranks.into_iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
}

/// True if any key is longer than `threshold`.
pub fn needs_rebalance<T, S>(ranks: T, threshold: usize) -> bool
where
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    return max_rank_len(ranks) > threshold;
}

/// True if every key sorts strictly after the one before it.
pub fn is_strictly_ascending<S: AsRef<str>>(ranks: &[S]) -> bool {
    return ranks.windows(2).all(|w| w[0].as_ref() < w[1].as_ref());
}
