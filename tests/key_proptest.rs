// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Property-based tests for key generation.

use proptest::prelude::*;

use ordkey::BASE_62;
use ordkey::generate_key_between;
use ordkey::generate_n_keys_between;
use ordkey::get_integer_length;
use ordkey::is_strictly_ascending;
use ordkey::rebalance_ranks;
use ordkey::validate_order_key;

// =============================================================================
// Test helpers
// =============================================================================

/// Any valid order key: a well formed integer part plus up to five
/// fractional digits that don't end in zero.
fn arbitrary_key() -> impl Strategy<Value = String> {
    let head = prop_oneof![b'a'..=b'z', b'A'..=b'Z'];
    (
        head,
        prop::collection::vec(0usize..62, 26),
        prop::collection::vec(0usize..62, 0..6),
    )
        .prop_map(|(head, body, mut frac)| {
            let len = get_integer_length(head).unwrap();
            let mut key = String::new();
            key.push(head as char);
            for &d in &body[..len - 1] {
                key.push(BASE_62.symbol(d) as char);
            }
            while frac.last() == Some(&0) {
                frac.pop();
            }
            for d in frac {
                key.push(BASE_62.symbol(d) as char);
            }
            key
        })
        .prop_filter("the smallest integer alone is not a key", |k| {
            validate_order_key(k, &BASE_62).is_ok()
        })
}

/// Two distinct valid keys, lower first.
fn ordered_pair() -> impl Strategy<Value = (String, String)> {
    (arbitrary_key(), arbitrary_key())
        .prop_filter("keys must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| if a < b { (a, b) } else { (b, a) })
}

fn check_ascending_within(keys: &[String], a: Option<&str>, b: Option<&str>) -> Result<(), TestCaseError> {
    prop_assert!(is_strictly_ascending(keys), "not ascending: {:?}", keys);
    if let (Some(a), Some(first)) = (a, keys.first()) {
        prop_assert!(a < first.as_str(), "{} !< {}", a, first);
    }
    if let (Some(b), Some(last)) = (b, keys.last()) {
        prop_assert!(last.as_str() < b, "{} !< {}", last, b);
    }
    for key in keys {
        prop_assert!(validate_order_key(key, &BASE_62).is_ok(), "generated invalid key {}", key);
    }
    return Ok(());
}

// =============================================================================
// Single key properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A key between two bounds sorts strictly between them and is itself valid.
    #[test]
    fn key_between_is_strictly_between((a, b) in ordered_pair()) {
        let k = generate_key_between(Some(a.as_str()), Some(b.as_str())).unwrap();
        prop_assert!(a < k, "{} !< {}", a, k);
        prop_assert!(k < b, "{} !< {}", k, b);
        prop_assert!(validate_order_key(&k, &BASE_62).is_ok());
    }

    /// Swapping the bounds is always an error.
    #[test]
    fn reversed_bounds_fail((a, b) in ordered_pair()) {
        prop_assert!(generate_key_between(Some(b.as_str()), Some(a.as_str())).is_err());
    }

    #[test]
    fn head_insert_sorts_first(b in arbitrary_key()) {
        let k = generate_key_between(None, Some(b.as_str())).unwrap();
        prop_assert!(k < b, "{} !< {}", k, b);
        prop_assert!(validate_order_key(&k, &BASE_62).is_ok());
    }

    #[test]
    fn tail_insert_sorts_last(a in arbitrary_key()) {
        let k = generate_key_between(Some(a.as_str()), None).unwrap();
        prop_assert!(a < k, "{} !< {}", a, k);
        prop_assert!(validate_order_key(&k, &BASE_62).is_ok());
    }

    /// Inserting again and again right after the same item keeps working.
    #[test]
    fn repeated_insert_after_same_item((a, b) in ordered_pair(), steps in 1usize..60) {
        let mut upper = b.clone();
        for _ in 0..steps {
            let k = generate_key_between(Some(a.as_str()), Some(upper.as_str())).unwrap();
            prop_assert!(a < k && k < upper);
            upper = k;
        }
    }
}

// =============================================================================
// Batch properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn n_keys_between_bounds((a, b) in ordered_pair(), n in 0usize..64) {
        let keys = generate_n_keys_between(Some(a.as_str()), Some(b.as_str()), n).unwrap();
        prop_assert_eq!(keys.len(), n);
        check_ascending_within(&keys, Some(a.as_str()), Some(b.as_str()))?;
    }

    #[test]
    fn n_keys_after(a in arbitrary_key(), n in 0usize..64) {
        let keys = generate_n_keys_between(Some(a.as_str()), None, n).unwrap();
        prop_assert_eq!(keys.len(), n);
        check_ascending_within(&keys, Some(a.as_str()), None)?;
    }

    #[test]
    fn n_keys_before(b in arbitrary_key(), n in 0usize..64) {
        let keys = generate_n_keys_between(None, Some(b.as_str()), n).unwrap();
        prop_assert_eq!(keys.len(), n);
        check_ascending_within(&keys, None, Some(b.as_str()))?;
    }

    /// Rebalancing only looks at the length of its input.
    #[test]
    fn rebalance_preserves_count(ranks in prop::collection::vec(arbitrary_key(), 0..100)) {
        let fresh = rebalance_ranks(&ranks);
        prop_assert_eq!(fresh.len(), ranks.len());
        check_ascending_within(&fresh, None, None)?;
        prop_assert_eq!(fresh, generate_n_keys_between(None, None, ranks.len()).unwrap());
    }
}
