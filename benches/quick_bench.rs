// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! Quick single-run benchmark for development iteration.

use std::time::Instant;

use ordkey::Backlog;
use ordkey::generate_key_between;

fn main() {
    let num_keys = 100_000;

    println!("=== append {} keys ===", num_keys);
    let start = Instant::now();
    let mut last = generate_key_between(None, None).unwrap();
    for _ in 1..num_keys {
        last = generate_key_between(Some(last.as_str()), None).unwrap();
    }
    let elapsed = start.elapsed();
    println!("  total: {:?}", elapsed);
    println!("  per key: {:?}", elapsed / num_keys as u32);
    println!("  last key: {} ({} chars)", last, last.len());

    println!("\n=== same spot, {} inserts ===", 1000);
    let start = Instant::now();
    let lower = "a0".to_string();
    let mut upper = "a1".to_string();
    for _ in 0..1000 {
        upper = generate_key_between(Some(lower.as_str()), Some(upper.as_str())).unwrap();
    }
    println!("  total: {:?}", start.elapsed());
    println!("  key length after: {}", upper.len());

    println!("\n=== backlog rebalance ===");
    let mut backlog = Backlog::new();
    backlog.push_back(0u64).unwrap();
    backlog.push_back(u64::MAX).unwrap();
    for id in 1..10_000u64 {
        backlog.insert_at(1, id).unwrap();
    }
    println!("  max key length before: {}", backlog.max_key_len());
    let start = Instant::now();
    let changed = backlog.rebalance();
    println!("  rebalanced {} of {} ranks in {:?}", changed, backlog.len(), start.elapsed());
    println!("  max key length after: {}", backlog.max_key_len());
}
