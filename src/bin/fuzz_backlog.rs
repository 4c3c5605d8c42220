//! AFL Fuzz harness for the ranked backlog
//!
//! This harness tests the ordering invariants:
//! 1. Ranks are strictly ascending in backlog order after every operation
//! 2. Every rank is a valid order key (can be fed back in as a bound)
//! 3. The backlog order matches a plain Vec model driven by the same operations
//! 4. A store fed only the returned ranks plus `drain_rewritten` matches the backlog
//!
//! Model: one backlog and one Vec<u32> receive the same inserts, moves and
//! removes; only the backlog knows about ranks.

use afl::fuzz;
use rustc_hash::FxHashMap;
use ordkey::BASE_62;
use ordkey::Backlog;
use ordkey::BacklogConfig;
use ordkey::is_strictly_ascending;
use ordkey::validate_order_key;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert a new item at a fraction of the current length
    Insert { pos_frac: u8 },
    /// Insert a batch of new items at a fraction of the current length
    Extend { pos_frac: u8, len: u8 },
    /// Move an existing item to another position
    Move { item_frac: u8, pos_frac: u8 },
    /// Remove an existing item
    Remove { item_frac: u8 },
    /// Regenerate all ranks
    Rebalance,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 5;
        let rest = &bytes[1..];

        match op_type {
            0 if !rest.is_empty() => Some((FuzzOp::Insert { pos_frac: rest[0] }, &rest[1..])),
            1 if rest.len() >= 2 => {
                let op = FuzzOp::Extend {
                    pos_frac: rest[0],
                    len: (rest[1] % 16).saturating_add(1), // 1-16 items
                };
                Some((op, &rest[2..]))
            }
            2 if rest.len() >= 2 => {
                let op = FuzzOp::Move { item_frac: rest[0], pos_frac: rest[1] };
                Some((op, &rest[2..]))
            }
            3 if !rest.is_empty() => Some((FuzzOp::Remove { item_frac: rest[0] }, &rest[1..])),
            4 => Some((FuzzOp::Rebalance, rest)),
            _ => None,
        }
    }
}

fn scale(frac: u8, len: usize) -> usize {
    return (frac as usize * len) / 256;
}

fn main() {
    fuzz!(|data: &[u8]| {
        let config = BacklogConfig { rebalance_threshold: 24, auto_rebalance: data.len() % 2 == 0 };
        let mut backlog: Backlog<u32> = Backlog::with_config(config);
        let mut model: Vec<u32> = Vec::new();
        let mut store: FxHashMap<u32, String> = FxHashMap::default();
        let mut next_id = 0u32;
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Insert { pos_frac } => {
                    let pos = scale(pos_frac, model.len() + 1);
                    let rank = backlog.insert_at(pos, next_id).expect("insert failed");
                    store.insert(next_id, rank);
                    model.insert(pos, next_id);
                    next_id += 1;
                }

                FuzzOp::Extend { pos_frac, len } => {
                    let pos = scale(pos_frac, model.len() + 1);
                    let ids: Vec<u32> = (next_id..next_id + len as u32).collect();
                    next_id += len as u32;
                    let ranks = backlog.extend_at(pos, ids.clone()).expect("extend failed");
                    store.extend(ids.iter().copied().zip(ranks));
                    model.splice(pos..pos, ids);
                }

                FuzzOp::Move { item_frac, pos_frac } => {
                    if model.is_empty() {
                        continue;
                    }
                    let id = model[scale(item_frac, model.len())];
                    let to = scale(pos_frac, model.len());
                    let rank = backlog.move_to(&id, to).expect("move failed");
                    store.insert(id, rank);
                    model.retain(|&x| x != id);
                    model.insert(to, id);
                }

                FuzzOp::Remove { item_frac } => {
                    if model.is_empty() {
                        continue;
                    }
                    let id = model.remove(scale(item_frac, model.len()));
                    assert!(backlog.remove(&id).is_some(), "remove lost item {}", id);
                    store.remove(&id);
                }

                FuzzOp::Rebalance => {
                    backlog.rebalance();
                    assert!(!backlog.needs_rebalance(), "rebalance left long keys");
                }
            }

            for entry in backlog.drain_rewritten() {
                store.insert(entry.id, entry.rank);
            }

            // CRITICAL INVARIANT: ranks stay strictly ordered
            assert!(is_strictly_ascending(backlog.entries()), "ranks out of order after {:?}", op);
        }

        assert_eq!(store.len(), backlog.len(), "store size diverged");
        for (id, rank) in backlog.iter() {
            assert_eq!(store.get(id).map(|r| r.as_str()), Some(rank), "store lost a rewrite of {}", id);
        }

        let order: Vec<u32> = backlog.ids().copied().collect();
        assert_eq!(order, model, "backlog order diverged from model");
        for entry in backlog.entries() {
            assert!(validate_order_key(&entry.rank, &BASE_62).is_ok(), "invalid rank {}", entry.rank);
        }
    });
}
