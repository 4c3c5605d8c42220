//! Reproduce AFL crashes from fuzz_backlog without AFL instrumentation
//!
//! Usage: cargo run --bin repro_crash -- <crash_file>

use std::fs;
use ordkey::Backlog;
use ordkey::BacklogConfig;
use ordkey::is_strictly_ascending;

#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Insert { pos_frac: u8 },
    Extend { pos_frac: u8, len: u8 },
    Move { item_frac: u8, pos_frac: u8 },
    Remove { item_frac: u8 },
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
                    len: (rest[1] % 16).saturating_add(1),
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

fn dump(backlog: &Backlog<u32>) {
    for (id, rank) in backlog.iter() {
        eprintln!("    {:>4} {}", id, rank);
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }
    let data = fs::read(&args[1]).expect("Failed to read file");

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    // Same config choice as the fuzzer
    let config = BacklogConfig { rebalance_threshold: 24, auto_rebalance: data.len() % 2 == 0 };
    let mut backlog: Backlog<u32> = Backlog::with_config(config);
    let mut model: Vec<u32> = Vec::new();
    let mut next_id = 0u32;
    let mut remaining = data.as_slice();
    let mut op_num = 0;

    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;
        op_num += 1;
        eprintln!("Op {}: {:?}", op_num, op);

        let result = match op {
            FuzzOp::Insert { pos_frac } => {
                let pos = scale(pos_frac, model.len() + 1);
                model.insert(pos, next_id);
                next_id += 1;
                backlog.insert_at(pos, next_id - 1).map(|rank| vec![rank])
            }
            FuzzOp::Extend { pos_frac, len } => {
                let pos = scale(pos_frac, model.len() + 1);
                let ids: Vec<u32> = (next_id..next_id + len as u32).collect();
                next_id += len as u32;
                model.splice(pos..pos, ids.clone());
                backlog.extend_at(pos, ids)
            }
            FuzzOp::Move { item_frac, pos_frac } => {
                if model.is_empty() {
                    eprintln!("  (empty, skipped)");
                    continue;
                }
                let id = model[scale(item_frac, model.len())];
                let to = scale(pos_frac, model.len());
                model.retain(|&x| x != id);
                model.insert(to, id);
                backlog.move_to(&id, to).map(|rank| vec![rank])
            }
            FuzzOp::Remove { item_frac } => {
                if model.is_empty() {
                    eprintln!("  (empty, skipped)");
                    continue;
                }
                let id = model.remove(scale(item_frac, model.len()));
                Ok(backlog.remove(&id).into_iter().collect())
            }
            FuzzOp::Rebalance => {
                let changed = backlog.rebalance();
                eprintln!("  {} ranks changed", changed);
                Ok(Vec::new())
            }
        };

        match result {
            Ok(ranks) => {
                eprintln!("  ranks: {:?}", ranks);
                let rewritten = backlog.drain_rewritten();
                if !rewritten.is_empty() {
                    eprintln!("  rewritten: {} rows", rewritten.len());
                }
            }
            Err(err) => {
                eprintln!("  ERROR: {}", err);
                dump(&backlog);
                std::process::exit(1);
            }
        }

        if !is_strictly_ascending(backlog.entries()) {
            eprintln!("  ranks out of order:");
            dump(&backlog);
            std::process::exit(1);
        }
    }

    let order: Vec<u32> = backlog.ids().copied().collect();
    if order != model {
        eprintln!("Final order diverged from model");
        eprintln!("  backlog: {:?}", order);
        eprintln!("  model:   {:?}", model);
        std::process::exit(1);
    }
    eprintln!("No crash reproduced ({} items, longest rank {})", backlog.len(), backlog.max_key_len());
}
