// model = "claude-opus-4-5"
// created = "2026-10-18"
// modified = "2026-10-18"
// driver = "Isaac Clayton"

//! A ranked list of items, kept in order by their order keys.
//!
//! This is the bookkeeping a store does around the key generator: every item
//! carries one rank, inserting or moving an item mints exactly one new rank
//! from its neighbours, and nothing else is rewritten. The store persists
//! the rank strings returned by each operation and sorts by them.
//!
//! A rebalance is the one exception: it rewrites many ranks at once. The
//! rewritten items are remembered until `drain_rewritten` hands them to the
//! store, including those rewritten by `auto_rebalance` during an insert or
//! move.
//!
//! - Lookup by id: O(1) average case (hash map)
//! - Position of an id: O(log n) (binary search on rank)
//! - Insert, move, remove: O(n) for the shift in the backing vector

use std::hash::Hash;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

use crate::digits::BASE_62;
use crate::error::RankError;
use crate::key::generate_key_between;
use crate::key::generate_n_keys_between;
use crate::key::max_rank_len;
use crate::key::rebalance_ranks;
use crate::key::validate_order_key;

/// Error returned by backlog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BacklogError {
    /// The id is already in the backlog (or repeated within a batch).
    #[error("id is already in the backlog")]
    DuplicateId,

    /// The id is not in the backlog.
    #[error("id is not in the backlog")]
    UnknownId,

    /// The index is past the end of the backlog.
    #[error("index {index} out of bounds for backlog of length {len}")]
    OutOfBounds {
        /// The index that was asked for.
        index: usize,
        /// Number of items in the backlog at the time.
        len: usize,
    },

    /// Two loaded items share a rank.
    #[error("rank {0} is used more than once")]
    DuplicateRank(String),

    /// A rank was malformed or out of order.
    #[error(transparent)]
    Rank(#[from] RankError),
}

/// Tuning for when ranks get regenerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BacklogConfig {
    /// Longest key tolerated before `needs_rebalance` reports true.
    pub rebalance_threshold: usize,
    /// Rebalance automatically after an insert or move crosses the threshold.
    pub auto_rebalance: bool,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        return BacklogConfig {
            rebalance_threshold: 32,
            auto_rebalance: false,
        };
    }
}

/// One item and its rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<I> {
    pub id: I,
    pub rank: String,
}

impl<I> AsRef<str> for Entry<I> {
    fn as_ref(&self) -> &str {
        return &self.rank;
    }
}

/// Items ordered by rank.
///
/// Generic over the id type (e.g. a ticket id, `u64`, `String`).
#[derive(Clone, Debug)]
pub struct Backlog<I: Clone + Eq + Hash> {
    config: BacklogConfig,
    /// Sorted by rank, strictly ascending.
    entries: Vec<Entry<I>>,
    /// Map from id to rank.
    ranks: FxHashMap<I, String>,
    /// Ids whose rank a rebalance changed since the last drain.
    rewritten: FxHashSet<I>,
}

impl<I: Clone + Eq + Hash> Default for Backlog<I> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<I: Clone + Eq + Hash> Backlog<I> {
    /// Create an empty backlog with the default config.
    pub fn new() -> Backlog<I> {
        return Backlog::with_config(BacklogConfig::default());
    }

    pub fn with_config(config: BacklogConfig) -> Backlog<I> {
        return Backlog {
            config,
            entries: Vec::new(),
            ranks: FxHashMap::default(),
            rewritten: FxHashSet::default(),
        };
    }

    /// Load items that already have ranks, e.g. rows read back from a store.
    ///
    /// Every rank is validated. The input need not be sorted.
    pub fn from_ranked<T>(pairs: T) -> Result<Backlog<I>, BacklogError>
    where
        T: IntoIterator<Item = (I, String)>,
    {
        let mut backlog = Backlog::new();
        for (id, rank) in pairs {
            validate_order_key(&rank, &BASE_62)?;
            if backlog.ranks.contains_key(&id) {
                return Err(BacklogError::DuplicateId);
            }
            backlog.ranks.insert(id.clone(), rank.clone());
            backlog.entries.push(Entry { id, rank });
        }

        backlog.entries.sort_by(|x, y| x.rank.cmp(&y.rank));
        if let Some(pair) = backlog.entries.windows(2).find(|w| w[0].rank == w[1].rank) {
            return Err(BacklogError::DuplicateRank(pair[0].rank.clone()));
        }
        return Ok(backlog);
    }

    pub fn config(&self) -> &BacklogConfig {
        return &self.config;
    }

    pub fn set_config(&mut self, config: BacklogConfig) {
        self.config = config;
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    #[inline]
    pub fn contains(&self, id: &I) -> bool {
        return self.ranks.contains_key(id);
    }

    /// The rank currently assigned to `id`.
    #[inline]
    pub fn rank_of(&self, id: &I) -> Option<&str> {
        return self.ranks.get(id).map(|r| r.as_str());
    }

    /// Where `id` sits in rank order.
    pub fn position_of(&self, id: &I) -> Option<usize> {
        let rank = self.ranks.get(id)?;
        return self.entries.binary_search_by(|e| e.rank.cmp(rank)).ok();
    }

    /// Items in rank order.
    pub fn entries(&self) -> &[Entry<I>] {
        return &self.entries;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &str)> {
        return self.entries.iter().map(|e| (&e.id, e.rank.as_str()));
    }

    pub fn ids(&self) -> impl Iterator<Item = &I> {
        return self.entries.iter().map(|e| &e.id);
    }

    pub fn first(&self) -> Option<(&I, &str)> {
        return self.entries.first().map(|e| (&e.id, e.rank.as_str()));
    }

    pub fn last(&self) -> Option<(&I, &str)> {
        return self.entries.last().map(|e| (&e.id, e.rank.as_str()));
    }

    /// Ranks of the items either side of the gap before `index`.
    fn neighbours(&self, index: usize) -> (Option<&str>, Option<&str>) {
        let lower = match index {
            0 => None,
            _ => self.entries.get(index - 1).map(|e| e.rank.as_str()),
        };
        let upper = self.entries.get(index).map(|e| e.rank.as_str());
        return (lower, upper);
    }

    fn check_insert_index(&self, index: usize) -> Result<(), BacklogError> {
        if index > self.entries.len() {
            return Err(BacklogError::OutOfBounds { index, len: self.entries.len() });
        }
        return Ok(());
    }

    /// Append after the last item. Returns the new rank.
    pub fn push_back(&mut self, id: I) -> Result<String, BacklogError> {
        return self.insert_at(self.entries.len(), id);
    }

    /// Insert before the first item. Returns the new rank.
    pub fn push_front(&mut self, id: I) -> Result<String, BacklogError> {
        return self.insert_at(0, id);
    }

    /// Insert so that the item ends up at `index`. Returns the new rank.
    pub fn insert_at(&mut self, index: usize, id: I) -> Result<String, BacklogError> {
        self.check_insert_index(index)?;
        if self.ranks.contains_key(&id) {
            return Err(BacklogError::DuplicateId);
        }

        let (lower, upper) = self.neighbours(index);
        let rank = generate_key_between(lower, upper)?;
        self.ranks.insert(id.clone(), rank.clone());
        self.entries.insert(index, Entry { id: id.clone(), rank });

        self.settle();
        return Ok(self.ranks[&id].clone());
    }

    /// Insert a batch so the first ends up at `index`, in the given order.
    ///
    /// The ranks come from one `generate_n_keys_between` call, so a batch
    /// dropped into a narrow gap stays short.
    pub fn extend_at<T>(&mut self, index: usize, ids: T) -> Result<Vec<String>, BacklogError>
    where
        T: IntoIterator<Item = I>,
    {
        self.check_insert_index(index)?;
        let ids: Vec<I> = ids.into_iter().collect();
        let mut seen = FxHashSet::default();
        for id in &ids {
            if self.ranks.contains_key(id) || !seen.insert(id) {
                return Err(BacklogError::DuplicateId);
            }
        }

        let (lower, upper) = self.neighbours(index);
        let ranks = generate_n_keys_between(lower, upper, ids.len())?;
        debug!(index, count = ids.len(), "bulk insert into backlog");

        for (id, rank) in ids.iter().zip(&ranks) {
            self.ranks.insert(id.clone(), rank.clone());
        }
        let batch = ids.iter().cloned().zip(ranks).map(|(id, rank)| Entry { id, rank });
        self.entries.splice(index..index, batch);

        self.settle();
        return Ok(ids.iter().map(|id| self.ranks[id].clone()).collect());
    }

    /// Move an item so it ends up at `index`. Returns its rank.
    ///
    /// Only the moved item gets a new rank. Moving an item onto its own
    /// position keeps the old rank.
    pub fn move_to(&mut self, id: &I, index: usize) -> Result<String, BacklogError> {
        let from = self.position_of(id).ok_or(BacklogError::UnknownId)?;
        if index >= self.entries.len() {
            return Err(BacklogError::OutOfBounds { index, len: self.entries.len() });
        }
        if from == index {
            return Ok(self.entries[from].rank.clone());
        }

        let mut entry = self.entries.remove(from);
        let (lower, upper) = self.neighbours(index);
        let rank = match generate_key_between(lower, upper) {
            Ok(rank) => rank,
            Err(err) => {
                self.entries.insert(from, entry);
                return Err(err.into());
            }
        };
        entry.rank = rank.clone();
        self.ranks.insert(id.clone(), rank);
        self.entries.insert(index, entry);

        self.settle();
        return Ok(self.ranks[id].clone());
    }

    /// Remove an item, returning the rank it had.
    pub fn remove(&mut self, id: &I) -> Option<String> {
        let index = self.position_of(id)?;
        self.ranks.remove(id);
        self.rewritten.remove(id);
        return Some(self.entries.remove(index).rank);
    }

    /// Length of the longest rank.
    pub fn max_key_len(&self) -> usize {
        return max_rank_len(&self.entries);
    }

    /// True once some rank is longer than the configured threshold.
    pub fn needs_rebalance(&self) -> bool {
        return self.max_key_len() > self.config.rebalance_threshold;
    }

    /// Give every item a fresh, evenly spaced rank, keeping the order.
    ///
    /// Returns how many ranks changed. The changed items are also queued for
    /// `drain_rewritten`.
    pub fn rebalance(&mut self) -> usize {
        debug!(len = self.entries.len(), max_key_len = self.max_key_len(), "rebalancing backlog");
        let fresh = rebalance_ranks(&self.entries);
        let mut changed = 0;
        for (entry, rank) in self.entries.iter_mut().zip(fresh) {
            if entry.rank != rank {
                self.ranks.insert(entry.id.clone(), rank.clone());
                self.rewritten.insert(entry.id.clone());
                entry.rank = rank;
                changed += 1;
            }
        }
        return changed;
    }

    /// True if a rebalance rewrote ranks that have not been drained yet.
    pub fn has_rewritten(&self) -> bool {
        return !self.rewritten.is_empty();
    }

    /// Take the items whose ranks were rewritten by a rebalance since the
    /// last call, in rank order, with their current ranks.
    ///
    /// With `auto_rebalance` on, `insert_at`, `extend_at` and `move_to` may
    /// rewrite other rows besides the ones they return. A store mirroring the
    /// backlog writes these back too. Removed items are dropped from the set.
    pub fn drain_rewritten(&mut self) -> Vec<Entry<I>> {
        if self.rewritten.is_empty() {
            return Vec::new();
        }
        let rewritten = std::mem::take(&mut self.rewritten);
        return self.entries.iter().filter(|e| rewritten.contains(&e.id)).cloned().collect();
    }

    fn settle(&mut self) {
        if self.config.auto_rebalance && self.needs_rebalance() {
            let changed = self.rebalance();
            debug!(changed, "auto rebalance rewrote ranks");
        }
    }
}
