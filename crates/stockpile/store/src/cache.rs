//! Memoized fuzzy search results.
//!
//! Entries are keyed by a fingerprint of the filter key and fuzzy mode.
//! Result lists hold the same `Arc<ItemRecord>` handles as the ledger, so a
//! cached list stays accurate across merges into existing records and only
//! goes stale when key membership changes. The ledger clears the cache on
//! every insert and on `clear`.
//!
//! The cache itself is not synchronized; [`ItemList`](crate::ItemList) keeps
//! it behind a mutex.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHasher};
use stockpile_core::{FuzzyMode, ItemKey};
use tracing::trace;

use crate::record::ItemRecord;

/// Shared, immutable result list of a fuzzy search.
pub type FuzzyMatches = Arc<[Arc<ItemRecord>]>;

pub struct FuzzySearchCache {
    enabled: bool,
    entries: FxHashMap<u64, FuzzyMatches>,
    empty: FuzzyMatches,
    generation: u64,
}

impl FuzzySearchCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: FxHashMap::default(),
            empty: Arc::from(Vec::<Arc<ItemRecord>>::new()),
            generation: 0,
        }
    }

    /// Fingerprint of a search: the key identity combined with the mode.
    pub fn fingerprint(key: &ItemKey, mode: FuzzyMode) -> u64 {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        mode.hash(&mut hasher);
        hasher.finish()
    }

    /// Cached result for `fingerprint`; always `None` when caching is off.
    pub fn get(&self, fingerprint: u64) -> Option<FuzzyMatches> {
        if !self.enabled {
            return None;
        }
        self.entries.get(&fingerprint).cloned()
    }

    /// Stores `results` for the filter and returns the shared list.
    ///
    /// An empty result maps the filter to the shared empty list and nothing
    /// else. A non-empty result is copied once and recorded under the filter
    /// and under every member's own fingerprint, unless that member already
    /// has an entry of its own.
    pub fn put(
        &mut self,
        filter_fingerprint: u64,
        mode: FuzzyMode,
        results: Vec<Arc<ItemRecord>>,
    ) -> FuzzyMatches {
        if results.is_empty() {
            if self.enabled {
                self.entries.insert(filter_fingerprint, Arc::clone(&self.empty));
            }
            return Arc::clone(&self.empty);
        }

        let snapshot: FuzzyMatches = Arc::from(results);
        if !self.enabled {
            return snapshot;
        }

        for record in snapshot.iter() {
            self.entries
                .entry(Self::fingerprint(record.key(), mode))
                .or_insert_with(|| Arc::clone(&snapshot));
        }
        self.entries.insert(filter_fingerprint, Arc::clone(&snapshot));

        trace!(
            target: "stockpile::cache",
            filter = filter_fingerprint,
            members = snapshot.len(),
            entries = self.entries.len(),
            "cached fuzzy result"
        );
        snapshot
    }

    /// Drops every entry.
    ///
    /// Also advances the generation so a search that started before the
    /// clear can tell its result is outdated.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of fingerprints currently mapped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
