//! Concurrent ordered ledger of item records.

mod fuzzy;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use stockpile_core::{ItemKey, ItemStack, StoreConfig};
use tracing::debug;

use crate::cache::FuzzySearchCache;
use crate::oracle::OracleManager;
use crate::record::ItemRecord;

/// Ordered collection of item records with exact and fuzzy lookup.
///
/// The list keeps one [`ItemRecord`] per distinct [`ItemKey`], ordered by the
/// key's total order. Producers (inventory scanners) and consumers (queries)
/// may use one list from many threads at once:
///
/// - Merges into an existing key take the read lock and update atomics.
/// - Inserting a new key takes the write lock and invalidates the fuzzy
///   search cache.
/// - Iteration works on a snapshot taken under the read lock; records added
///   afterwards are not observed, merges into snapshotted records are.
///
/// Keys that only make sense as queries (wildcard variant, range-bound tag)
/// are never stored. Passing one to a mutation is a logged no-op.
pub struct ItemList {
    records: RwLock<BTreeMap<ItemKey, Arc<ItemRecord>>>,
    cache: Mutex<FuzzySearchCache>,
    oracles: OracleManager,
}

impl ItemList {
    /// Creates an empty list without definitions or aliases.
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_oracles(config, OracleManager::default())
    }

    /// Creates an empty list that consults `oracles` during fuzzy searches.
    pub fn with_oracles(config: &StoreConfig, oracles: OracleManager) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            cache: Mutex::new(FuzzySearchCache::new(config.use_cache)),
            oracles,
        }
    }

    /// Merges `stack` into the list.
    ///
    /// An existing record accumulates stack size and requestable count and
    /// becomes craftable if `stack` is. Otherwise a copy of `stack` is stored.
    pub fn add(&self, stack: &ItemStack) {
        self.upsert(
            stack,
            |record| record.merge(stack),
            || ItemRecord::from_stack(stack),
        );
    }

    /// Accounts storage contents: only the stack size of an existing record
    /// changes.
    pub fn add_storage(&self, stack: &ItemStack) {
        self.upsert(
            stack,
            |record| record.inc_stack_size(stack.stack_size),
            || ItemRecord::from_stack(stack),
        );
    }

    /// Marks the key as craftable without touching held quantities.
    pub fn add_crafting(&self, stack: &ItemStack) {
        self.upsert(
            stack,
            |record| record.set_craftable(),
            || {
                let mut copy = *stack;
                copy.stack_size = 0;
                copy.craftable = true;
                ItemRecord::from_stack(&copy)
            },
        );
    }

    /// Accumulates the requestable count of the key.
    pub fn add_requestable(&self, stack: &ItemStack) {
        self.upsert(
            stack,
            |record| record.inc_requestable(stack.requestable),
            || {
                let copy = ItemStack::new(stack.key, 0).with_requestable(stack.requestable);
                ItemRecord::from_stack(&copy)
            },
        );
    }

    /// Exact lookup; no fuzzy matching. Meaningless records are returned too.
    pub fn find_precise(&self, key: &ItemKey) -> Option<Arc<ItemRecord>> {
        self.records.read().get(key).cloned()
    }

    /// First meaningful record in ascending key order.
    pub fn first_item(&self) -> Option<Arc<ItemRecord>> {
        self.records
            .read()
            .values()
            .find(|record| record.is_meaningful())
            .cloned()
    }

    /// Number of stored records, meaningful or not.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if no stored record is meaningful.
    ///
    /// A list can be non-empty by [`len`](Self::len) and still be empty here.
    pub fn is_empty(&self) -> bool {
        !self
            .records
            .read()
            .values()
            .any(|record| record.is_meaningful())
    }

    /// Meaningful records in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = Arc<ItemRecord>> + use<> {
        let snapshot: Vec<_> = self.records.read().values().cloned().collect();
        snapshot.into_iter().filter(|record| record.is_meaningful())
    }

    /// Owned copies of every meaningful record.
    pub fn snapshot(&self) -> Vec<ItemStack> {
        self.iter().map(|record| record.to_stack()).collect()
    }

    /// Records inside `range`, ascending. Meaningless records are included.
    pub fn range<R: RangeBounds<ItemKey>>(&self, range: R) -> Vec<Arc<ItemRecord>> {
        let (low, high) = owned_bounds(&range);
        if !is_valid_range(&low, &high) {
            return Vec::new();
        }
        self.records
            .read()
            .range((low, high))
            .map(|(_, record)| Arc::clone(record))
            .collect()
    }

    /// Records inside `range`, descending. Meaningless records are included.
    pub fn range_desc<R: RangeBounds<ItemKey>>(&self, range: R) -> Vec<Arc<ItemRecord>> {
        let (low, high) = owned_bounds(&range);
        if !is_valid_range(&low, &high) {
            return Vec::new();
        }
        self.records
            .read()
            .range((low, high))
            .rev()
            .map(|(_, record)| Arc::clone(record))
            .collect()
    }

    /// Returns every meaningful record to its baseline state.
    ///
    /// Records stay in the list, so cached fuzzy results remain valid.
    pub fn reset_status(&self) {
        let records = self.records.read();
        let mut reset = 0usize;
        for record in records.values().filter(|record| record.is_meaningful()) {
            record.reset();
            reset += 1;
        }
        debug!(target: "stockpile::list", reset, "reset record status");
    }

    /// Removes every record and every cached search result.
    pub fn clear(&self) {
        let removed = {
            let mut records = self.records.write();
            let removed = records.len();
            records.clear();
            self.mark_dirty();
            removed
        };
        debug!(target: "stockpile::list", removed, "cleared item list");
    }

    /// Merges into the record for `stack.key`, or inserts the one `create`
    /// builds. All inserts go through here.
    fn upsert(
        &self,
        stack: &ItemStack,
        merge: impl FnOnce(&ItemRecord),
        create: impl FnOnce() -> ItemRecord,
    ) {
        if stack.key.is_query_only() {
            debug!(
                target: "stockpile::list",
                key = %stack.key,
                "ignoring mutation with a query-only key"
            );
            return;
        }

        let existing = self.records.read().get(&stack.key).cloned();
        if let Some(record) = existing {
            merge(record.as_ref());
            return;
        }

        {
            let mut records = self.records.write();
            match records.entry(stack.key) {
                // Another writer inserted the key between the two locks.
                Entry::Occupied(entry) => {
                    merge(entry.get().as_ref());
                    return;
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::new(create()));
                }
            }
            self.mark_dirty();
        }

        debug!(target: "stockpile::list", key = %stack.key, "inserted record");
    }

    /// Single invalidation point for anything that changes key membership.
    ///
    /// Callers hold the records write lock, so no reader sees the new
    /// membership alongside a cache entry computed for the old one. Locks
    /// are always taken records first, cache second.
    fn mark_dirty(&self) {
        self.cache.lock().clear();
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

fn owned_bounds<R: RangeBounds<ItemKey>>(range: &R) -> (Bound<ItemKey>, Bound<ItemKey>) {
    (range.start_bound().cloned(), range.end_bound().cloned())
}

/// `BTreeMap::range` panics on inverted ranges and on `(x, x)` with both
/// ends excluded; both describe empty ranges here.
fn is_valid_range(low: &Bound<ItemKey>, high: &Bound<ItemKey>) -> bool {
    match (low, high) {
        (Bound::Excluded(l), Bound::Excluded(h)) => l < h,
        (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) => {
            l <= h
        }
        _ => true,
    }
}
