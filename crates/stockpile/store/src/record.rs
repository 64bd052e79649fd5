//! Live aggregate state stored per distinct key.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use stockpile_core::{ItemKey, ItemStack};

/// One stored entry of an [`ItemList`](crate::ItemList).
///
/// Records are shared as `Arc<ItemRecord>`: lookups, fuzzy results and cached
/// result lists all point at the same record, so merges into an existing key
/// are visible everywhere without invalidating anything. Counters are atomics
/// so merges only need the list's read lock.
///
/// The stack size never drops below zero.
#[derive(Debug)]
pub struct ItemRecord {
    key: ItemKey,
    stack_size: AtomicI64,
    craftable: AtomicBool,
    requestable: AtomicI64,
}

impl ItemRecord {
    /// Deep copy of `stack` as a new record.
    pub(crate) fn from_stack(stack: &ItemStack) -> Self {
        Self {
            key: stack.key,
            stack_size: AtomicI64::new(stack.stack_size.max(0)),
            craftable: AtomicBool::new(stack.craftable),
            requestable: AtomicI64::new(stack.requestable),
        }
    }

    #[inline]
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    #[inline]
    pub fn stack_size(&self) -> i64 {
        self.stack_size.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_craftable(&self) -> bool {
        self.craftable.load(Ordering::Acquire)
    }

    #[inline]
    pub fn requestable(&self) -> i64 {
        self.requestable.load(Ordering::Acquire)
    }

    /// True if the record carries any non-default state.
    pub fn is_meaningful(&self) -> bool {
        self.stack_size() != 0 || self.is_craftable() || self.requestable() > 0
    }

    /// Owned copy of the current state.
    pub fn to_stack(&self) -> ItemStack {
        ItemStack {
            key: self.key,
            stack_size: self.stack_size(),
            craftable: self.is_craftable(),
            requestable: self.requestable(),
        }
    }

    /// Full merge: stack size and requestable accumulate, craftable is or-ed.
    pub(crate) fn merge(&self, other: &ItemStack) {
        self.inc_stack_size(other.stack_size);
        self.inc_requestable(other.requestable);
        if other.craftable {
            self.set_craftable();
        }
    }

    pub(crate) fn inc_stack_size(&self, delta: i64) {
        // fetch_update only fails when the closure returns None
        let _ = self
            .stack_size
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(delta).max(0))
            });
    }

    pub(crate) fn inc_requestable(&self, delta: i64) {
        let _ = self
            .requestable
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(delta))
            });
    }

    pub(crate) fn set_craftable(&self) {
        self.craftable.store(true, Ordering::Release);
    }

    /// Returns the record to its baseline: nothing held, nothing craftable or
    /// requestable.
    pub(crate) fn reset(&self) {
        self.stack_size.store(0, Ordering::Release);
        self.requestable.store(0, Ordering::Release);
        self.craftable.store(false, Ordering::Release);
    }
}
