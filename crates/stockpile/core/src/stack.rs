//! Item stack values passed into and out of the ledger.

use crate::key::ItemKey;

/// A quantity of one item type plus its crafting state.
///
/// Stacks are plain values. The ledger copies them into its own records on
/// insert and hands out owned stacks from snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub key: ItemKey,
    pub stack_size: i64,
    pub craftable: bool,
    pub requestable: i64,
}

impl ItemStack {
    pub fn new(key: ItemKey, stack_size: i64) -> Self {
        Self {
            key,
            stack_size,
            craftable: false,
            requestable: 0,
        }
    }

    #[must_use]
    pub fn with_craftable(mut self, craftable: bool) -> Self {
        self.craftable = craftable;
        self
    }

    #[must_use]
    pub fn with_requestable(mut self, requestable: i64) -> Self {
        self.requestable = requestable;
        self
    }

    /// True if the stack carries any non-default state.
    #[inline]
    pub fn is_meaningful(&self) -> bool {
        self.stack_size != 0 || self.craftable || self.requestable > 0
    }
}
