//! Accumulate-then-freeze multimap keyed by item.
//!
//! The index is filled once (typically at startup from ore dictionary data),
//! frozen, and then only read. Mutation goes through `&mut self`, so a frozen
//! index shared behind an `Arc` cannot be modified at all; rebuilding means
//! `clear`, `put`..., `freeze` on an exclusively owned index and swapping it in.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::env::AliasOracle;
use crate::error::IndexError;
use crate::key::{ItemKey, Tag};

#[derive(Debug)]
enum IndexState<T> {
    Building(FxHashMap<ItemKey, Vec<T>>),
    Frozen(FxHashMap<ItemKey, Box<[T]>>),
}

/// Many-to-many mapping from a representative key to an ordered value list.
#[derive(Debug)]
pub struct EquivalenceIndex<T> {
    state: IndexState<T>,
}

impl<T> EquivalenceIndex<T> {
    /// Creates an empty index in the build phase.
    pub fn new() -> Self {
        Self {
            state: IndexState::Building(FxHashMap::default()),
        }
    }

    /// Appends `value` to the list under `key`.
    pub fn put(&mut self, key: ItemKey, value: T) -> Result<(), IndexError> {
        match &mut self.state {
            IndexState::Building(builder) => {
                builder.entry(key).or_default().push(value);
                Ok(())
            }
            IndexState::Frozen(_) => Err(IndexError::Frozen),
        }
    }

    /// Appends `value` under every equivalent of `key`.
    ///
    /// Keys without equivalents are indexed under themselves.
    pub fn put_aliased(
        &mut self,
        key: &ItemKey,
        value: T,
        aliases: &dyn AliasOracle,
    ) -> Result<(), IndexError>
    where
        T: Clone,
    {
        match aliases.equivalents(key) {
            Some(equivalents) if !equivalents.is_empty() => {
                for real_key in equivalents {
                    self.put(*real_key, value.clone())?;
                }
                Ok(())
            }
            _ => self.put(*key, value),
        }
    }

    /// Finalizes the builder into the immutable lookup structure.
    pub fn freeze(&mut self) -> Result<(), IndexError> {
        let builder = match &mut self.state {
            IndexState::Building(builder) => std::mem::take(builder),
            IndexState::Frozen(_) => return Err(IndexError::Frozen),
        };

        let frozen = builder
            .into_iter()
            .map(|(key, values)| (key, values.into_boxed_slice()))
            .collect();
        self.state = IndexState::Frozen(frozen);
        Ok(())
    }

    /// Values associated with `key`, in insertion order; empty if none.
    pub fn get(&self, key: &ItemKey) -> Result<&[T], IndexError> {
        match &self.state {
            IndexState::Frozen(map) => Ok(map.get(key).map(|v| &**v).unwrap_or(&[])),
            IndexState::Building(_) => Err(IndexError::NotFrozen),
        }
    }

    /// Drops all entries and reopens the build phase.
    pub fn clear(&mut self) {
        self.state = IndexState::Building(FxHashMap::default());
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, IndexState::Frozen(_))
    }

    /// Number of distinct keys, in either phase.
    pub fn len(&self) -> usize {
        match &self.state {
            IndexState::Building(builder) => builder.len(),
            IndexState::Frozen(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for EquivalenceIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen index of keys doubles as an alias table.
///
/// Lookup tries the exact key, then the key without its tag, then the same
/// item with a wildcard variant, then the wildcard without a tag.
impl AliasOracle for EquivalenceIndex<ItemKey> {
    fn equivalents(&self, key: &ItemKey) -> Option<&[ItemKey]> {
        let IndexState::Frozen(map) = &self.state else {
            warn!(
                target: "stockpile::ore",
                key = %key,
                "alias lookup on an unfrozen index, treating key as unaliased"
            );
            return None;
        };

        let wildcard = key.to_wildcard();
        [
            *key,
            key.with_tag(Tag::Untagged),
            wildcard,
            wildcard.with_tag(Tag::Untagged),
        ]
            .iter()
            .find_map(|candidate| map.get(candidate))
            .map(|values| &**values)
            .filter(|values| !values.is_empty())
    }
}
