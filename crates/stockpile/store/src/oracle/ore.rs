//! Named ore groups compiled into an alias table.
//!
//! An ore group ("plank_wood", "ingot_copper") lists interchangeable items.
//! A key's equivalents are the members of every group it belongs to, in group
//! name order and then registration order, without duplicates.

use std::collections::BTreeMap;

use stockpile_core::{EquivalenceIndex, ItemKey};
use tracing::debug;

use crate::error::{OreError, Result};

#[derive(Debug, Default)]
pub struct OreDictionary {
    groups: BTreeMap<String, Vec<ItemKey>>,
}

impl OreDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` to the group `name`. Registering a key twice is a no-op.
    ///
    /// A wildcard variant registers every variant of the item.
    pub fn register(&mut self, name: impl Into<String>, key: ItemKey) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(OreError::EmptyName);
        }
        if key.tag.is_bound() {
            return Err(OreError::BoundTag(key));
        }

        let members = self.groups.entry(name).or_default();
        if !members.contains(&key) {
            members.push(key);
        }
        Ok(())
    }

    /// Members of `name`, empty for unknown groups.
    pub fn members(&self, name: &str) -> &[ItemKey] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of every group containing `key`.
    pub fn names_of<'a>(&'a self, key: &'a ItemKey) -> impl Iterator<Item = &'a str> + 'a {
        self.groups
            .iter()
            .filter(move |(_, members)| members.contains(key))
            .map(|(name, _)| name.as_str())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Compiles the groups into a frozen alias index.
    pub fn build_aliases(&self) -> Result<EquivalenceIndex<ItemKey>> {
        let mut equivalents: BTreeMap<ItemKey, Vec<ItemKey>> = BTreeMap::new();
        for members in self.groups.values() {
            for key in members {
                let list = equivalents.entry(*key).or_default();
                for member in members {
                    if !list.contains(member) {
                        list.push(*member);
                    }
                }
            }
        }

        let mut index = EquivalenceIndex::new();
        for (key, list) in equivalents {
            for member in list {
                index.put(key, member)?;
            }
        }
        index.freeze()?;

        debug!(
            target: "stockpile::ore",
            groups = self.groups.len(),
            keys = index.len(),
            "built alias index"
        );
        Ok(index)
    }
}
