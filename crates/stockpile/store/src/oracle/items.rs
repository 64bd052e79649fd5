//! Minimal [`stockpile_core::ItemOracle`] backed by an in-memory map.
use rustc_hash::FxHashMap;
use stockpile_core::{ItemDefinition, ItemId, ItemOracle};

/// ItemOracle implementation with static item definitions
#[derive(Debug, Default)]
pub struct ItemOracleImpl {
    definitions: FxHashMap<ItemId, ItemDefinition>,
}

impl ItemOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item definition, replacing any previous one for the same item
    pub fn add_definition(&mut self, def: ItemDefinition) {
        self.definitions.insert(def.item, def);
    }
}

impl FromIterator<ItemDefinition> for ItemOracleImpl {
    fn from_iter<I: IntoIterator<Item = ItemDefinition>>(iter: I) -> Self {
        let mut oracle = Self::new();
        for def in iter {
            oracle.add_definition(def);
        }
        oracle
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition> {
        self.definitions.get(&item).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        let mut defs: Vec<_> = self.definitions.values().cloned().collect();
        defs.sort_unstable_by_key(|def| def.item);
        defs
    }
}
