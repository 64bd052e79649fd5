//! Oracle implementations consulted by the ledger.
//!
//! [`OracleManager`] bundles the item and alias oracles an [`ItemList`]
//! needs for fuzzy searches. The data is immutable while the list uses it;
//! to change aliases, build a new index and construct a new manager.
//!
//! [`ItemList`]: crate::ItemList
mod items;
mod ore;

use std::sync::Arc;

use stockpile_core::{AliasOracle, ItemOracle, NoAliases, NoDefinitions};

pub use items::ItemOracleImpl;
pub use ore::OreDictionary;

/// Manages the oracles a ledger reads from.
#[derive(Clone)]
pub struct OracleManager {
    items: Arc<dyn ItemOracle>,
    aliases: Arc<dyn AliasOracle>,
}

impl OracleManager {
    pub fn new(items: Arc<dyn ItemOracle>, aliases: Arc<dyn AliasOracle>) -> Self {
        Self { items, aliases }
    }

    /// Replaces the item oracle.
    #[must_use]
    pub fn with_items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.items = items;
        self
    }

    /// Replaces the alias oracle.
    #[must_use]
    pub fn with_aliases(mut self, aliases: Arc<dyn AliasOracle>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn items(&self) -> &dyn ItemOracle {
        self.items.as_ref()
    }

    pub fn aliases(&self) -> &dyn AliasOracle {
        self.aliases.as_ref()
    }
}

impl Default for OracleManager {
    /// No definitions and no aliases: every variant is matched exactly and
    /// no key is expanded.
    fn default() -> Self {
        Self::new(Arc::new(NoDefinitions), Arc::new(NoAliases))
    }
}
