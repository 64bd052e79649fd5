//! Concurrent item ledger with exact and fuzzy lookup.
//!
//! This crate owns the runtime side of the ledger. Consumers create an
//! [`ItemList`], feed it stacks from inventory scans and crafting plans, and
//! query it by exact key or by fuzzy filter.
//!
//! Modules are organized by responsibility:
//! - [`list`] hosts the ordered ledger and its fuzzy range engine
//! - [`cache`] memoizes fuzzy search results between membership changes
//! - [`record`] holds the per-key aggregate state
//! - [`oracle`] provides item definitions and ore dictionary aliases
pub mod cache;
pub mod error;
pub mod list;
pub mod oracle;
pub mod record;

pub use cache::{FuzzyMatches, FuzzySearchCache};
pub use error::{OreError, Result};
pub use list::ItemList;
pub use oracle::{ItemOracleImpl, OracleManager, OreDictionary};
pub use record::ItemRecord;

pub use stockpile_core::{
    AliasOracle, EquivalenceIndex, FuzzyMode, ItemDefinition, ItemId, ItemKey, ItemOracle,
    ItemStack, StoreConfig, Tag, Variant,
};
