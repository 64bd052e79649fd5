//! Item identities, fuzzy bounds and alias tables shared by the ledger.
//!
//! `stockpile-core` defines the canonical data model (keys and their order,
//! stacks, fuzzy modes) and the oracle traits through which the ledger reads
//! external item data. It holds no locks; the concurrent ledger itself lives
//! in `stockpile-store`.
pub mod config;
pub mod env;
pub mod equivalence;
pub mod error;
pub mod fuzzy;
pub mod key;
pub mod stack;

pub use config::StoreConfig;
pub use env::{AliasOracle, ItemDefinition, ItemOracle, NoAliases, NoDefinitions};
pub use equivalence::EquivalenceIndex;
pub use error::{ErrorSeverity, IndexError, StockError};
pub use fuzzy::{FuzzyBounds, FuzzyMode};
pub use key::{ItemId, ItemKey, Tag, Variant};
pub use stack::ItemStack;
