//! Traits describing read-only item data.
//!
//! Oracles expose item definitions and alias groups. The ledger never owns
//! this data; it consults the oracles while building fuzzy search bounds.
mod aliases;
mod items;

pub use aliases::{AliasOracle, NoAliases};
pub use items::{ItemDefinition, ItemOracle, NoDefinitions};
