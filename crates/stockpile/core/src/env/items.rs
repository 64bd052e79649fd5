use crate::key::ItemId;

/// Read-only source of item definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Static properties of an item type that fuzzy matching depends on.
///
/// # Durability
///
/// Damageable items (tools, armor) carry `max_damage`. Their variant value is
/// wear, and percentage fuzzy modes bucket it relative to `max_damage`. Items
/// without durability use the variant as a plain sub-type and always match it
/// exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub item: ItemId,
    pub max_damage: Option<u16>,
}

impl ItemDefinition {
    /// Definition of an item whose variant is a plain sub-type.
    pub fn simple(item: ItemId) -> Self {
        Self {
            item,
            max_damage: None,
        }
    }

    /// Definition of an item that wears down up to `max_damage`.
    pub fn damageable(item: ItemId, max_damage: u16) -> Self {
        Self {
            item,
            max_damage: Some(max_damage),
        }
    }
}

/// Oracle that knows no definitions; every item is treated as non-damageable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDefinitions;

impl ItemOracle for NoDefinitions {
    fn definition(&self, _item: ItemId) -> Option<ItemDefinition> {
        None
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        Vec::new()
    }
}
