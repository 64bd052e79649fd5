use crate::key::ItemKey;

/// Resolves a key to the set of keys it is interchangeable with.
///
/// This is the "ore dictionary" seam: a plank of any wood, an ingot from any
/// mod. `None` (or an empty slice) means the key has no aliases and fuzzy
/// searches take the plain range path. Returned keys may carry a wildcard
/// variant, in which case every variant of that item matches.
pub trait AliasOracle: Send + Sync {
    fn equivalents(&self, key: &ItemKey) -> Option<&[ItemKey]>;
}

/// Oracle without any alias groups.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAliases;

impl AliasOracle for NoAliases {
    fn equivalents(&self, _key: &ItemKey) -> Option<&[ItemKey]> {
        None
    }
}
