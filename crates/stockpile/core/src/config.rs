/// Ledger configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreConfig {
    /// Memoize fuzzy search results until the next membership change.
    /// Worth enabling for lists that are queried far more often than filled.
    pub use_cache: bool,
}

impl StoreConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_USE_CACHE: bool = false;

    pub fn new() -> Self {
        Self {
            use_cache: Self::DEFAULT_USE_CACHE,
        }
    }

    pub fn with_cache(use_cache: bool) -> Self {
        Self { use_cache }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
