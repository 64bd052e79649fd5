//! Fuzzy range search over the ledger.

use std::ops::Bound;
use std::sync::Arc;

use stockpile_core::{FuzzyBounds, FuzzyMode, ItemKey};
use tracing::trace;

use super::ItemList;
use crate::cache::{FuzzyMatches, FuzzySearchCache};
use crate::record::ItemRecord;

impl ItemList {
    /// Records matching `filter` under `mode`, most specific first.
    ///
    /// Each range scan is returned in descending key order. If the alias
    /// oracle expands `filter` into equivalents, every equivalent is scanned
    /// and the results are concatenated in equivalent order. A filter with a
    /// wildcard variant (or a wildcard equivalent) matches every variant.
    ///
    /// With caching enabled the result is memoized until the next insert or
    /// [`clear`](Self::clear).
    pub fn find_fuzzy(&self, filter: &ItemKey, mode: FuzzyMode) -> FuzzyMatches {
        let fingerprint = FuzzySearchCache::fingerprint(filter, mode);
        let generation = {
            let cache = self.cache.lock();
            if let Some(hit) = cache.get(fingerprint) {
                trace!(target: "stockpile::cache", filter = %filter, %mode, "fuzzy cache hit");
                return hit;
            }
            cache.generation()
        };

        let results = self.collect_fuzzy(filter, mode);

        let mut cache = self.cache.lock();
        if cache.generation() == generation {
            cache.put(fingerprint, mode, results)
        } else {
            // An insert landed while scanning; the result may already be stale.
            Arc::from(results)
        }
    }

    fn collect_fuzzy(&self, filter: &ItemKey, mode: FuzzyMode) -> Vec<Arc<ItemRecord>> {
        match self.oracles.aliases().equivalents(filter) {
            Some([single]) => self.fuzzy_range(single, mode),
            Some(equivalents) if !equivalents.is_empty() => equivalents
                .iter()
                .flat_map(|equivalent| self.fuzzy_range(equivalent, mode))
                .collect(),
            _ => self.fuzzy_range(filter, mode),
        }
    }

    /// One descending scan over the inclusive bounds of `filter`.
    fn fuzzy_range(&self, filter: &ItemKey, mode: FuzzyMode) -> Vec<Arc<ItemRecord>> {
        let definition = self.oracles.items().definition(filter.item);
        let bounds = FuzzyBounds::for_filter(filter, mode, definition.as_ref());
        self.range_desc((Bound::Included(bounds.low), Bound::Included(bounds.high)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock, Weak};

    use stockpile_core::{
        EquivalenceIndex, ItemDefinition, ItemId, ItemOracle, ItemStack, StoreConfig, Tag,
    };

    use super::*;
    use crate::oracle::{ItemOracleImpl, OracleManager};

    fn keys(matches: &FuzzyMatches) -> Vec<ItemKey> {
        matches.iter().map(|record| *record.key()).collect()
    }

    fn cached_list(oracles: OracleManager) -> ItemList {
        ItemList::with_oracles(&StoreConfig::with_cache(true), oracles)
    }

    #[test]
    fn wildcard_filter_returns_every_variant_descending() {
        let list = cached_list(OracleManager::default());
        for damage in [0, 3, 1] {
            list.add(&ItemStack::new(ItemKey::plain(7, damage), 1));
        }
        list.add(&ItemStack::new(ItemKey::plain(8, 0), 1));

        let matches = list.find_fuzzy(&ItemKey::wildcard(7), FuzzyMode::IgnoreAll);
        assert_eq!(
            keys(&matches),
            vec![ItemKey::plain(7, 3), ItemKey::plain(7, 1), ItemKey::plain(7, 0)]
        );
    }

    #[test]
    fn exact_variant_matches_every_tag() {
        let list = cached_list(OracleManager::default());
        list.add(&ItemStack::new(ItemKey::plain(4, 1), 1));
        list.add(&ItemStack::new(ItemKey::plain(4, 1).with_tag(Tag::Hashed(5)), 1));
        list.add(&ItemStack::new(ItemKey::plain(4, 2), 1));

        let matches = list.find_fuzzy(&ItemKey::plain(4, 1), FuzzyMode::Percent50);
        assert_eq!(
            keys(&matches),
            vec![ItemKey::plain(4, 1).with_tag(Tag::Hashed(5)), ItemKey::plain(4, 1)]
        );
    }

    #[test]
    fn damageable_items_bucket_by_wear() {
        let items: ItemOracleImpl = [ItemDefinition::damageable(ItemId(9), 100)]
            .into_iter()
            .collect();
        let list = cached_list(OracleManager::default().with_items(Arc::new(items)));
        for damage in [0, 20, 49, 50, 90] {
            list.add(&ItemStack::new(ItemKey::plain(9, damage), 1));
        }

        let light = list.find_fuzzy(&ItemKey::plain(9, 10), FuzzyMode::Percent50);
        assert_eq!(
            keys(&light),
            vec![ItemKey::plain(9, 49), ItemKey::plain(9, 20), ItemKey::plain(9, 0)]
        );

        let worn = list.find_fuzzy(&ItemKey::plain(9, 10), FuzzyMode::Percent99);
        assert_eq!(worn.len(), 4);

        let pristine = list.find_fuzzy(&ItemKey::plain(9, 0), FuzzyMode::Percent99);
        assert_eq!(keys(&pristine), vec![ItemKey::plain(9, 0)]);
    }

    #[test]
    fn single_equivalent_replaces_the_filter() {
        let mut aliases = EquivalenceIndex::new();
        aliases.put(ItemKey::plain(1, 0), ItemKey::wildcard(2)).unwrap();
        aliases.freeze().unwrap();
        let list = cached_list(OracleManager::default().with_aliases(Arc::new(aliases)));

        list.add(&ItemStack::new(ItemKey::plain(1, 0), 1));
        list.add(&ItemStack::new(ItemKey::plain(2, 4), 1));
        list.add(&ItemStack::new(ItemKey::plain(2, 6), 1));

        let matches = list.find_fuzzy(&ItemKey::plain(1, 0), FuzzyMode::IgnoreAll);
        assert_eq!(keys(&matches), vec![ItemKey::plain(2, 6), ItemKey::plain(2, 4)]);
    }

    #[test]
    fn empty_results_are_cached_as_the_shared_sentinel() {
        let list = cached_list(OracleManager::default());
        let first = list.find_fuzzy(&ItemKey::plain(1, 0), FuzzyMode::IgnoreAll);
        let second = list.find_fuzzy(&ItemKey::plain(2, 0), FuzzyMode::IgnoreAll);

        assert!(first.is_empty());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cached_results_see_merges() {
        let list = cached_list(OracleManager::default());
        list.add(&ItemStack::new(ItemKey::plain(1, 0), 1));

        let before = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);
        list.add(&ItemStack::new(ItemKey::plain(1, 0), 4));
        let after = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);

        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after[0].stack_size(), 5);
    }

    #[test]
    fn inserts_invalidate_cached_results() {
        let list = cached_list(OracleManager::default());
        list.add(&ItemStack::new(ItemKey::plain(1, 0), 1));
        let before = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);

        list.add_crafting(&ItemStack::new(ItemKey::plain(1, 1), 0));
        let after = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    /// Item oracle that stores a new key into its list the first time it is
    /// consulted, i.e. in the middle of a fuzzy scan.
    #[derive(Default)]
    struct InsertOnFirstLookup {
        list: OnceLock<Weak<ItemList>>,
        fired: AtomicBool,
    }

    impl ItemOracle for InsertOnFirstLookup {
        fn definition(&self, item: ItemId) -> Option<ItemDefinition> {
            if self.fired.swap(true, Ordering::SeqCst) {
                return None;
            }
            if let Some(list) = self.list.get().and_then(Weak::upgrade) {
                list.add(&ItemStack::new(ItemKey::plain(item.0, 1), 1));
            }
            None
        }

        fn all_definitions(&self) -> Vec<ItemDefinition> {
            Vec::new()
        }
    }

    #[test]
    fn results_computed_across_an_insert_are_not_cached() {
        let oracle = Arc::new(InsertOnFirstLookup::default());
        let list = Arc::new(cached_list(OracleManager::default().with_items(oracle.clone())));
        assert!(oracle.list.set(Arc::downgrade(&list)).is_ok());
        list.add(&ItemStack::new(ItemKey::plain(1, 0), 1));

        let stale = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);
        let fresh = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);
        let cached = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);

        assert_eq!(stale.len(), 2);
        assert_eq!(fresh.len(), 2);
        assert!(!Arc::ptr_eq(&stale, &fresh));
        assert!(Arc::ptr_eq(&fresh, &cached));
    }

    #[test]
    fn uncached_list_recomputes_every_time() {
        let list = ItemList::default();
        list.add(&ItemStack::new(ItemKey::plain(1, 0), 1));

        let first = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);
        let second = list.find_fuzzy(&ItemKey::wildcard(1), FuzzyMode::IgnoreAll);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(keys(&first), keys(&second));
    }
}
