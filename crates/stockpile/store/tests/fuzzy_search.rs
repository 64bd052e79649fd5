use std::sync::Arc;

use stockpile_store::{
    FuzzyMode, ItemDefinition, ItemId, ItemKey, ItemList, ItemOracleImpl, ItemStack,
    OracleManager, OreDictionary, StoreConfig, Tag,
};
use strum::IntoEnumIterator;

const OAK: ItemKey = ItemKey::plain(5, 0);
const BIRCH: ItemKey = ItemKey::plain(5, 2);
const BAMBOO: ItemKey = ItemKey::plain(40, 0);
const PICKAXE: u32 = 257;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn oracles() -> OracleManager {
    let mut ores = OreDictionary::new();
    ores.register("plank_wood", OAK).unwrap();
    ores.register("plank_wood", BIRCH).unwrap();
    ores.register("plank_wood", BAMBOO).unwrap();
    let aliases = ores.build_aliases().unwrap();

    let items: ItemOracleImpl = [ItemDefinition::damageable(ItemId(PICKAXE), 250)]
        .into_iter()
        .collect();

    OracleManager::new(Arc::new(items), Arc::new(aliases))
}

fn stocked_list(use_cache: bool) -> ItemList {
    let list = ItemList::with_oracles(&StoreConfig::with_cache(use_cache), oracles());
    for key in [
        OAK,
        OAK.with_tag(Tag::Hashed(11)),
        BIRCH,
        ItemKey::plain(5, 1),
        BAMBOO,
        ItemKey::plain(PICKAXE, 0),
        ItemKey::plain(PICKAXE, 100),
        ItemKey::plain(PICKAXE, 200),
    ] {
        list.add(&ItemStack::new(key, 2));
    }
    list
}

fn keys(list: &[Arc<stockpile_store::ItemRecord>]) -> Vec<ItemKey> {
    list.iter().map(|record| *record.key()).collect()
}

#[test]
fn alias_expansion_concatenates_per_equivalent_scans() {
    init_tracing();
    let list = stocked_list(true);

    let matches = list.find_fuzzy(&OAK, FuzzyMode::IgnoreAll);

    // Equivalent order is OAK, BIRCH, BAMBOO; each scan descends on its own.
    assert_eq!(
        keys(&matches),
        vec![OAK.with_tag(Tag::Hashed(11)), OAK, BIRCH, BAMBOO]
    );

    let per_equivalent: usize = [OAK, BIRCH, BAMBOO]
        .iter()
        .map(|key| {
            let plain = ItemList::with_oracles(&StoreConfig::default(), OracleManager::default());
            for record in list.iter() {
                plain.add(&record.to_stack());
            }
            plain.find_fuzzy(key, FuzzyMode::IgnoreAll).len()
        })
        .sum();
    assert_eq!(matches.len(), per_equivalent);
}

#[test]
fn unaliased_scans_are_strictly_descending() {
    let list = stocked_list(false);
    for mode in FuzzyMode::iter() {
        for filter in [ItemKey::wildcard(5), ItemKey::plain(PICKAXE, 150), ItemKey::plain(5, 1)] {
            let matched = keys(&list.find_fuzzy(&filter, mode));
            assert!(!matched.is_empty(), "{filter} under {mode} matched nothing");
            assert!(
                matched.windows(2).all(|pair| pair[0] > pair[1]),
                "{filter} under {mode} not descending: {matched:?}"
            );
        }
    }
}

#[test]
fn percent_modes_respect_durability() {
    let list = stocked_list(true);
    let pickaxe = |damage| ItemKey::plain(PICKAXE, damage);

    // 250 max damage: the 50% breakpoint is 125.
    let heavy = list.find_fuzzy(&pickaxe(150), FuzzyMode::Percent50);
    assert_eq!(keys(&heavy), vec![pickaxe(200)]);

    let light = list.find_fuzzy(&pickaxe(30), FuzzyMode::Percent50);
    assert_eq!(keys(&light), vec![pickaxe(100), pickaxe(0)]);

    let any = list.find_fuzzy(&pickaxe(30), FuzzyMode::IgnoreAll);
    assert_eq!(any.len(), 3);
}

#[test]
fn clear_drops_cached_results() {
    let list = stocked_list(true);
    let before = list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::IgnoreAll);
    assert_eq!(before.len(), 4);

    list.clear();
    assert!(list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::IgnoreAll).is_empty());

    list.add(&ItemStack::new(BIRCH, 1));
    let after = list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::IgnoreAll);
    assert_eq!(keys(&after), vec![BIRCH]);
}

#[test]
fn repeated_queries_hit_the_cache() {
    let list = stocked_list(true);
    let first = list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::IgnoreAll);
    let second = list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::IgnoreAll);
    assert!(Arc::ptr_eq(&first, &second));

    // A member of the result is back-indexed to the same list.
    let member = list.find_fuzzy(&ItemKey::plain(5, 1), FuzzyMode::IgnoreAll);
    assert!(Arc::ptr_eq(&first, &member));

    // Different modes never share entries.
    let other_mode = list.find_fuzzy(&ItemKey::wildcard(5), FuzzyMode::Percent25);
    assert!(!Arc::ptr_eq(&first, &other_mode));
}

#[test]
fn tagged_member_expands_to_its_group() {
    let mut ores = OreDictionary::new();
    ores.register("plank_wood", OAK).unwrap();
    ores.register("plank_wood", BIRCH).unwrap();
    let oracles = OracleManager::default().with_aliases(Arc::new(ores.build_aliases().unwrap()));
    let list = ItemList::with_oracles(&StoreConfig::default(), oracles);

    let tagged_oak = OAK.with_tag(Tag::Hashed(11));
    list.add(&ItemStack::new(tagged_oak, 1));
    list.add(&ItemStack::new(BIRCH, 1));

    let expected = vec![tagged_oak, BIRCH];
    assert_eq!(keys(&list.find_fuzzy(&OAK, FuzzyMode::IgnoreAll)), expected);
    assert_eq!(keys(&list.find_fuzzy(&tagged_oak, FuzzyMode::IgnoreAll)), expected);
}
