//! Fuzzy matching modes and range bound construction.
//!
//! A fuzzy search is an inclusive range scan over the ordered key space. The
//! bounds keep the filter's item id, widen the variant according to the mode
//! and replace the tag with the `Low`/`High` sentinels so every tag matches.

use crate::env::ItemDefinition;
use crate::key::{ItemKey, Tag, Variant};

/// How much of the damage space counts as "the same item".
///
/// Percentage modes split a damageable item's durability at a breakpoint and
/// match only the side of the breakpoint the filter is on. Items without
/// durability ignore the mode and match their variant exactly.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FuzzyMode {
    /// Any wear level matches.
    #[default]
    IgnoreAll,
    /// Pristine matches pristine only; anything worn matches anything worn.
    #[strum(to_string = "percent_99")]
    Percent99,
    /// Breakpoint at 25% of max damage.
    #[strum(to_string = "percent_75")]
    Percent75,
    /// Breakpoint at 50% of max damage.
    #[strum(to_string = "percent_50")]
    Percent50,
    /// Breakpoint at 75% of max damage.
    #[strum(to_string = "percent_25")]
    Percent25,
}

impl FuzzyMode {
    /// Share of max damage at which the bucket splits, `None` for `IgnoreAll`.
    pub const fn percentage(self) -> Option<u32> {
        match self {
            Self::IgnoreAll => None,
            Self::Percent99 => Some(0),
            Self::Percent75 => Some(25),
            Self::Percent50 => Some(50),
            Self::Percent25 => Some(75),
        }
    }

    /// Damage value splitting the durability range for this mode.
    pub fn breakpoint(self, max_damage: u16) -> Option<u16> {
        let percentage = self.percentage()?;
        // percentage <= 100, so the quotient never exceeds max_damage
        Some((percentage * u32::from(max_damage) / 100) as u16)
    }
}

/// Inclusive low/high keys for one fuzzy range scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuzzyBounds {
    pub low: ItemKey,
    pub high: ItemKey,
}

impl FuzzyBounds {
    /// Builds the bounds for `filter` under `mode`.
    ///
    /// A wildcard variant on the filter ignores the variant dimension
    /// entirely. Otherwise the definition decides whether the variant is wear
    /// (bucketed by `mode`) or a sub-type (matched exactly).
    pub fn for_filter(
        filter: &ItemKey,
        mode: FuzzyMode,
        definition: Option<&ItemDefinition>,
    ) -> Self {
        let (low, high) = match (filter.variant, definition.and_then(|d| d.max_damage)) {
            (Variant::Wildcard, _) => (Variant::MIN, Variant::MAX),
            (Variant::Damage(damage), Some(max_damage)) => {
                let (low, high) = damage_window(mode, damage, max_damage);
                (Variant::Damage(low), Variant::Damage(high))
            }
            (exact, None) => (exact, exact),
        };

        Self {
            low: filter.with_variant(low).with_tag(Tag::Low),
            high: filter.with_variant(high).with_tag(Tag::High),
        }
    }

    /// True if `key` falls inside the inclusive bounds.
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.low <= *key && *key <= self.high
    }
}

fn damage_window(mode: FuzzyMode, damage: u16, max_damage: u16) -> (u16, u16) {
    let past_max = max_damage.saturating_add(1);
    match mode {
        FuzzyMode::IgnoreAll => (0, past_max),
        FuzzyMode::Percent99 if damage == 0 => (0, 0),
        FuzzyMode::Percent99 => (1, past_max),
        _ => {
            let breakpoint = mode.breakpoint(max_damage).unwrap_or(0);
            let low = if breakpoint <= damage { breakpoint } else { 0 };
            let high = if damage < breakpoint {
                breakpoint - 1
            } else {
                past_max
            };
            (low, high)
        }
    }
}
