//! Composite item identity and its total order.
//!
//! An [`ItemKey`] is the ordering key of every stored record. Field order is
//! significant: the derived `Ord` compares item id, then variant, then tag, and
//! the range engine relies on that layout when it builds low/high bounds.

use core::fmt;
use core::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Identifier of an item type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Variant (damage / metadata) dimension of a key.
///
/// `Wildcard` only appears in query keys. It sorts before every concrete
/// damage value so bounds built around it stay monotonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Wildcard,
    Damage(u16),
}

impl Variant {
    /// Smallest concrete variant.
    pub const MIN: Self = Self::Damage(0);
    /// Largest concrete variant.
    pub const MAX: Self = Self::Damage(u16::MAX);

    #[inline]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Concrete damage value, `None` for the wildcard.
    #[inline]
    pub const fn damage(self) -> Option<u16> {
        match self {
            Self::Wildcard => None,
            Self::Damage(d) => Some(d),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::MIN
    }
}

/// Auxiliary-data fingerprint of a key.
///
/// `Low` and `High` are bound sentinels: they sort below and above every real
/// tag and never appear in stored records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Low,
    #[default]
    Untagged,
    Hashed(u64),
    High,
}

impl Tag {
    #[inline]
    pub const fn is_bound(self) -> bool {
        matches!(self, Self::Low | Self::High)
    }
}

/// Composite item identity: item id, variant and tag fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKey {
    pub item: ItemId,
    pub variant: Variant,
    pub tag: Tag,
}

impl ItemKey {
    pub const fn new(item: ItemId, variant: Variant, tag: Tag) -> Self {
        Self { item, variant, tag }
    }

    /// Untagged key for a concrete damage value.
    pub const fn plain(item: u32, damage: u16) -> Self {
        Self::new(ItemId(item), Variant::Damage(damage), Tag::Untagged)
    }

    /// Query key matching every variant of `item`.
    pub const fn wildcard(item: u32) -> Self {
        Self::new(ItemId(item), Variant::Wildcard, Tag::Untagged)
    }

    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Same item and tag with the variant widened to the wildcard.
    #[must_use]
    pub const fn to_wildcard(self) -> Self {
        self.with_variant(Variant::Wildcard)
    }

    /// True if this key may only be used for lookups, never stored.
    #[inline]
    pub const fn is_query_only(&self) -> bool {
        self.variant.is_wildcard() || self.tag.is_bound()
    }

    /// Stable 64-bit fingerprint of the key identity.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)?;
        match self.variant {
            Variant::Wildcard => write!(f, ":*")?,
            Variant::Damage(d) => write!(f, ":{d}")?,
        }
        match self.tag {
            Tag::Untagged => Ok(()),
            Tag::Hashed(h) => write!(f, "{{{h:016x}}}"),
            Tag::Low => write!(f, "{{low}}"),
            Tag::High => write!(f, "{{high}}"),
        }
    }
}
