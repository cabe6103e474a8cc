use bitflags::bitflags;

use super::{BannerIndex, StringId, TileCoords};
use crate::config::GameConfig;

bitflags! {
    /// Per-banner behaviour flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BannerFlags: u8 {
        /// Guests may not walk past the banner.
        const NO_ENTRY         = 1 << 0;
        const IS_LARGE_SCENERY = 1 << 1;
        const LINKED_TO_RIDE   = 1 << 2;
        const IS_WALL          = 1 << 3;
    }
}

/// In-world sign record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Banner {
    /// Tile the banner stands on.
    pub tile: TileCoords,
    pub colour: u8,
    pub text_colour: u8,
    /// Text shown on the banner, usually a user string.
    pub string_id: StringId,
    pub flags: BannerFlags,
}

impl Banner {
    pub fn new(tile: TileCoords) -> Self {
        Self {
            tile,
            colour: 0,
            text_colour: 0,
            string_id: StringId::NONE,
            flags: BannerFlags::empty(),
        }
    }

    pub fn with_text(mut self, string_id: StringId) -> Self {
        self.string_id = string_id;
        self
    }

    pub fn has_no_entry(&self) -> bool {
        self.flags.contains(BannerFlags::NO_ENTRY)
    }
}

/// Fixed-size table of banners addressed by [`BannerIndex`].
///
/// # Invariants
///
/// - The table always has exactly `GameConfig::MAX_BANNERS` slots
/// - `BannerIndex::NULL` never addresses a slot
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerTable {
    slots: Vec<Option<Banner>>,
}

impl BannerTable {
    pub fn new() -> Self {
        Self {
            slots: vec![None; GameConfig::MAX_BANNERS],
        }
    }

    /// Returns the banner at `index`, if the index is valid and the slot is in use.
    pub fn get(&self, index: BannerIndex) -> Option<&Banner> {
        if !index.is_valid() {
            return None;
        }
        self.slots.get(index.as_usize())?.as_ref()
    }

    pub fn get_mut(&mut self, index: BannerIndex) -> Option<&mut Banner> {
        if !index.is_valid() {
            return None;
        }
        self.slots.get_mut(index.as_usize())?.as_mut()
    }

    /// Stores `banner` in the first free slot.
    ///
    /// Returns `None` when every slot is in use.
    pub fn insert(&mut self, banner: Banner) -> Option<BannerIndex> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(banner);
        u8::try_from(slot).ok().map(BannerIndex)
    }

    /// Clears the slot at `index`, returning the banner it held.
    pub fn remove(&mut self, index: BannerIndex) -> Option<Banner> {
        if !index.is_valid() {
            return None;
        }
        self.slots.get_mut(index.as_usize())?.take()
    }

    /// Iterates over occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (BannerIndex, &Banner)> {
        self.slots.iter().enumerate().filter_map(|(slot, banner)| {
            let banner = banner.as_ref()?;
            Some((BannerIndex(slot as u8), banner))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BannerTable {
    fn default() -> Self {
        Self::new()
    }
}
