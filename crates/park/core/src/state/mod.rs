//! Authoritative park state representation.
//!
//! This module owns the stores an action reads and mutates: the banner table,
//! the tile element store and the user string pool. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    Banner, BannerElement, BannerFlags, BannerIndex, BannerTable, CoordsXYZ, Direction,
    Duplication, EdgeMask, StringId, StringPoolError, SurfaceElement, TileCoords, TileElement,
    TileElements, TileFull, UserStringPool,
};

use crate::config::GameConfig;

/// Errors raised while placing banners during park setup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("banner table is full")]
    BannerTableFull,

    #[error(transparent)]
    TileFull(#[from] TileFull),
}

/// Canonical snapshot of the deterministic park state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub banners: BannerTable,
    pub tiles: TileElements,
    pub strings: UserStringPool,
}

impl GameState {
    /// Creates a fresh state from the provided stores.
    pub fn new(banners: BannerTable, tiles: TileElements, strings: UserStringPool) -> Self {
        Self {
            banners,
            tiles,
            strings,
        }
    }

    /// Creates an empty park sized by `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            banners: BannerTable::new(),
            tiles: TileElements::new(),
            strings: UserStringPool::with_capacity(config.user_string_capacity),
        }
    }

    /// Adds a ground surface at `tile`.
    pub fn add_surface(&mut self, tile: TileCoords, base_height: u8) -> Result<(), TileFull> {
        self.tiles
            .push(tile, TileElement::Surface(SurfaceElement { base_height }))
    }

    /// Registers `banner` and its backing tile element facing `position`.
    ///
    /// Nothing is stored when either the table or the tile is full.
    pub fn place_banner(
        &mut self,
        banner: Banner,
        position: Direction,
        base_height: u8,
    ) -> Result<BannerIndex, PlacementError> {
        let tile = banner.tile;
        let index = self
            .banners
            .insert(banner)
            .ok_or(PlacementError::BannerTableFull)?;

        let element = BannerElement::new(index, position, base_height);
        if let Err(err) = self.tiles.push(tile, TileElement::Banner(element)) {
            self.banners.remove(index);
            return Err(err.into());
        }
        Ok(index)
    }

    /// Removes a banner record, its tile element and its string reference.
    pub fn remove_banner(&mut self, index: BannerIndex) -> Option<Banner> {
        let banner = self.banners.remove(index)?;
        self.tiles.retain(banner.tile, |element| {
            element.as_banner().is_none_or(|element| element.index != index)
        });
        self.strings.free(banner.string_id);
        Some(banner)
    }

    /// Resolves the tile element backing the banner at `index`.
    pub fn banner_element(&self, index: BannerIndex) -> Option<&BannerElement> {
        let banner = self.banners.get(index)?;
        self.tiles.banner(banner.tile, index)
    }

    pub fn banner_element_mut(&mut self, index: BannerIndex) -> Option<&mut BannerElement> {
        let tile = self.banners.get(index)?.tile;
        self.tiles.banner_mut(tile, index)
    }
}
