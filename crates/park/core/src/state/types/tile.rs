use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{BannerIndex, Direction, TileCoords};
use crate::config::GameConfig;

bitflags! {
    /// Tile edges a path-side element leaves open for guests.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EdgeMask: u8 {
        const WEST  = 1 << 0;
        const NORTH = 1 << 1;
        const EAST  = 1 << 2;
        const SOUTH = 1 << 3;
    }
}

impl EdgeMask {
    /// Returns the single edge bit matching `direction`.
    pub const fn from_direction(direction: Direction) -> Self {
        Self::from_bits_truncate(1 << (direction.index() & 0b11))
    }
}

impl Default for EdgeMask {
    fn default() -> Self {
        Self::all()
    }
}

/// Ground surface of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceElement {
    pub base_height: u8,
}

/// Spatial element backing a banner record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerElement {
    pub index: BannerIndex,
    /// Edge of the tile the banner faces.
    pub position: Direction,
    pub allowed_edges: EdgeMask,
    pub base_height: u8,
}

impl BannerElement {
    pub fn new(index: BannerIndex, position: Direction, base_height: u8) -> Self {
        Self {
            index,
            position,
            allowed_edges: EdgeMask::all(),
            base_height,
        }
    }
}

/// Element stacked on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileElement {
    Surface(SurfaceElement),
    Banner(BannerElement),
}

impl TileElement {
    pub fn as_banner(&self) -> Option<&BannerElement> {
        match self {
            TileElement::Banner(banner) => Some(banner),
            _ => None,
        }
    }

    pub fn as_banner_mut(&mut self) -> Option<&mut BannerElement> {
        match self {
            TileElement::Banner(banner) => Some(banner),
            _ => None,
        }
    }
}

type ElementStack = ArrayVec<TileElement, { GameConfig::MAX_ELEMENTS_PER_TILE }>;

/// Returned when a tile cannot hold another element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("tile {0} has no room for another element")]
pub struct TileFull(pub TileCoords);

/// Sparse store of element stacks keyed by tile.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileElements {
    tiles: BTreeMap<TileCoords, ElementStack>,
}

impl TileElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `element` to the stack at `tile`.
    pub fn push(&mut self, tile: TileCoords, element: TileElement) -> Result<(), TileFull> {
        self.tiles
            .entry(tile)
            .or_default()
            .try_push(element)
            .map_err(|_| TileFull(tile))
    }

    pub fn elements(&self, tile: TileCoords) -> &[TileElement] {
        self.tiles.get(&tile).map(|stack| stack.as_slice()).unwrap_or(&[])
    }

    /// Height of the tile's surface in world units, or 0 for bare tiles.
    pub fn surface_height(&self, tile: TileCoords) -> i32 {
        self.elements(tile)
            .iter()
            .find_map(|element| match element {
                TileElement::Surface(surface) => {
                    Some(i32::from(surface.base_height) * GameConfig::COORDS_Z_STEP)
                }
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Finds the banner element for `index` on `tile`.
    pub fn banner(&self, tile: TileCoords, index: BannerIndex) -> Option<&BannerElement> {
        self.elements(tile)
            .iter()
            .filter_map(TileElement::as_banner)
            .find(|banner| banner.index == index)
    }

    pub fn banner_mut(
        &mut self,
        tile: TileCoords,
        index: BannerIndex,
    ) -> Option<&mut BannerElement> {
        self.tiles
            .get_mut(&tile)?
            .iter_mut()
            .filter_map(TileElement::as_banner_mut)
            .find(|banner| banner.index == index)
    }

    /// Removes every element on `tile` matching `predicate`.
    pub fn retain(&mut self, tile: TileCoords, mut predicate: impl FnMut(&TileElement) -> bool) {
        if let Some(stack) = self.tiles.get_mut(&tile) {
            stack.retain(|element| predicate(element));
            if stack.is_empty() {
                self.tiles.remove(&tile);
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_direction_keeps_low_bits() {
        let direction: Direction = bincode::deserialize(&[9]).unwrap();
        assert_eq!(direction, Direction::NORTH);
        assert_eq!(EdgeMask::from_direction(direction), EdgeMask::NORTH);
        assert_eq!(bincode::serialize(&Direction::SOUTH).unwrap(), vec![3]);
    }

    #[test]
    fn test_corrupt_banner_element_decodes_to_valid_edge() {
        let element = BannerElement::new(BannerIndex(0), Direction::SOUTH, 4);
        let mut bytes = bincode::serialize(&element).unwrap();
        assert_eq!(bytes[1], 3, "position is the second field");
        bytes[1] = 0xFE;

        let decoded: BannerElement = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.position, Direction::EAST);
        assert_eq!(EdgeMask::from_direction(decoded.position), EdgeMask::EAST);
    }
}
