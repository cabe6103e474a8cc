use std::fmt;

use crate::config::GameConfig;

/// Index into the banner table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerIndex(pub u8);

impl BannerIndex {
    /// Sentinel meaning "no banner".
    pub const NULL: Self = Self(0xFF);

    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }

    /// Returns true if the index addresses a slot of the banner table.
    #[inline]
    pub const fn is_valid(self) -> bool {
        !self.is_null() && (self.0 as usize) < GameConfig::MAX_BANNERS
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for BannerIndex {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for BannerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "banner#{}", self.0)
    }
}

/// Tile coordinates on the park grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoords {
    pub x: u8,
    pub y: u8,
}

impl TileCoords {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// World position of the tile centre at height `z`.
    pub fn to_world_centre(self, z: i32) -> CoordsXYZ {
        let half = GameConfig::COORDS_XY_STEP / 2;
        CoordsXYZ {
            x: i32::from(self.x) * GameConfig::COORDS_XY_STEP + half,
            y: i32::from(self.y) * GameConfig::COORDS_XY_STEP + half,
            z,
        }
    }
}

impl fmt::Display for TileCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordsXYZ {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CoordsXYZ {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Facing of an edge-mounted element, one of the four tile edges.
///
/// Decoding keeps only the low two bits, like [`Direction::from_bits`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8", into = "u8")
)]
pub struct Direction(u8);

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        Self::from_bits(value)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.0
    }
}

impl Direction {
    pub const WEST: Self = Self(0);
    pub const NORTH: Self = Self(1);
    pub const EAST: Self = Self(2);
    pub const SOUTH: Self = Self(3);

    /// Builds a direction from the low two bits of `value`.
    pub const fn from_bits(value: u8) -> Self {
        Self(value & 0b11)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}
