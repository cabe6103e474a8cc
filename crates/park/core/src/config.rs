/// Park rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of user strings the park can hold at once.
    pub user_string_capacity: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Size of the banner table. Valid indices are `0..MAX_BANNERS`.
    pub const MAX_BANNERS: usize = 250;
    /// Maximum number of elements stacked on a single tile.
    pub const MAX_ELEMENTS_PER_TILE: usize = 16;

    // ===== palette bounds =====
    /// Highest primary colour index accepted by banner recolouring.
    pub const MAX_PRIMARY_COLOUR: u8 = 31;
    /// Highest text colour index accepted for banner text.
    pub const MAX_TEXT_COLOUR: u8 = 13;

    // ===== coordinate scaling =====
    /// World units per tile along the x and y axes.
    pub const COORDS_XY_STEP: i32 = 32;
    /// World units per height step along z.
    pub const COORDS_Z_STEP: i32 = 8;

    // ===== user strings =====
    /// Maximum stored length of a user string, in bytes.
    pub const USER_STRING_MAX_LENGTH: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_USER_STRING_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self {
            user_string_capacity: Self::DEFAULT_USER_STRING_CAPACITY,
        }
    }

    pub fn with_user_string_capacity(user_string_capacity: usize) -> Self {
        Self {
            user_string_capacity,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
