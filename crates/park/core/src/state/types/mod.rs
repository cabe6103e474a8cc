mod banner;
mod common;
mod strings;
mod tile;

pub use banner::{Banner, BannerFlags, BannerTable};
pub use common::{BannerIndex, CoordsXYZ, Direction, TileCoords};
pub use strings::{Duplication, StringId, StringPoolError, UserStringPool};
pub use tile::{BannerElement, EdgeMask, SurfaceElement, TileElement, TileElements, TileFull};
