//! Shared pools objects allocate from while loaded.
//!
//! Objects never own their display-name id or sprite range directly: they
//! borrow [`AssetPools`] on load and hand everything back on unload.

mod images;
mod names;

pub use images::{ImageId, ImagePool, ImagePoolError};
pub use names::{ObjectStringId, ObjectStringPool};

/// Pools passed to object load and unload.
#[derive(Clone, Debug, Default)]
pub struct AssetPools {
    pub names: ObjectStringPool,
    pub images: ImagePool,
}

impl AssetPools {
    pub fn new(names: ObjectStringPool, images: ImagePool) -> Self {
        Self { names, images }
    }
}
