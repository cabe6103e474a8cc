//! Lifecycle shared by every loadable object.

use serde_json::Value;

use crate::context::ReadObjectContext;
use crate::drawing::DrawingContext;
use crate::error::ObjectError;
use crate::pools::AssetPools;
use crate::repository::{ObjectRepositoryItem, ObjectType};

/// A configurable visual asset.
///
/// Objects start unloaded. `load` reserves their display name and sprites in
/// the shared pools, `unload` hands them back. Both may be repeated.
pub trait Object {
    fn identifier(&self) -> &str;

    fn object_type(&self) -> ObjectType;

    /// Name in the fallback language, or `""` when the table has none.
    fn name(&self) -> &str;

    /// Reads the object's configuration document.
    fn read_json(
        &mut self,
        context: &mut dyn ReadObjectContext,
        root: &Value,
    ) -> Result<(), ObjectError>;

    fn load(&mut self, pools: &mut AssetPools) -> Result<(), ObjectError>;

    fn unload(&mut self, pools: &mut AssetPools) -> Result<(), ObjectError>;

    fn is_loaded(&self) -> bool;

    /// Draws a thumbnail centred in a `width` x `height` area.
    ///
    /// # Panics
    ///
    /// Panics when the object is not loaded.
    fn draw_preview(&self, canvas: &mut dyn DrawingContext, width: i32, height: i32);

    /// Copies the type-specific catalog fields into `item`.
    fn set_repository_item(&self, item: &mut ObjectRepositoryItem);
}
