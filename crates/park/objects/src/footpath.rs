//! Footpath surface object.
//!
//! Describes the walkable top of a footpath tile. Its configuration document
//! only carries behaviour flags on top of the common string and image tables.

use bitflags::bitflags;
use serde_json::{Map, Value};

use crate::context::ReadObjectContext;
use crate::drawing::{DrawingContext, ScreenCoords};
use crate::error::ObjectError;
use crate::object::Object;
use crate::pools::{AssetPools, ImageId, ObjectStringId};
use crate::repository::{ObjectRepositoryItem, ObjectType};
use crate::tables::{ImageTable, ObjectStringKind, StringTable, populate_tables_from_json};

bitflags! {
    /// Footpath entry flags as stored in the catalog.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FootpathSurfaceFlags: u8 {
        /// Only offered in the scenario editor.
        const SHOW_ONLY_IN_SCENARIO_EDITOR = 1 << 2;
        const IS_QUEUE = 1 << 3;
        const NO_SLOPE_RAILINGS = 1 << 4;
    }
}

impl FootpathSurfaceFlags {
    /// Document property names, in the order they are read.
    const PROPERTIES: [(&'static str, Self); 3] = [
        ("editorOnly", Self::SHOW_ONLY_IN_SCENARIO_EDITOR),
        ("isQueue", Self::IS_QUEUE),
        ("noSlopeRailings", Self::NO_SLOPE_RAILINGS),
    ];

    /// Collects every named boolean property that is `true`.
    ///
    /// Unknown keys and non-boolean values are ignored.
    fn from_properties(properties: &Map<String, Value>) -> Self {
        Self::PROPERTIES
            .iter()
            .filter(|(name, _)| properties.get(*name).and_then(Value::as_bool) == Some(true))
            .fold(Self::empty(), |flags, (_, flag)| flags | *flag)
    }
}

/// Runtime view of a loaded surface, read by the path renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathSurfaceDescriptor {
    pub name: ObjectStringId,
    pub image: ImageId,
    pub preview_image: ImageId,
    pub flags: FootpathSurfaceFlags,
}

#[derive(Clone, Debug, Default)]
pub struct FootpathSurfaceObject {
    identifier: String,
    strings: StringTable,
    images: ImageTable,
    flags: FootpathSurfaceFlags,
    name_string_id: ObjectStringId,
    preview_image_id: ImageId,
    base_image_id: ImageId,
    descriptor: PathSurfaceDescriptor,
    loaded: bool,
}

impl FootpathSurfaceObject {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn flags(&self) -> FootpathSurfaceFlags {
        self.flags
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn strings_mut(&mut self) -> &mut StringTable {
        &mut self.strings
    }

    pub fn images(&self) -> &ImageTable {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageTable {
        &mut self.images
    }

    pub fn name_string_id(&self) -> ObjectStringId {
        self.name_string_id
    }

    /// First sprite of the reserved range.
    pub fn preview_image_id(&self) -> ImageId {
        self.preview_image_id
    }

    /// Sprite the surface tiles are drawn from, one past the preview.
    pub fn base_image_id(&self) -> ImageId {
        self.base_image_id
    }

    pub fn descriptor(&self) -> &PathSurfaceDescriptor {
        &self.descriptor
    }
}

impl Object for FootpathSurfaceObject {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::FootpathSurface
    }

    fn name(&self) -> &str {
        self.strings
            .get(ObjectStringKind::Name, StringTable::FALLBACK_LANGUAGE)
            .unwrap_or_default()
    }

    fn read_json(
        &mut self,
        context: &mut dyn ReadObjectContext,
        root: &Value,
    ) -> Result<(), ObjectError> {
        let root = root.as_object().ok_or_else(|| ObjectError::RootNotObject {
            object: self.identifier.clone(),
        })?;

        if let Some(properties) = root.get("properties").and_then(Value::as_object) {
            self.flags = FootpathSurfaceFlags::from_properties(properties);
        }

        populate_tables_from_json(context, root, &mut self.strings, &mut self.images);
        Ok(())
    }

    /// Reserves the display name and, when the image table is non-empty, a
    /// sprite range. A failed image reservation releases the name again.
    fn load(&mut self, pools: &mut AssetPools) -> Result<(), ObjectError> {
        if self.loaded {
            return Ok(());
        }

        self.strings.sort();
        let name_string_id =
            pools
                .names
                .allocate(self.name())
                .ok_or_else(|| ObjectError::NameExhausted {
                    object: self.identifier.clone(),
                })?;

        let (preview_image_id, base_image_id) = if self.images.is_empty() {
            (ImageId::NONE, ImageId::NONE)
        } else {
            match pools.images.allocate(self.images.images()) {
                Ok(preview) => (preview, preview.offset(1)),
                Err(source) => {
                    pools.names.free(name_string_id);
                    return Err(ObjectError::ImageAllocation {
                        object: self.identifier.clone(),
                        source,
                    });
                }
            }
        };

        self.name_string_id = name_string_id;
        self.preview_image_id = preview_image_id;
        self.base_image_id = base_image_id;
        self.descriptor = PathSurfaceDescriptor {
            name: name_string_id,
            image: base_image_id,
            preview_image: preview_image_id,
            flags: self.flags,
        };
        self.loaded = true;
        Ok(())
    }

    /// Releases everything `load` reserved. Cached ids and the descriptor are
    /// zeroed even when the image pool rejects the release.
    fn unload(&mut self, pools: &mut AssetPools) -> Result<(), ObjectError> {
        if !self.loaded {
            return Ok(());
        }

        pools.names.free(self.name_string_id);
        let released = if self.preview_image_id.is_none() {
            Ok(())
        } else {
            let count = self.images.count();
            pools
                .images
                .free(self.preview_image_id, count)
                .map_err(|source| ObjectError::ImageRelease {
                    object: self.identifier.clone(),
                    base: self.preview_image_id,
                    count,
                    source,
                })
        };

        self.name_string_id = ObjectStringId::NONE;
        self.preview_image_id = ImageId::NONE;
        self.base_image_id = ImageId::NONE;
        self.descriptor = PathSurfaceDescriptor::default();
        self.loaded = false;
        released
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn draw_preview(&self, canvas: &mut dyn DrawingContext, width: i32, height: i32) {
        assert!(
            self.loaded,
            "footpath surface {} previewed before load",
            self.identifier
        );

        let centre = ScreenCoords::new(width / 2 - 16, height / 2);
        canvas.draw_sprite(self.base_image_id.offset(3), centre);
        canvas.draw_sprite(
            self.base_image_id.offset(16),
            ScreenCoords::new(centre.x + 32, centre.y - 16),
        );
        canvas.draw_sprite(
            self.base_image_id.offset(8),
            ScreenCoords::new(centre.x + 32, centre.y + 16),
        );
    }

    fn set_repository_item(&self, item: &mut ObjectRepositoryItem) {
        item.footpath_surface.flags = self.flags;
    }
}
