//! Object catalog entries.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::footpath::FootpathSurfaceFlags;
use crate::object::Object;

/// Type tag of an object document (`objectType`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectType {
    FootpathSurface,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FootpathSurfaceInfo {
    pub flags: FootpathSurfaceFlags,
}

/// Catalog record describing an object without loading it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRepositoryItem {
    pub identifier: String,
    pub object_type: ObjectType,
    pub name: String,
    pub footpath_surface: FootpathSurfaceInfo,
}

impl ObjectRepositoryItem {
    pub fn new(identifier: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            identifier: identifier.into(),
            object_type,
            name: String::new(),
            footpath_surface: FootpathSurfaceInfo::default(),
        }
    }
}

/// Catalog of known objects keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct ObjectRepository {
    items: BTreeMap<String, ObjectRepositoryItem>,
}

impl ObjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports `object` into the catalog, replacing any item with the same identifier.
    pub fn register(&mut self, object: &dyn Object) -> &ObjectRepositoryItem {
        let mut item = ObjectRepositoryItem::new(object.identifier(), object.object_type());
        item.name = object.name().to_owned();
        object.set_repository_item(&mut item);

        match self.items.entry(item.identifier.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(item);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(item),
        }
    }

    pub fn find(&self, identifier: &str) -> Option<&ObjectRepositoryItem> {
        self.items.get(identifier)
    }

    pub fn items(&self) -> impl Iterator<Item = &ObjectRepositoryItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
