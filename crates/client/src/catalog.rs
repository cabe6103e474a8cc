//! Startup object catalog.
//!
//! Reads every footpath surface document in a directory, loads each one into
//! the shared asset pools and exports it into an [`ObjectRepository`].
//! Documents that fail to read or load are skipped with a warning.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use park_objects::{
    AssetPools, FootpathSurfaceLoader, FootpathSurfaceObject, Object, ObjectRepository,
};

/// Loaded objects and the pools backing them.
#[derive(Debug, Default)]
pub struct ObjectCatalog {
    pools: AssetPools,
    objects: Vec<FootpathSurfaceObject>,
    repository: ObjectRepository,
}

impl ObjectCatalog {
    pub fn new(pools: AssetPools) -> Self {
        Self {
            pools,
            ..Self::default()
        }
    }

    /// Loads every document in `dir` into the given pools.
    ///
    /// Fails only when the directory itself cannot be listed.
    pub fn load_dir(dir: &Path, pools: AssetPools) -> Result<Self> {
        let mut catalog = Self::new(pools);
        let documents = FootpathSurfaceLoader::load_documents(dir)?;

        for document in documents {
            let loaded = match document {
                Ok(loaded) => loaded,
                Err(error) => {
                    warn!(target: "client::catalog", "Skipping object document: {error:#}");
                    continue;
                }
            };
            for warning in &loaded.warnings {
                warn!(
                    target: "client::catalog",
                    object = loaded.object.identifier(),
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
            catalog.insert(loaded.object);
        }

        info!(
            target: "client::catalog",
            objects = catalog.len(),
            images = catalog.pools.images.allocated(),
            "Object catalog loaded from {}",
            dir.display()
        );
        Ok(catalog)
    }

    /// Loads `object` and registers it; returns whether it was kept.
    pub fn insert(&mut self, mut object: FootpathSurfaceObject) -> bool {
        if let Err(error) = object.load(&mut self.pools) {
            warn!(target: "client::catalog", "Skipping {}: {error}", object.identifier());
            return false;
        }

        let item = self.repository.register(&object);
        debug!(
            target: "client::catalog",
            object = %item.identifier,
            name = %item.name,
            "Object registered"
        );

        if let Some(index) = self
            .objects
            .iter()
            .position(|existing| existing.identifier() == object.identifier())
        {
            let mut replaced = std::mem::replace(&mut self.objects[index], object);
            if let Err(error) = replaced.unload(&mut self.pools) {
                warn!(target: "client::catalog", "{error}");
            }
        } else {
            self.objects.push(object);
        }
        true
    }

    pub fn find(&self, identifier: &str) -> Option<&FootpathSurfaceObject> {
        self.objects
            .iter()
            .find(|object| object.identifier() == identifier)
    }

    pub fn objects(&self) -> &[FootpathSurfaceObject] {
        &self.objects
    }

    pub fn repository(&self) -> &ObjectRepository {
        &self.repository
    }

    pub fn pools(&self) -> &AssetPools {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Unloads every object, returning their resources to the pools.
    pub fn unload_all(&mut self) {
        for object in &mut self.objects {
            if let Err(error) = object.unload(&mut self.pools) {
                warn!(target: "client::catalog", "{error}");
            }
        }
        debug!(
            target: "client::catalog",
            names = self.pools.names.len(),
            images = self.pools.images.allocated(),
            "Object catalog unloaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use park_objects::{FootpathSurfaceFlags, ImagePool, ObjectStringPool};

    use super::*;

    fn document(id: &str, name: &str, images: usize) -> String {
        let images = vec![r#""$G1[0]""#; images].join(",");
        format!(
            r#"{{
                "id": "{id}",
                "objectType": "footpath_surface",
                "properties": {{ "isQueue": true }},
                "strings": {{ "name": {{ "en-GB": "{name}" }} }},
                "images": [{images}]
            }}"#
        )
    }

    #[test]
    fn test_load_dir_registers_every_surface() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), document("park.queue.red", "Red", 24)).unwrap();
        fs::write(dir.path().join("b.json"), document("park.queue.blue", "Blue", 24)).unwrap();

        let mut catalog = ObjectCatalog::load_dir(dir.path(), AssetPools::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.objects().iter().all(|object| object.is_loaded()));

        let item = catalog.repository().find("park.queue.blue").unwrap();
        assert_eq!(item.name, "Blue");
        assert_eq!(item.footpath_surface.flags, FootpathSurfaceFlags::IS_QUEUE);
        assert_eq!(catalog.pools().images.allocated(), 48);

        catalog.unload_all();
        assert_eq!(catalog.pools().images.allocated(), 0);
        assert!(catalog.pools().names.is_empty());
    }

    #[test]
    fn test_bad_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{ not json").unwrap();
        fs::write(dir.path().join("b.json"), document("park.queue.red", "Red", 1)).unwrap();

        let catalog = ObjectCatalog::load_dir(dir.path(), AssetPools::default()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("park.queue.red").is_some());
    }

    #[test]
    fn test_objects_that_do_not_fit_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), document("park.queue.red", "Red", 8)).unwrap();
        fs::write(dir.path().join("b.json"), document("park.queue.blue", "Blue", 8)).unwrap();

        let pools = AssetPools::new(ObjectStringPool::default(), ImagePool::new(100, 10));
        let catalog = ObjectCatalog::load_dir(dir.path(), pools).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.repository().find("park.queue.blue").is_none());
    }

    #[test]
    fn test_reinserting_an_identifier_replaces_it() {
        let mut catalog = ObjectCatalog::default();
        let mut first = FootpathSurfaceObject::new("park.queue.red");
        first.images_mut().push(park_objects::ImageEntry::reference("$G1[0]"));
        let mut second = first.clone();
        second.images_mut().push(park_objects::ImageEntry::reference("$G1[1]"));

        assert!(catalog.insert(first));
        assert!(catalog.insert(second));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.pools().images.allocated(), 2);
    }
}
