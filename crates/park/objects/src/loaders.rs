//! Object document loaders.
//!
//! Reads JSON object documents from disk into unloaded objects. Loading into
//! the asset pools is a separate step owned by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde_json::Value;

use crate::context::{ObjectDiagnostic, ObjectReadContext};
use crate::footpath::FootpathSurfaceObject;
use crate::object::Object;
use crate::repository::ObjectType;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// An object read from disk together with the warnings raised while reading it.
#[derive(Debug)]
pub struct LoadedObject<O> {
    pub path: PathBuf,
    pub object: O,
    pub warnings: Vec<ObjectDiagnostic>,
}

/// Loader for footpath surface documents.
pub struct FootpathSurfaceLoader;

impl FootpathSurfaceLoader {
    /// Load a footpath surface from a JSON document.
    ///
    /// The document must carry a non-empty `id` and
    /// `"objectType": "footpath_surface"`.
    pub fn load(path: &Path) -> LoadResult<LoadedObject<FootpathSurfaceObject>> {
        let content = read_file(path)?;
        let root: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse object JSON at {}", path.display()))?;

        let identifier = match root.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => bail!("{}: missing object id", path.display()),
        };

        let object_type = root
            .get("objectType")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if object_type.parse::<ObjectType>().ok() != Some(ObjectType::FootpathSurface) {
            bail!(
                "{}: {identifier} has objectType '{object_type}', expected '{}'",
                path.display(),
                ObjectType::FootpathSurface
            );
        }

        let mut object = FootpathSurfaceObject::new(identifier);
        let mut context = ObjectReadContext::new(object.identifier());
        object
            .read_json(&mut context, &root)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Ok(LoadedObject {
            path: path.to_path_buf(),
            object,
            warnings: context.into_warnings(),
        })
    }

    /// Load every `*.json` document in `dir`, ordered by file name.
    ///
    /// Fails on the first document that cannot be read.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<LoadedObject<FootpathSurfaceObject>>> {
        Self::load_documents(dir)?.into_iter().collect()
    }

    /// Like [`Self::load_dir`], but keeps one result per document so callers
    /// can skip the broken ones.
    pub fn load_documents(
        dir: &Path,
    ) -> LoadResult<Vec<LoadResult<LoadedObject<FootpathSurfaceObject>>>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read object directory {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths.iter().map(|path| Self::load(path)).collect())
    }
}
