//! Loadable visual assets and their shared pools.
//!
//! This crate houses the footpath surface object and the infrastructure every
//! object type needs:
//! - String and image tables populated from JSON object documents
//! - The display-name pool and the global sprite range pool
//! - Preview drawing onto a narrow [`DrawingContext`]
//! - Catalog export into [`ObjectRepositoryItem`]s
//!
//! Objects are content: they are read at startup and never appear in
//! `park_core::GameState`.

pub mod context;
pub mod drawing;
pub mod error;
pub mod footpath;
pub mod object;
pub mod pools;
pub mod repository;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use context::{ObjectDiagnostic, ObjectReadContext, ObjectWarning, ReadObjectContext};
pub use drawing::{DrawingContext, ScreenCoords, SpriteRecorder};
pub use error::ObjectError;
pub use footpath::{FootpathSurfaceFlags, FootpathSurfaceObject, PathSurfaceDescriptor};
pub use object::Object;
pub use pools::{AssetPools, ImageId, ImagePool, ImagePoolError, ObjectStringId, ObjectStringPool};
pub use repository::{FootpathSurfaceInfo, ObjectRepository, ObjectRepositoryItem, ObjectType};
pub use tables::{
    ImageEntry, ImageTable, LanguageId, ObjectStringKind, StringEntry, StringTable,
    populate_tables_from_json,
};

#[cfg(feature = "loaders")]
pub use loaders::{FootpathSurfaceLoader, LoadResult, LoadedObject};
