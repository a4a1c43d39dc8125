//! Storage file system: files, folders and the root.

pub(crate) mod entity;
mod file;
mod folder;
pub mod path;
mod root;

pub use entity::{
    Entity, EntityAttributes, EntityKind, EntityMeta, Metadata, Parent, Resource,
    STORAGE_ENDPOINT, content_url, meta_url, parse_date,
};
pub use file::File;
pub use folder::{Entry, Folder};
pub use root::{Root, root};
