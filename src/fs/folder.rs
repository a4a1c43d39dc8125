//! Folders and folder listings.

use tracing::debug;

use super::entity::{
    Entity, EntityAttributes, EntityKind, EntityMeta, Metadata, Parent, Resource,
};
use super::file::File;
use crate::api::ApiClient;
use crate::error::{BcError, Result, ValidationError};

/// A child of a folder listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    File(File),
    Folder(Folder),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(f) => f.name(),
            Entry::Folder(f) => f.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Entry::File(f) => f.path(),
            Entry::Folder(f) => f.path(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entry::File(_) => EntityKind::File,
            Entry::Folder(_) => EntityKind::Folder,
        }
    }

    pub fn parent(&self) -> Option<&Parent> {
        match self {
            Entry::File(f) => f.parent(),
            Entry::Folder(f) => f.parent(),
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Entry::File(f) => Some(f),
            Entry::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Entry::Folder(f) => Some(f),
            Entry::File(_) => None,
        }
    }
}

/// Turn listing items into typed entries whose parent is `parent`.
///
/// Items tagged with anything other than `file` or `folder` are rejected.
pub(crate) fn parse_contents(items: Vec<Metadata>, parent: &Parent) -> Result<Vec<Entry>> {
    items
        .into_iter()
        .map(|item| {
            let tag = item.kind.clone().unwrap_or_default();
            let attrs = EntityAttributes {
                parent: Some(parent.clone()),
                ..Default::default()
            };
            match EntityKind::from_tag(&tag) {
                Some(EntityKind::File) => {
                    let mut file = File::from_attributes(attrs);
                    file.apply_metadata(item)?;
                    Ok(Entry::File(file))
                }
                Some(EntityKind::Folder) => {
                    let mut folder = Folder::from_attributes(attrs);
                    folder.apply_metadata(item)?;
                    Ok(Entry::Folder(folder))
                }
                None => Err(BcError::UnknownEntityType(tag)),
            }
        })
        .collect()
}

fn parent_snapshot(meta: &EntityMeta) -> Parent {
    Parent::Folder(Box::new(Folder {
        meta: meta.clone(),
        contents: Vec::new(),
    }))
}

/// A folder in the site's storage.
///
/// Constructing a folder does not create it remotely; call
/// [`Folder::create`] for that. [`Entity::fetch`] loads the folder's
/// metadata along with its [`contents`](Folder::contents).
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    meta: EntityMeta,
    contents: Vec<Entry>,
}

impl Folder {
    /// Create a folder object from its full path. The path `/` is rejected;
    /// use [`Root::get`](super::Root::get) instead.
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            meta: EntityMeta::from_path(path)?,
            contents: Vec::new(),
        })
    }

    /// Create a folder object from explicit attributes.
    pub fn from_attributes(attrs: EntityAttributes) -> Self {
        Self {
            meta: EntityMeta::from_attributes(attrs),
            contents: Vec::new(),
        }
    }

    /// Files and folders inside this folder, as of the last fetch.
    pub fn contents(&self) -> &[Entry] {
        &self.contents
    }

    /// A file named `name` inside this folder.
    pub fn file(&self, name: &str) -> File {
        self.file_with(name, EntityAttributes::default())
    }

    /// A file named `name` inside this folder, with extra attributes layered
    /// on top.
    pub fn file_with(&self, name: &str, attrs: EntityAttributes) -> File {
        File::from_attributes(EntityAttributes::new(self.as_parent(), name).merge(attrs))
    }

    /// A sub-folder named `name`.
    pub fn folder(&self, name: &str) -> Folder {
        Folder::from_attributes(EntityAttributes::new(self.as_parent(), name))
    }

    /// Create the folder on the server.
    pub async fn create(&self, client: &ApiClient) -> Result<()> {
        self.meta.check_path()?;
        debug!(path = %self.path(), "creating folder");
        let url = format!("{}?type=folder", self.content_url(client.site()));
        client.put_empty(&url).await
    }

    /// This folder as the parent of a child. Listings are not carried along.
    fn as_parent(&self) -> Parent {
        parent_snapshot(&self.meta)
    }
}

impl Resource for Folder {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn path(&self) -> &str {
        self.meta.path()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Folder
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.meta.validate()
    }
}

impl Entity for Folder {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_metadata(&mut self, metadata: Metadata) -> Result<()> {
        let mut meta = self.meta.clone();
        meta.apply(&metadata)?;
        let contents = match metadata.contents {
            Some(items) => parse_contents(items, &parent_snapshot(&meta))?,
            None => Vec::new(),
        };

        self.meta = meta;
        self.contents = contents;
        Ok(())
    }
}
