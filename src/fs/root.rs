//! The root folder singleton.

use serde_json::Value;

use super::entity::{EntityAttributes, EntityKind, Metadata, Parent, Resource};
use super::file::File;
use super::folder::{Entry, Folder, parse_contents};
use crate::api::ApiClient;
use crate::error::{BcError, Result, ValidationError};

static ROOT: Root = Root { _private: () };

/// The folder at `/`.
///
/// There is exactly one instance, obtained through [`Root::get`]. It can be
/// listed but never saved, renamed or deleted.
#[derive(Debug)]
pub struct Root {
    _private: (),
}

impl Root {
    pub fn get() -> &'static Root {
        &ROOT
    }

    /// A top-level file named `name`.
    pub fn file(&self, name: &str) -> File {
        File::from_attributes(EntityAttributes::new(Parent::Root, name))
    }

    /// A top-level folder named `name`.
    pub fn folder(&self, name: &str) -> Folder {
        Folder::from_attributes(EntityAttributes::new(Parent::Root, name))
    }

    /// List the top-level files and folders.
    pub async fn fetch(&self, client: &ApiClient) -> Result<Vec<Entry>> {
        let value: Value = client.get_json(&self.url(client.site())).await?;
        let metadata: Metadata = serde_json::from_value(value)?;
        parse_contents(metadata.contents.unwrap_or_default(), &Parent::Root)
    }

    /// Always fails: the root cannot be saved.
    pub fn save(&self) -> Result<()> {
        Err(BcError::UnsupportedOperation("save"))
    }

    /// Always fails: the root cannot be deleted.
    pub fn destroy(&self) -> Result<()> {
        Err(BcError::UnsupportedOperation("destroy"))
    }
}

impl Resource for Root {
    fn name(&self) -> &str {
        ""
    }

    fn path(&self) -> &str {
        "/"
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Folder
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Ok(())
    }
}

/// Shorthand for [`Root::get`].
pub fn root() -> &'static Root {
    Root::get()
}
