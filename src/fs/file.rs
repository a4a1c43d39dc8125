//! Files and their content transfers.

use bytes::Bytes;
use tracing::debug;

use super::entity::{Entity, EntityAttributes, EntityKind, EntityMeta, Metadata, Resource};
use crate::api::ApiClient;
use crate::error::{Result, ValidationError};

/// A file in the site's storage.
///
/// A file is created remotely only by uploading content:
///
/// ```no_run
/// use bcapi::{ApiClient, Root, Site};
///
/// # async fn example() -> bcapi::Result<()> {
/// let client = ApiClient::new(Site::new("https://example.com", "token"));
/// let file = Root::get().file("hello_world.txt");
/// file.upload(&client, "Hello World !").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    meta: EntityMeta,
}

impl File {
    /// Create a file object from its full path. A missing leading `/` is
    /// implied; the path `/` itself is rejected.
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            meta: EntityMeta::from_path(path)?,
        })
    }

    /// Create a file object from explicit attributes.
    pub fn from_attributes(attrs: EntityAttributes) -> Self {
        Self {
            meta: EntityMeta::from_attributes(attrs),
        }
    }

    /// Upload new content, creating the file if it does not exist yet.
    pub async fn upload(&self, client: &ApiClient, data: impl Into<Bytes>) -> Result<()> {
        self.meta.check_path()?;
        let data = data.into();
        debug!(path = %self.path(), bytes = data.len(), "uploading file");
        client.put_bytes(&self.content_url(client.site()), data).await
    }

    /// Upload new content, then refresh the metadata from the server.
    ///
    /// A failed upload is returned as-is and no fetch is attempted.
    pub async fn upload_and_fetch(
        &mut self,
        client: &ApiClient,
        data: impl Into<Bytes>,
    ) -> Result<()> {
        self.upload(client, data).await?;
        self.fetch(client).await
    }

    /// Download the raw file content.
    pub async fn download(&self, client: &ApiClient) -> Result<Bytes> {
        self.meta.check_path()?;
        client.get_bytes(&self.content_url(client.site())).await
    }
}

impl Resource for File {
    fn name(&self) -> &str {
        self.meta.name()
    }

    fn path(&self) -> &str {
        self.meta.path()
    }

    fn kind(&self) -> EntityKind {
        EntityKind::File
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.meta.validate()
    }
}

impl Entity for File {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }

    fn apply_metadata(&mut self, metadata: Metadata) -> Result<()> {
        self.meta.apply(&metadata)
    }
}
