//! Shared state and behavior of files and folders.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::folder::Folder;
use super::path::{join_path, split_path};
use crate::api::ApiClient;
use crate::config::Site;
use crate::error::{BcError, Result, ValidationError};

/// Collection root for storage resources.
pub const STORAGE_ENDPOINT: &str = "/api/v2/admin/sites/current/storage";

/// Entity type tag as used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    File,
    Folder,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::File => "file",
            EntityKind::Folder => "folder",
        }
    }

    /// Parse a wire tag; `None` for anything but `file` / `folder`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "file" => Some(EntityKind::File),
            "folder" => Some(EntityKind::Folder),
            _ => None,
        }
    }
}

/// The folder an entity lives in.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    /// The root folder `/`.
    Root,
    /// Any other folder.
    Folder(Box<Folder>),
}

impl Parent {
    /// Resolve a parent path: `/` is the root, anything else a folder.
    pub fn from_path(path: &str) -> Result<Self> {
        if path == "/" {
            Ok(Parent::Root)
        } else {
            Ok(Parent::Folder(Box::new(Folder::new(path)?)))
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Parent::Root => "/",
            Parent::Folder(folder) => folder.path(),
        }
    }
}

impl From<Folder> for Parent {
    fn from(folder: Folder) -> Self {
        Parent::Folder(Box::new(folder))
    }
}

/// Attributes for object-form construction.
///
/// Missing `parent` or `name` is not a construction error; it surfaces when
/// the entity is validated.
#[derive(Debug, Clone, Default)]
pub struct EntityAttributes {
    pub parent: Option<Parent>,
    pub name: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl EntityAttributes {
    pub fn new(parent: Parent, name: impl Into<String>) -> Self {
        Self {
            parent: Some(parent),
            name: Some(name.into()),
            last_modified: None,
        }
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: EntityAttributes) -> Self {
        Self {
            parent: other.parent.or(self.parent),
            name: other.name.or(self.name),
            last_modified: other.last_modified.or(self.last_modified),
        }
    }
}

/// Metadata document returned by `GET <contentUrl>?meta`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub contents: Option<Vec<Metadata>>,
}

/// Parse a `lastModified` value: RFC 3339, or a naive ISO date-time taken
/// as UTC.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|_| BcError::InvalidDate(value.to_string()))
}

/// Build the content URL of `path`: the storage root followed by the path
/// with one leading `/` removed.
pub fn content_url(site: &Site, path: &str) -> String {
    let relative = path.strip_prefix('/').unwrap_or(path);
    format!("{}{}/{}", site.root_url, STORAGE_ENDPOINT, relative)
}

/// Metadata URL of `path`.
pub fn meta_url(site: &Site, path: &str) -> String {
    format!("{}?meta", content_url(site, path))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(&['&', '%'][..])
}

/// Attribute storage shared by files and folders.
///
/// `path` is derived: every setter that changes `name` or `parent`
/// recomputes it before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMeta {
    name: String,
    parent: Option<Parent>,
    path: String,
    /// Path the remote store knows this entity under. Set by both
    /// construction forms and at every sync point; empty without a parent.
    remote_path: String,
    last_modified: Option<DateTime<Utc>>,
}

impl EntityMeta {
    pub(crate) fn from_attributes(attrs: EntityAttributes) -> Self {
        let mut meta = Self {
            name: attrs.name.unwrap_or_default(),
            parent: attrs.parent,
            path: String::new(),
            remote_path: String::new(),
            last_modified: attrs.last_modified,
        };
        meta.mark_synced();
        meta
    }

    /// Build from a path string. Any path that resolves to `/` (including
    /// the empty path) is reserved for the root.
    pub(crate) fn from_path(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Err(BcError::RootPath);
        }
        let split = split_path(path);
        let parent = Parent::from_path(split.parent)?;
        let meta = Self::from_attributes(EntityAttributes::new(parent, split.name));
        if meta.path == "/" {
            return Err(BcError::RootPath);
        }
        Ok(meta)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh_path();
    }

    pub fn set_parent(&mut self, parent: Parent) {
        self.parent = Some(parent);
        self.refresh_path();
    }

    /// Record that the remote store now agrees with the local attributes.
    pub(crate) fn mark_synced(&mut self) {
        self.refresh_path();
        self.remote_path = self.path.clone();
    }

    fn refresh_path(&mut self) {
        self.path = match &self.parent {
            Some(parent) => join_path(parent.path(), &self.name),
            None => String::new(),
        };
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !is_valid_name(&self.name) {
            return Err(ValidationError::InvalidName(self.name.clone()));
        }
        self.check_path()
    }

    /// Fails when the path is empty or `/`, which no request may target.
    pub(crate) fn check_path(&self) -> std::result::Result<(), ValidationError> {
        if self.path.is_empty() || self.path == "/" {
            return Err(ValidationError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }

    /// Apply the attributes common to every entity from a metadata document
    /// and mark the entity synced. Nothing changes when parsing fails.
    pub(crate) fn apply(&mut self, metadata: &Metadata) -> Result<()> {
        let last_modified = metadata
            .last_modified
            .as_deref()
            .map(parse_date)
            .transpose()?;

        if let Some(name) = &metadata.name {
            self.name = name.clone();
        }
        if last_modified.is_some() {
            self.last_modified = last_modified;
        }
        self.mark_synced();
        Ok(())
    }
}

/// Path, URL and validation behavior shared by every storage resource,
/// including the root folder.
pub trait Resource {
    fn name(&self) -> &str;

    fn path(&self) -> &str;

    fn kind(&self) -> EntityKind;

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    /// Collection root for storage resources.
    fn endpoint(&self) -> &'static str {
        STORAGE_ENDPOINT
    }

    /// URL where the raw content is transferred.
    fn content_url(&self, site: &Site) -> String {
        content_url(site, self.path())
    }

    /// URL for metadata fetch, save and destroy.
    fn url(&self, site: &Site) -> String {
        meta_url(site, self.path())
    }
}

/// A file or folder that can be read, renamed and deleted remotely.
#[async_trait]
pub trait Entity: Resource + Send + Sync {
    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Apply a metadata document fetched from the server. This is a sync
    /// point; on error the entity is left untouched.
    fn apply_metadata(&mut self, metadata: Metadata) -> Result<()>;

    fn parent(&self) -> Option<&Parent> {
        self.meta().parent()
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.meta().last_modified()
    }

    fn set_name(&mut self, name: &str) {
        self.meta_mut().set_name(name);
    }

    fn set_parent(&mut self, parent: Parent) {
        self.meta_mut().set_parent(parent);
    }

    /// Body sent on save. Only `name` is persisted.
    fn to_json(&self) -> Value {
        json!({ "name": self.name() })
    }

    /// Load metadata from the server into this entity.
    async fn fetch(&mut self, client: &ApiClient) -> Result<()> {
        let value = client.get_json(&self.url(client.site())).await?;
        let metadata: Metadata = serde_json::from_value(value)?;
        self.apply_metadata(metadata)
    }

    /// Persist the entity's name.
    ///
    /// The request targets the path the server last knew, so a local rename
    /// followed by `save` renames the remote resource.
    async fn save(&mut self, client: &ApiClient) -> Result<()> {
        self.validate()?;
        let target = match self.meta().remote_path() {
            "" => self.path().to_string(),
            p => p.to_string(),
        };
        let body = self.to_json();
        if let Some(value) = client.put_json(&meta_url(client.site(), &target), &body).await? {
            let metadata: Metadata = serde_json::from_value(value)?;
            self.apply_metadata(metadata)?;
        }
        self.meta_mut().mark_synced();
        Ok(())
    }

    /// Delete the remote resource. The local value stays usable.
    async fn destroy(&self, client: &ApiClient) -> Result<()> {
        self.meta().check_path()?;
        client.delete(&self.url(client.site())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_entity_kind_tags() {
        assert_eq!(EntityKind::from_tag("file"), Some(EntityKind::File));
        assert_eq!(EntityKind::from_tag("folder"), Some(EntityKind::Folder));
        assert_eq!(EntityKind::from_tag("link"), None);
        assert_eq!(EntityKind::Folder.as_str(), "folder");
        assert_eq!(serde_json::to_value(EntityKind::File).unwrap(), json!("file"));
    }

    #[test]
    fn test_from_path_rejects_root() {
        assert!(matches!(EntityMeta::from_path("/"), Err(BcError::RootPath)));
        assert!(matches!(EntityMeta::from_path("  /  "), Err(BcError::RootPath)));
        assert!(matches!(EntityMeta::from_path(""), Err(BcError::RootPath)));
        assert!(matches!(EntityMeta::from_path("   "), Err(BcError::RootPath)));
        assert!(matches!(EntityMeta::from_path("//"), Err(BcError::RootPath)));
    }

    #[test]
    fn test_from_path_resolves_parents() {
        let meta = EntityMeta::from_path(" /my/special/file ").unwrap();
        assert_eq!(meta.name(), "file");
        assert_eq!(meta.path(), "/my/special/file");
        assert_eq!(meta.remote_path(), "/my/special/file");

        let Some(Parent::Folder(special)) = meta.parent() else {
            panic!("expected folder parent");
        };
        assert_eq!(special.path(), "/my/special");
        let Some(Parent::Folder(my)) = special.parent() else {
            panic!("expected folder parent");
        };
        assert_eq!(my.path(), "/my");
        assert_eq!(my.parent(), Some(&Parent::Root));
    }

    #[test]
    fn test_relative_path_is_rooted() {
        let meta = EntityMeta::from_path("hello_world.txt").unwrap();
        assert_eq!(meta.path(), "/hello_world.txt");
        assert_eq!(meta.parent(), Some(&Parent::Root));
    }

    #[test]
    fn test_path_follows_name_and_parent() {
        let mut meta = EntityMeta::from_path("/my/file").unwrap();

        meta.set_name("new-file");
        assert_eq!(meta.path(), "/my/new-file");
        assert_eq!(meta.remote_path(), "/my/file");

        meta.set_parent(Parent::Root);
        assert_eq!(meta.path(), "/new-file");

        meta.set_parent(Folder::new("/other/dir").unwrap().into());
        assert_eq!(meta.path(), "/other/dir/new-file");

        meta.mark_synced();
        assert_eq!(meta.remote_path(), "/other/dir/new-file");
    }

    #[test]
    fn test_validation() {
        let with_name = |name: &str| EntityMeta::from_attributes(EntityAttributes::new(Parent::Root, name));

        assert!(with_name("a.txt").validate().is_ok());
        assert_eq!(
            with_name("").validate(),
            Err(ValidationError::InvalidName(String::new()))
        );
        assert!(matches!(with_name("a&b").validate(), Err(ValidationError::InvalidName(_))));
        assert!(matches!(with_name("a%b").validate(), Err(ValidationError::InvalidName(_))));
    }

    #[test]
    fn test_missing_attributes_fail_validation() {
        let no_parent = EntityMeta::from_attributes(EntityAttributes {
            name: Some("a.txt".to_string()),
            ..Default::default()
        });
        assert_eq!(no_parent.path(), "");
        assert_eq!(
            no_parent.validate(),
            Err(ValidationError::InvalidPath(String::new()))
        );

        let no_name = EntityMeta::from_attributes(EntityAttributes {
            parent: Some(Parent::Root),
            ..Default::default()
        });
        assert!(matches!(no_name.validate(), Err(ValidationError::InvalidName(_))));
    }

    #[test]
    fn test_remote_path_set_by_both_construction_forms() {
        let from_path = EntityMeta::from_path("/a/b").unwrap();
        assert_eq!(from_path.remote_path(), "/a/b");

        let parent = Folder::new("/a").unwrap();
        let from_attrs = EntityMeta::from_attributes(EntityAttributes::new(parent.into(), "b"));
        assert_eq!(from_attrs.remote_path(), "/a/b");

        let orphan = EntityMeta::from_attributes(EntityAttributes::default());
        assert_eq!(orphan.remote_path(), "");
    }

    #[test]
    fn test_content_and_meta_urls() {
        let site = Site::new("https://site.example", "tok");
        assert_eq!(
            content_url(&site, "/a/b"),
            "https://site.example/api/v2/admin/sites/current/storage/a/b"
        );
        assert_eq!(
            meta_url(&site, "/a/b"),
            "https://site.example/api/v2/admin/sites/current/storage/a/b?meta"
        );
        assert_eq!(
            content_url(&site, "/"),
            "https://site.example/api/v2/admin/sites/current/storage/"
        );
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date("2013-06-05T12:34:56Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2013, 6, 5));
        assert_eq!(dt.hour(), 12);

        let offset = parse_date("2013-06-05T12:34:56+02:00").unwrap();
        assert_eq!(offset.hour(), 10);

        let naive = parse_date("2013-06-05T12:34:56.123").unwrap();
        assert_eq!(naive.minute(), 34);

        assert!(matches!(parse_date("yesterday"), Err(BcError::InvalidDate(_))));
    }

    #[test]
    fn test_apply_metadata() {
        let mut meta = EntityMeta::from_path("/a/old").unwrap();
        let metadata: Metadata = serde_json::from_value(json!({
            "name": "new",
            "lastModified": "2020-01-02T03:04:05Z",
            "type": "file"
        }))
        .unwrap();

        meta.apply(&metadata).unwrap();
        assert_eq!(meta.name(), "new");
        assert_eq!(meta.path(), "/a/new");
        assert_eq!(meta.last_modified().map(|d| d.year()), Some(2020));
    }

    #[test]
    fn test_merge_attributes() {
        let base = EntityAttributes::new(Parent::Root, "a");
        let merged = base.merge(EntityAttributes {
            name: Some("b".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.name.as_deref(), Some("b"));
        assert_eq!(merged.parent, Some(Parent::Root));
    }
}
