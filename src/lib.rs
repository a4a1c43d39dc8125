//! # bcapi
//!
//! Rust client library for a site's file storage over the admin REST API.
//!
//! ## Features
//!
//! - **Path model**: files and folders are addressed by `/`-rooted paths; the
//!   parent folder and name are derived from the path and the path is kept in
//!   sync whenever the name or parent changes.
//! - **Files**: upload (create or replace), download, and metadata fetch.
//! - **Folders**: create, list (contents are parsed into typed files and
//!   folders), rename and delete.
//! - **Root**: a single read-only [`Root`] folder at `/` that can be listed.
//! - **Pluggable transport**: requests go through the [`Transport`] trait;
//!   [`HttpClient`] is the reqwest-backed default.
//!
//! Constructing a [`File`] or [`Folder`] does not touch the server. A file
//! exists remotely once uploaded, a folder once created.
//!
//! ## Example
//!
//! ```no_run
//! use bcapi::{ApiClient, Entity, Folder, Resource, Root, Site};
//!
//! # async fn example() -> bcapi::Result<()> {
//! let client = ApiClient::new(Site::from_env()?);
//!
//! // Create a folder and put a file in it
//! let folder = Folder::new("/my-folder")?;
//! folder.create(&client).await?;
//! let mut file = folder.file("hello_world.txt");
//! file.upload_and_fetch(&client, "Hello World !").await?;
//! println!("{} updated at {:?}", file.path(), file.last_modified());
//!
//! // List the top level
//! for entry in Root::get().fetch(&client).await? {
//!     println!("{:?} {}", entry.kind(), entry.path());
//! }
//!
//! // Rename
//! file.set_name("renamed.txt");
//! file.save(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;

// Re-export commonly used types
pub use api::{ApiClient, ApiErrorCode};
pub use config::Site;
pub use error::{BcError, Result, ValidationError};
pub use fs::{
    Entity, EntityAttributes, EntityKind, Entry, File, Folder, Parent, Resource, Root, root,
};
pub use http::{HttpClient, Request, Response, Transport};
