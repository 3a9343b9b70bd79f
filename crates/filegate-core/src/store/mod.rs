//! Storage abstractions for filegate.
//!
//! The [`MetadataStore`] trait covers API keys and file records; the
//! [`SearchIndex`] trait covers the full-text projection of public files.
//! Both are injected into the pipelines as long-lived shared handles,
//! enabling pluggable backends (SQLite in production, in-memory in tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes. Each
//! write method is expected to be a single atomic statement from the
//! caller's point of view.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ApiKey, FileRecord, Permission, SearchDocument, SearchHit, Visibility};
use crate::page::{Page, PageRequest};

/// Result of [`MetadataStore::insert_file`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// A record for this content identifier already exists.
    Duplicate(FileRecord),
}

/// Relational persistence for API keys and file records.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`find_api_key`](MetadataStore::find_api_key) | Resolve a bearer token |
/// | [`create_api_key`](MetadataStore::create_api_key) | Out-of-band key provisioning |
/// | [`insert_file`](MetadataStore::insert_file) | Record a newly stored object |
/// | [`get_file`](MetadataStore::get_file) | Look up a record by content id |
/// | [`list_public`](MetadataStore::list_public) | Page through public records |
/// | [`list_owned`](MetadataStore::list_owned) | Page through one key's records |
/// | [`set_visibility`](MetadataStore::set_visibility) | Owner-scoped visibility update |
/// | [`public_files`](MetadataStore::public_files) | All public records (index backfill) |
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn find_api_key(&self, token: &str) -> Result<Option<ApiKey>>;

    async fn create_api_key(&self, token: &str, permission: Permission) -> Result<ApiKey>;

    async fn list_api_keys(&self) -> Result<Vec<ApiKey>>;

    async fn insert_file(&self, record: &FileRecord) -> Result<InsertOutcome>;

    async fn get_file(&self, cid: &str) -> Result<Option<FileRecord>>;

    async fn list_public(&self, page: &PageRequest) -> Result<Page<FileRecord>>;

    async fn list_owned(&self, owner: i64, page: &PageRequest) -> Result<Page<FileRecord>>;

    /// Sets the visibility of `cid` if and only if it is owned by `owner`.
    ///
    /// Returns the updated record, or `None` when no record matches both
    /// the content id and the owner.
    async fn set_visibility(
        &self,
        cid: &str,
        owner: i64,
        visibility: Visibility,
    ) -> Result<Option<FileRecord>>;

    async fn public_files(&self) -> Result<Vec<FileRecord>>;
}

/// Full-text index over public file metadata.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document keyed by `doc.cid`.
    async fn index(&self, doc: &SearchDocument) -> Result<()>;

    /// Remove the document for `cid`, if present.
    async fn remove(&self, cid: &str) -> Result<()>;

    /// Query-string search; `total` counts every match, not just the page.
    async fn search(&self, query: &str, page: &PageRequest) -> Result<Page<SearchHit>>;
}
