//! In-memory [`MetadataStore`] and [`SearchIndex`] implementations for
//! testing and embedding.
//!
//! Uses `Vec` and `HashMap` behind `std::sync::RwLock` for thread safety.
//! Search is a case-insensitive term match over file name and MIME type,
//! ranked by the number of matching terms.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{ApiKey, FileRecord, Permission, SearchDocument, SearchHit, Visibility};
use crate::page::{paginate, Page, PageRequest};

use super::{InsertOutcome, MetadataStore, SearchIndex};

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

/// In-memory metadata store. Records keep insertion order.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    keys: RwLock<Vec<ApiKey>>,
    files: RwLock<Vec<FileRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of file records currently stored.
    pub fn file_count(&self) -> usize {
        self.files.read().map(|f| f.len()).unwrap_or(0)
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn find_api_key(&self, token: &str) -> Result<Option<ApiKey>> {
        let keys = self.keys.read().map_err(poisoned)?;
        Ok(keys.iter().find(|k| k.token == token).cloned())
    }

    async fn create_api_key(&self, token: &str, permission: Permission) -> Result<ApiKey> {
        let mut keys = self.keys.write().map_err(poisoned)?;
        if keys.iter().any(|k| k.token == token) {
            anyhow::bail!("api key token already exists");
        }
        let key = ApiKey {
            id: keys.len() as i64 + 1,
            token: token.to_string(),
            permission,
        };
        keys.push(key.clone());
        Ok(key)
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        Ok(self.keys.read().map_err(poisoned)?.clone())
    }

    async fn insert_file(&self, record: &FileRecord) -> Result<InsertOutcome> {
        let mut files = self.files.write().map_err(poisoned)?;
        if let Some(existing) = files.iter().find(|f| f.cid == record.cid) {
            return Ok(InsertOutcome::Duplicate(existing.clone()));
        }
        files.push(record.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn get_file(&self, cid: &str) -> Result<Option<FileRecord>> {
        let files = self.files.read().map_err(poisoned)?;
        Ok(files.iter().find(|f| f.cid == cid).cloned())
    }

    async fn list_public(&self, page: &PageRequest) -> Result<Page<FileRecord>> {
        let files = self.files.read().map_err(poisoned)?;
        let public: Vec<FileRecord> = files
            .iter()
            .filter(|f| f.visibility.is_public())
            .cloned()
            .collect();
        Ok(paginate(&public, page))
    }

    async fn list_owned(&self, owner: i64, page: &PageRequest) -> Result<Page<FileRecord>> {
        let files = self.files.read().map_err(poisoned)?;
        let owned: Vec<FileRecord> = files.iter().filter(|f| f.owner == owner).cloned().collect();
        Ok(paginate(&owned, page))
    }

    async fn set_visibility(
        &self,
        cid: &str,
        owner: i64,
        visibility: Visibility,
    ) -> Result<Option<FileRecord>> {
        let mut files = self.files.write().map_err(poisoned)?;
        Ok(files
            .iter_mut()
            .find(|f| f.cid == cid && f.owner == owner)
            .map(|f| {
                f.visibility = visibility;
                f.clone()
            }))
    }

    async fn public_files(&self) -> Result<Vec<FileRecord>> {
        let files = self.files.read().map_err(poisoned)?;
        Ok(files
            .iter()
            .filter(|f| f.visibility.is_public())
            .cloned()
            .collect())
    }
}

/// In-memory search index keyed by content identifier.
#[derive(Default)]
pub struct InMemorySearchIndex {
    docs: RwLock<HashMap<String, SearchDocument>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cid: &str) -> bool {
        self.docs
            .read()
            .map(|d| d.contains_key(cid))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index(&self, doc: &SearchDocument) -> Result<()> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        docs.insert(doc.cid.clone(), doc.clone());
        Ok(())
    }

    async fn remove(&self, cid: &str) -> Result<()> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        docs.remove(cid);
        Ok(())
    }

    async fn search(&self, query: &str, page: &PageRequest) -> Result<Page<SearchHit>> {
        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower.split_whitespace().collect();
        if terms.is_empty() {
            return Ok(Page::empty());
        }

        let docs = self.docs.read().map_err(poisoned)?;
        let mut scored: Vec<(usize, SearchHit)> = docs
            .values()
            .filter_map(|doc| {
                let haystack = format!("{} {}", doc.file_name, doc.mime_type).to_lowercase();
                let matches = terms.iter().filter(|t| haystack.contains(*t)).count();
                (matches > 0).then(|| {
                    (
                        matches,
                        SearchHit {
                            cid: doc.cid.clone(),
                            file_name: doc.file_name.clone(),
                            mime_type: doc.mime_type.clone(),
                        },
                    )
                })
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cid.cmp(&b.1.cid)));

        let hits: Vec<SearchHit> = scored.into_iter().map(|(_, hit)| hit).collect();
        Ok(paginate(&hits, page))
    }
}
