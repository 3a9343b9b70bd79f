//! Core data models used throughout filegate.
//!
//! These types describe the API keys, file records, and search documents
//! that flow between the ingestion and retrieval pipelines and the stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability level carried by an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Permission::Read),
            "write" => Ok(Permission::Write),
            other => anyhow::bail!("unknown permission level: '{}'. Must be read or write.", other),
        }
    }
}

/// Whether a file is world-readable (and indexed) or owner-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_private_flag(is_private: bool) -> Self {
        if is_private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// The opposite visibility, as applied by the toggle operation.
    pub fn flipped(&self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }
}

/// An API key row. The token is the bearer secret sent in `X-API-Key`.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub id: i64,
    pub token: String,
    pub permission: Permission,
}

/// Metadata for one object-store entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Content identifier returned by the object store.
    pub cid: String,
    /// Id of the owning [`ApiKey`].
    pub owner: i64,
    pub file_name: String,
    pub mime_type: String,
    /// Size in bytes of the staged upload.
    pub file_size: i64,
    pub visibility: Visibility,
    /// Unix timestamp (seconds).
    pub created_at: i64,
}

/// Denormalized projection of a public [`FileRecord`] held by the search index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    pub cid: String,
    pub file_name: String,
    pub mime_type: String,
    pub visibility: Visibility,
}

impl SearchDocument {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            cid: record.cid.clone(),
            file_name: record.file_name.clone(),
            mime_type: record.mime_type.clone(),
            visibility: record.visibility,
        }
    }
}

/// A single search result, matching the `/search-public-files` item shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub cid: String,
    pub file_name: String,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_round_trips_through_text() {
        assert_eq!("write".parse::<Permission>().unwrap(), Permission::Write);
        assert_eq!(Permission::Read.to_string(), "read");
        assert!("admin".parse::<Permission>().is_err());
    }

    #[test]
    fn test_visibility_flip() {
        assert_eq!(Visibility::Public.flipped(), Visibility::Private);
        assert_eq!(Visibility::from_private_flag(false), Visibility::Public);
        assert!(Visibility::Private.is_private());
    }
}
