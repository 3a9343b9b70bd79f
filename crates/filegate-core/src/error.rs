//! Error taxonomy shared by the ingestion, retrieval, and catalog pipelines.
//!
//! Every variant is terminal for the request that produced it. The HTTP
//! layer maps each variant to exactly one status code; see
//! `filegate::server`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or unknown API key.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Known API key without the permission level the operation requires.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// No file record exists for the requested content identifier.
    #[error("file not found or access denied")]
    NotFound,

    /// A file record exists but the caller may not see it. Renders exactly
    /// like [`GatewayError::NotFound`].
    #[error("file not found or access denied")]
    NotFoundOrUnauthorized,

    #[error("invalid request: {0}")]
    ValidationFailed(String),

    #[error("requested file is not {expected} (found {actual})")]
    WrongMediaType { expected: String, actual: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("content store is not available")]
    BackendUnavailable,

    #[error("failed to retrieve {cid} after {attempts} attempts: {cause}")]
    RetrievalFailed {
        cid: String,
        attempts: u32,
        cause: String,
    },

    #[error("failed to upload to content store: {0}")]
    UploadFailed(String),

    #[error("file stored but search indexing failed: {0}")]
    IndexingFailed(String),

    #[error("content store returned empty content for {0}")]
    EmptyContent(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Stable machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            // Both render as "not_found" so private files stay invisible.
            Self::NotFound | Self::NotFoundOrUnauthorized => "not_found",
            Self::ValidationFailed(_) => "bad_request",
            Self::WrongMediaType { .. } => "wrong_media_type",
            Self::Conflict(_) => "conflict",
            Self::BackendUnavailable => "backend_unavailable",
            Self::RetrievalFailed { .. } => "retrieval_failed",
            Self::UploadFailed(_) => "upload_failed",
            Self::IndexingFailed(_) => "indexing_failed",
            Self::EmptyContent(_) => "empty_content",
            Self::Internal(_) => "internal",
        }
    }

    /// Wraps a store or I/O failure as [`GatewayError::Internal`].
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_are_indistinguishable() {
        let absent = GatewayError::NotFound;
        let hidden = GatewayError::NotFoundOrUnauthorized;
        assert_eq!(absent.code(), hidden.code());
        assert_eq!(absent.to_string(), hidden.to_string());
    }

    #[test]
    fn test_retrieval_failed_message_names_attempts() {
        let err = GatewayError::RetrievalFailed {
            cid: "QmAbc".into(),
            attempts: 3,
            cause: "connection refused".into(),
        };
        assert!(err.to_string().contains("after 3 attempts"));
    }
}
