//! Authorization guard.
//!
//! Resolves an `X-API-Key` token to an [`Identity`] and decides read and
//! write eligibility. Reads of private records by anyone but the owner
//! fail with [`GatewayError::NotFoundOrUnauthorized`], which renders the
//! same as a missing record.

use crate::error::GatewayError;
use crate::models::{FileRecord, Permission};
use crate::store::MetadataStore;

/// The caller behind a resolved API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub api_key_id: i64,
    pub permission: Permission,
}

/// Resolves a bearer token. A missing, blank, or unknown token is
/// [`GatewayError::Unauthorized`].
pub async fn resolve<M>(store: &M, token: Option<&str>) -> Result<Identity, GatewayError>
where
    M: MetadataStore + ?Sized,
{
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(GatewayError::Unauthorized("missing API key".into())),
    };

    let key = store
        .find_api_key(token)
        .await
        .map_err(GatewayError::internal)?
        .ok_or_else(|| GatewayError::Unauthorized("invalid API key".into()))?;

    Ok(Identity {
        api_key_id: key.id,
        permission: key.permission,
    })
}

pub fn can_write(permission: Permission) -> bool {
    permission == Permission::Write
}

/// True iff the record is public or owned by `caller`.
pub fn can_read(record: &FileRecord, caller: Option<i64>) -> bool {
    record.visibility.is_public() || caller == Some(record.owner)
}

/// Gate for write-class operations.
pub fn require_write(identity: &Identity) -> Result<(), GatewayError> {
    if can_write(identity.permission) {
        Ok(())
    } else {
        Err(GatewayError::Forbidden("insufficient permissions".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visibility;
    use crate::store::memory::InMemoryMetadataStore;

    fn record(owner: i64, visibility: Visibility) -> FileRecord {
        FileRecord {
            cid: "cid".into(),
            owner,
            file_name: "a.png".into(),
            mime_type: "image/png".into(),
            file_size: 1,
            visibility,
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_missing_and_unknown_tokens() {
        let store = InMemoryMetadataStore::new();
        store.create_api_key("secret", Permission::Read).await.unwrap();

        assert!(matches!(
            resolve(&store, None).await,
            Err(GatewayError::Unauthorized(_))
        ));
        assert!(matches!(
            resolve(&store, Some("  ")).await,
            Err(GatewayError::Unauthorized(_))
        ));
        assert!(matches!(
            resolve(&store, Some("nope")).await,
            Err(GatewayError::Unauthorized(_))
        ));

        let identity = resolve(&store, Some("secret")).await.unwrap();
        assert_eq!(identity.permission, Permission::Read);
    }

    #[test]
    fn test_can_read_public_or_owner() {
        assert!(can_read(&record(1, Visibility::Public), None));
        assert!(can_read(&record(1, Visibility::Private), Some(1)));
        assert!(!can_read(&record(1, Visibility::Private), Some(2)));
        assert!(!can_read(&record(1, Visibility::Private), None));
    }

    #[test]
    fn test_require_write() {
        let reader = Identity {
            api_key_id: 1,
            permission: Permission::Read,
        };
        assert!(matches!(
            require_write(&reader),
            Err(GatewayError::Forbidden(_))
        ));
        assert!(can_write(Permission::Write));
    }
}
