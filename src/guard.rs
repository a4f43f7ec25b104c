//! Ownership check shared by every identifier-addressed mutation.
//!
//! The resource is fetched by id alone, then [`ensure_owner`] rejects it when it
//! is absent or belongs to someone else. Both cases yield
//! [`AppError::AccessDenied`] so callers cannot probe for other users' ids.

use uuid::Uuid;

use crate::error::AppError;

/// A resource stamped with an immutable owner at creation.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

pub fn ensure_owner<T: Owned>(resource: Option<T>, requester: Uuid) -> Result<T, AppError> {
    match resource {
        Some(r) if r.owner_id() == requester => Ok(r),
        Some(r) => {
            tracing::warn!(%requester, owner = %r.owner_id(), "ownership check failed");
            Err(AppError::AccessDenied)
        }
        None => {
            tracing::warn!(%requester, "ownership check on missing resource");
            Err(AppError::AccessDenied)
        }
    }
}
