use tracing::info;
use uuid::Uuid;

use super::dto::EditUserRequest;
use super::repo::UserStore;
use super::repo_types::User;
use crate::{error::AppError, guard::ensure_owner};

/// Load the authenticated user's own record.
pub async fn me(store: &dyn UserStore, user_id: Uuid) -> Result<User, AppError> {
    store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))
}

/// Apply a self-service edit. Only the fields present in `patch` change.
pub async fn edit(
    store: &dyn UserStore,
    user_id: Uuid,
    mut patch: EditUserRequest,
) -> Result<User, AppError> {
    let current = ensure_owner(store.find_by_id(user_id).await?, user_id)?;

    if let Some(email) = patch.email.as_mut() {
        *email = email.trim().to_lowercase();
        if *email != current.email {
            if let Some(other) = store.find_by_email(email).await? {
                if other.id != user_id {
                    return Err(AppError::conflict("Email already registered"));
                }
            }
        }
    }

    let user = store
        .update(user_id, &patch)
        .await?
        .ok_or(AppError::AccessDenied)?;
    info!(user_id = %user.id, "user updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::users::repo_types::NewUser;

    async fn seed(store: &MemoryStore, email: &str) -> User {
        store
            .create(NewUser {
                email: email.into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn me_returns_own_record() {
        let store = MemoryStore::new();
        let user = seed(&store, "me@example.com").await;
        let found = me(&store, user.id).await.unwrap();
        assert_eq!(found.email, "me@example.com");
    }

    #[tokio::test]
    async fn me_for_unknown_id_is_unauthorized() {
        let store = MemoryStore::new();
        let err = me(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn edit_applies_only_present_fields() {
        let store = MemoryStore::new();
        let user = seed(&store, "old@example.com").await;

        let patch = EditUserRequest {
            first_name: Some("Henrique".into()),
            ..Default::default()
        };
        let edited = edit(&store, user.id, patch).await.unwrap();
        assert_eq!(edited.first_name.as_deref(), Some("Henrique"));
        assert_eq!(edited.email, "old@example.com");
        assert_eq!(edited.last_name, None);

        let patch = EditUserRequest {
            email: Some("  New@Example.com ".into()),
            ..Default::default()
        };
        let edited = edit(&store, user.id, patch).await.unwrap();
        assert_eq!(edited.email, "new@example.com");
        assert_eq!(edited.first_name.as_deref(), Some("Henrique"));
    }

    #[tokio::test]
    async fn edit_rejects_email_of_another_account() {
        let store = MemoryStore::new();
        let _taken = seed(&store, "taken@example.com").await;
        let user = seed(&store, "mine@example.com").await;

        let patch = EditUserRequest {
            email: Some("taken@example.com".into()),
            ..Default::default()
        };
        let err = edit(&store, user.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(me(&store, user.id).await.unwrap().email, "mine@example.com");
    }

    #[tokio::test]
    async fn edit_of_missing_user_is_denied() {
        let store = MemoryStore::new();
        let err = edit(&store, Uuid::new_v4(), EditUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));
    }
}
