use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{CreateBookmarkRequest, EditBookmarkRequest};
use super::repo::BookmarkStore;
use super::repo_types::Bookmark;
use crate::{error::AppError, guard::ensure_owner};

pub async fn list(store: &dyn BookmarkStore, owner: Uuid) -> Result<Vec<Bookmark>, AppError> {
    let rows = store.list_by_owner(owner).await?;
    debug!(%owner, count = rows.len(), "bookmarks listed");
    Ok(rows)
}

/// Foreign and unknown ids both come back as `NotFound`.
pub async fn get_by_id(store: &dyn BookmarkStore, owner: Uuid, id: Uuid) -> Result<Bookmark, AppError> {
    store
        .find_owned(owner, id)
        .await?
        .ok_or_else(|| AppError::not_found("Bookmark not found"))
}

pub async fn create(
    store: &dyn BookmarkStore,
    owner: Uuid,
    payload: CreateBookmarkRequest,
) -> Result<Bookmark, AppError> {
    let bookmark = store.insert(owner, &payload).await?;
    info!(%owner, bookmark_id = %bookmark.id, "bookmark created");
    Ok(bookmark)
}

pub async fn update(
    store: &dyn BookmarkStore,
    owner: Uuid,
    id: Uuid,
    patch: EditBookmarkRequest,
) -> Result<Bookmark, AppError> {
    ensure_owner(store.find_by_id(id).await?, owner)?;

    // The write is conditional on the owner too, so a racing change between
    // check and act still cannot touch a foreign row.
    let bookmark = store
        .update_owned(owner, id, &patch)
        .await?
        .ok_or(AppError::AccessDenied)?;
    info!(%owner, bookmark_id = %id, "bookmark updated");
    Ok(bookmark)
}

pub async fn delete(store: &dyn BookmarkStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    ensure_owner(store.find_by_id(id).await?, owner)?;

    if !store.delete_owned(owner, id).await? {
        return Err(AppError::AccessDenied);
    }
    info!(%owner, bookmark_id = %id, "bookmark deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{memory::MemoryStore, StoreError};

    fn new_bookmark(title: &str) -> CreateBookmarkRequest {
        CreateBookmarkRequest {
            title: title.into(),
            description: Some("bookmark description".into()),
            link: "http://link.com".into(),
        }
    }

    #[tokio::test]
    async fn other_user_cannot_update_or_delete() {
        let store = MemoryStore::new();
        let (alice, mallory) = (Uuid::new_v4(), Uuid::new_v4());
        let b = create(&store, alice, new_bookmark("mine")).await.unwrap();

        let patch = EditBookmarkRequest {
            title: Some("pwned".into()),
            ..Default::default()
        };
        let err = update(&store, mallory, b.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));

        let err = delete(&store, mallory, b.id).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));

        let stored = get_by_id(&store, alice, b.id).await.unwrap();
        assert_eq!(stored.title, "mine");
        assert_eq!(stored.updated_at, b.updated_at);
    }

    #[tokio::test]
    async fn missing_id_is_denied_like_foreign_id() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let err = update(&store, owner, Uuid::new_v4(), EditBookmarkRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));
        let err = delete(&store, owner, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));
    }

    #[tokio::test]
    async fn owner_update_changes_only_present_fields() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let b = create(&store, owner, new_bookmark("before")).await.unwrap();

        let patch = EditBookmarkRequest {
            title: Some("after".into()),
            ..Default::default()
        };
        let edited = update(&store, owner, b.id, patch).await.unwrap();
        assert_eq!(edited.id, b.id);
        assert_eq!(edited.title, "after");
        assert_eq!(edited.link, b.link);
        assert_eq!(edited.description, b.description);
        assert_eq!(edited.user_id, owner);
        assert_eq!(edited.created_at, b.created_at);
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        for i in 0..3 {
            create(&store, bob, new_bookmark(&format!("bob-{i}"))).await.unwrap();
        }
        let a = create(&store, alice, new_bookmark("alice")).await.unwrap();

        let rows = list(&store, alice).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, a.id);
        assert!(list(&store, bob).await.unwrap().iter().all(|b| b.user_id == bob));
        assert!(list(&store, Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_hides_foreign_bookmarks() {
        let store = MemoryStore::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let b = create(&store, alice, new_bookmark("alice")).await.unwrap();

        let err = get_by_id(&store, bob, b.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = get_by_id(&store, bob, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_stamps_requester_as_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let b = create(&store, owner, new_bookmark("x")).await.unwrap();
        assert_eq!(b.user_id, owner);
    }

    /// Row passes the ownership check, then disappears before the write.
    struct VanishingStore {
        row: Bookmark,
    }

    #[async_trait::async_trait]
    impl BookmarkStore for VanishingStore {
        async fn list_by_owner(&self, _owner: Uuid) -> Result<Vec<Bookmark>, StoreError> {
            Ok(Vec::new())
        }
        async fn find_owned(&self, _owner: Uuid, _id: Uuid) -> Result<Option<Bookmark>, StoreError> {
            Ok(None)
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Bookmark>, StoreError> {
            Ok(Some(self.row.clone()))
        }
        async fn insert(&self, _owner: Uuid, _new: &CreateBookmarkRequest) -> Result<Bookmark, StoreError> {
            Ok(self.row.clone())
        }
        async fn update_owned(
            &self,
            _owner: Uuid,
            _id: Uuid,
            _patch: &EditBookmarkRequest,
        ) -> Result<Option<Bookmark>, StoreError> {
            Ok(None)
        }
        async fn delete_owned(&self, _owner: Uuid, _id: Uuid) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn conditional_write_missing_row_is_denied() {
        let owner = Uuid::new_v4();
        let now = time::OffsetDateTime::now_utc();
        let store = VanishingStore {
            row: Bookmark {
                id: Uuid::new_v4(),
                user_id: owner,
                title: "t".into(),
                description: None,
                link: "http://x.io".into(),
                created_at: now,
                updated_at: now,
            },
        };
        let id = store.row.id;

        let err = update(&store, owner, id, EditBookmarkRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));

        let err = delete(&store, owner, id).await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied));
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let b = create(&store, owner, new_bookmark("x")).await.unwrap();
        delete(&store, owner, b.id).await.unwrap();
        assert!(list(&store, owner).await.unwrap().is_empty());
    }
}
