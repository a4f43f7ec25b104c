use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateBookmarkRequest, EditBookmarkRequest};
use super::repo_types::Bookmark;
use crate::store::StoreError;

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks of `owner`, newest first. Filtered in the query itself.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Bookmark>, StoreError>;
    /// Lookup by id AND owner in one query.
    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Bookmark>, StoreError>;
    /// Lookup by id alone, for the ownership check before a mutation.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bookmark>, StoreError>;
    async fn insert(&self, owner: Uuid, new: &CreateBookmarkRequest) -> Result<Bookmark, StoreError>;
    /// Conditional update; `None` when no row with this id and owner exists.
    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: &EditBookmarkRequest,
    ) -> Result<Option<Bookmark>, StoreError>;
    /// Conditional delete; `false` when no row with this id and owner exists.
    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgBookmarkStore {
    db: PgPool,
}

impl PgBookmarkStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at, updated_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at, updated_at
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at, updated_at
            FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn insert(&self, owner: Uuid, new: &CreateBookmarkRequest) -> Result<Bookmark, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (id, user_id, title, description, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, link, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(&new.link)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: &EditBookmarkRequest,
    ) -> Result<Option<Bookmark>, StoreError> {
        let row = sqlx::query_as::<_, Bookmark>(
            r#"
            UPDATE bookmarks
               SET title       = COALESCE($3, title),
                   description = COALESCE($4, description),
                   link        = COALESCE($5, link),
                   updated_at  = now()
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, link, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.link.as_deref())
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let done = sqlx::query(r#"DELETE FROM bookmarks WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
