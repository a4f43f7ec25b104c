//! In-memory stores for tests. Counts every call so tests can assert that a
//! request never reached persistence.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::StoreError;
use crate::bookmarks::{
    dto::{CreateBookmarkRequest, EditBookmarkRequest},
    repo::BookmarkStore,
    repo_types::Bookmark,
};
use crate::users::{
    dto::EditUserRequest,
    repo::UserStore,
    repo_types::{NewUser, User},
};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    bookmarks: Mutex<Vec<Bookmark>>,
    hits: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.touch();
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.touch();
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::EmailTaken);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: &EditUserRequest) -> Result<Option<User>, StoreError> {
        self.touch();
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &patch.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::EmailTaken);
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.email {
            user.email = v.clone();
        }
        if let Some(v) = &patch.first_name {
            user.first_name = Some(v.clone());
        }
        if let Some(v) = &patch.last_name {
            user.last_name = Some(v.clone());
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Bookmark>, StoreError> {
        self.touch();
        let bookmarks = self.bookmarks.lock().unwrap();
        let mut rows: Vec<Bookmark> = bookmarks
            .iter()
            .filter(|b| b.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<Option<Bookmark>, StoreError> {
        self.touch();
        let bookmarks = self.bookmarks.lock().unwrap();
        Ok(bookmarks
            .iter()
            .find(|b| b.id == id && b.user_id == owner)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bookmark>, StoreError> {
        self.touch();
        let bookmarks = self.bookmarks.lock().unwrap();
        Ok(bookmarks.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, owner: Uuid, new: &CreateBookmarkRequest) -> Result<Bookmark, StoreError> {
        self.touch();
        let now = OffsetDateTime::now_utc();
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            user_id: owner,
            title: new.title.clone(),
            description: new.description.clone(),
            link: new.link.clone(),
            created_at: now,
            updated_at: now,
        };
        self.bookmarks.lock().unwrap().push(bookmark.clone());
        Ok(bookmark)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: &EditBookmarkRequest,
    ) -> Result<Option<Bookmark>, StoreError> {
        self.touch();
        let mut bookmarks = self.bookmarks.lock().unwrap();
        let Some(b) = bookmarks
            .iter_mut()
            .find(|b| b.id == id && b.user_id == owner)
        else {
            return Ok(None);
        };
        if let Some(v) = &patch.title {
            b.title = v.clone();
        }
        if let Some(v) = &patch.description {
            b.description = Some(v.clone());
        }
        if let Some(v) = &patch.link {
            b.link = v.clone();
        }
        b.updated_at = OffsetDateTime::now_utc();
        Ok(Some(b.clone()))
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.touch();
        let mut bookmarks = self.bookmarks.lock().unwrap();
        let before = bookmarks.len();
        bookmarks.retain(|b| !(b.id == id && b.user_id == owner));
        Ok(bookmarks.len() < before)
    }
}
