use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CreateBookmarkRequest, EditBookmarkRequest, CREATE_BOOKMARK, EDIT_BOOKMARK};
use super::repo_types::Bookmark;
use super::services;
use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    state::AppState,
    validation::{self, JsonBody},
};

pub fn bookmark_routes() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/:id",
            get(get_bookmark).patch(edit_bookmark).delete(delete_bookmark),
        )
}

#[instrument(skip(state))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    let rows = services::list(state.bookmarks.as_ref(), user_id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Bookmark>, AppError> {
    let bookmark = services::get_by_id(state.bookmarks.as_ref(), user_id, id).await?;
    Ok(Json(bookmark))
}

#[instrument(skip(state, payload))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    let body: CreateBookmarkRequest = validation::parse(payload, &CREATE_BOOKMARK)?;
    let bookmark = services::create(state.bookmarks.as_ref(), user_id, body).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[instrument(skip(state, payload))]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Bookmark>, AppError> {
    let patch: EditBookmarkRequest = validation::parse(payload, &EDIT_BOOKMARK)?;
    let bookmark = services::update(state.bookmarks.as_ref(), user_id, id, patch).await?;
    Ok(Json(bookmark))
}

#[instrument(skip(state))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete(state.bookmarks.as_ref(), user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
