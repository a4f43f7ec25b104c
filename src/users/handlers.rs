use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use super::dto::{EditUserRequest, PublicUser, EDIT_USER};
use super::services;
use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    state::AppState,
    validation::{self, JsonBody},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users", patch(edit_user))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = services::me(state.users.as_ref(), user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn edit_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(payload): JsonBody,
) -> Result<Json<PublicUser>, AppError> {
    let patch: EditUserRequest = validation::parse(payload, &EDIT_USER)?;
    let user = services::edit(state.users.as_ref(), user_id, patch).await?;
    Ok(Json(user.into()))
}
