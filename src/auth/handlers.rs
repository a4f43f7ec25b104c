use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{AuthResponse, CredentialsRequest, RefreshRequest, CREDENTIALS, REFRESH};
use super::jwt::JwtKeys;
use super::services;
use crate::{
    error::AppError,
    state::AppState,
    validation::{self, JsonBody},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/refresh", post(refresh))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let creds: CredentialsRequest = validation::parse(payload, &CREDENTIALS)?;
    let keys = JwtKeys::from_ref(&state);
    let res = services::signup(state.users.as_ref(), &keys, creds).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<Json<AuthResponse>, AppError> {
    let creds: CredentialsRequest = validation::parse(payload, &CREDENTIALS)?;
    let keys = JwtKeys::from_ref(&state);
    let res = services::signin(state.users.as_ref(), &keys, creds).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<Json<AuthResponse>, AppError> {
    let body: RefreshRequest = validation::parse(payload, &REFRESH)?;
    let keys = JwtKeys::from_ref(&state);
    let res = services::refresh(state.users.as_ref(), &keys, &body.refresh_token).await?;
    Ok(Json(res))
}
