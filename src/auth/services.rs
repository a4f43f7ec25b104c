use tracing::{info, warn};

use super::dto::{AuthResponse, CredentialsRequest};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use crate::{
    error::AppError,
    users::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

fn issue_tokens(keys: &JwtKeys, user: User) -> Result<AuthResponse, AppError> {
    let access_token = keys.sign_access(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    })
}

pub async fn signup(
    store: &dyn UserStore,
    keys: &JwtKeys,
    creds: CredentialsRequest,
) -> Result<AuthResponse, AppError> {
    let email = creds.email.trim().to_lowercase();

    // Ensure email is not taken
    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&creds.password)?;
    let user = store.create(NewUser { email, password_hash }).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    issue_tokens(keys, user)
}

pub async fn signin(
    store: &dyn UserStore,
    keys: &JwtKeys,
    creds: CredentialsRequest,
) -> Result<AuthResponse, AppError> {
    let email = creds.email.trim().to_lowercase();

    let Some(user) = store.find_by_email(&email).await? else {
        warn!(email = %email, "signin unknown email");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "signin invalid password");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    info!(user_id = %user.id, email = %user.email, "user signed in");
    issue_tokens(keys, user)
}

pub async fn refresh(
    store: &dyn UserStore,
    keys: &JwtKeys,
    refresh_token: &str,
) -> Result<AuthResponse, AppError> {
    let claims = keys.verify_refresh(refresh_token).map_err(|e| {
        warn!(error = %e, "rejected refresh token");
        AppError::unauthorized("Invalid or expired refresh token")
    })?;

    let user = store
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    issue_tokens(keys, user)
}
