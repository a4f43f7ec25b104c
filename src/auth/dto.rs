use serde::{Deserialize, Serialize};

use crate::users::dto::PublicUser;
use crate::validation::{Field, Rule, Schema};

pub const CREDENTIALS: Schema = Schema::new(&[
    Field::new("email", &[Rule::Required, Rule::String, Rule::NotEmpty, Rule::Email]),
    Field::new("password", &[Rule::Required, Rule::String, Rule::NotEmpty]),
]);

pub const REFRESH: Schema = Schema::new(&[Field::new(
    "refresh_token",
    &[Rule::Required, Rule::String, Rule::NotEmpty],
)]);

/// Request body for signup and signin.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after signup, signin or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}
