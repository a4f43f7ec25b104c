use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::User;
use crate::validation::{Field, Rule, Schema};

pub const EDIT_USER: Schema = Schema::new(&[
    Field::new("email", &[Rule::Optional, Rule::String, Rule::Email]),
    Field::new("first_name", &[Rule::Optional, Rule::String]),
    Field::new("last_name", &[Rule::Optional, Rule::String]),
]);

/// Request body for `PATCH /users`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
