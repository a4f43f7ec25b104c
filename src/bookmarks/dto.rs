use serde::Deserialize;

use crate::validation::{Field, Rule, Schema};

pub const CREATE_BOOKMARK: Schema = Schema::new(&[
    Field::new("title", &[Rule::Required, Rule::String, Rule::NotEmpty]),
    Field::new("description", &[Rule::Optional, Rule::String]),
    Field::new("link", &[Rule::Required, Rule::String, Rule::NotEmpty]),
]);

pub const EDIT_BOOKMARK: Schema = Schema::new(&[
    Field::new("title", &[Rule::Optional, Rule::String]),
    Field::new("description", &[Rule::Optional, Rule::String]),
    Field::new("link", &[Rule::Optional, Rule::String]),
]);

/// Request body for `POST /bookmarks`. The owner always comes from the token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

/// Request body for `PATCH /bookmarks/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}
