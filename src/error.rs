use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by handlers and services, rendered as JSON responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    Unauthorized(String),

    /// Identifier-addressed mutation on a resource that is absent or owned by
    /// someone else. The two cases are deliberately indistinguishable.
    #[error("Access to resource denied")]
    AccessDenied,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::AccessDenied => "ACCESS_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::EmailTaken => AppError::conflict("Email already registered"),
            crate::store::StoreError::Database(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("body".to_string(), rejection.body_text());
        AppError::Validation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Validation(fields) => json!({
                "error": self.error_code(),
                "message": self.to_string(),
                "fields": fields,
            }),
            AppError::Internal(e) => {
                // Don't expose internal failures to clients
                tracing::error!(error = %e, "internal error");
                json!({
                    "error": self.error_code(),
                    "message": "Internal server error",
                })
            }
            _ => json!({
                "error": self.error_code(),
                "message": self.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
