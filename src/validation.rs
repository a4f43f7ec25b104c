//! Request-body validation driven by explicit schemas.
//!
//! A [`Schema`] maps field names to rule sets. [`validate`] checks a JSON body
//! against it and returns only the fields the schema knows about, so unknown
//! keys (a forged `user_id`, for instance) never reach the services.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present and non-null.
    Required,
    /// Field may be absent or null; remaining rules apply only when present.
    Optional,
    String,
    NotEmpty,
    Email,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

impl Field {
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, rules }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }
}

/// Per-field failures, keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.fields)
    }
}

/// Raw JSON request body. Missing content type and malformed JSON are
/// reported as [`AppError::Validation`] on the `body` field.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate(payload: &Value, schema: &Schema) -> Result<Map<String, Value>, ValidationError> {
    let mut errors = BTreeMap::new();
    let Some(body) = payload.as_object() else {
        errors.insert("body".to_string(), "must be a JSON object".to_string());
        return Err(ValidationError { fields: errors });
    };

    let mut out = Map::new();
    for field in schema.fields {
        let value = body.get(field.name).filter(|v| !v.is_null());
        match check_field(value, field.rules) {
            Ok(()) => {
                if let Some(v) = value {
                    out.insert(field.name.to_string(), v.clone());
                }
            }
            Err(msg) => {
                errors.insert(field.name.to_string(), msg);
            }
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(ValidationError { fields: errors })
    }
}

fn check_field(value: Option<&Value>, rules: &[Rule]) -> Result<(), String> {
    let Some(value) = value else {
        if rules.contains(&Rule::Required) {
            return Err("is required".into());
        }
        return Ok(());
    };

    for rule in rules {
        match rule {
            Rule::Required | Rule::Optional => {}
            Rule::String => {
                if !value.is_string() {
                    return Err("must be a string".into());
                }
            }
            Rule::NotEmpty => {
                if value.as_str().is_some_and(str::is_empty) {
                    return Err("must not be empty".into());
                }
            }
            Rule::Email => {
                // Surrounding whitespace is trimmed before storage.
                if !value.as_str().is_some_and(|s| is_valid_email(s.trim())) {
                    return Err("must be an email".into());
                }
            }
        }
    }
    Ok(())
}

/// Validate `payload` against `schema` and deserialize the whitelisted fields.
pub fn parse<T: DeserializeOwned>(payload: Value, schema: &Schema) -> Result<T, AppError> {
    let fields = validate(&payload, schema)?;
    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        let mut errors = BTreeMap::new();
        errors.insert("body".to_string(), e.to_string());
        AppError::Validation(errors)
    })
}
