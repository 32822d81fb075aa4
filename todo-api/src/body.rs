//! Lenient JSON request bodies.
//!
//! Clients are not required to send a body or a JSON content type: anything
//! that is not a JSON request reads as an object with no fields, so a missing
//! `title` is reported as a validation error instead of a parse failure. A
//! request that claims to be JSON but does not parse, or whose top level is a
//! bare scalar, is a server fault. Arrays parse but carry no fields.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::{Map, Value};

use crate::error::{ApiError, StoreError};
use crate::store::TodoPatch;

/// The top-level fields of a request body. A JSON array has no fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsonBody(pub Map<String, Value>);

impl JsonBody {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Title for a new record. Anything other than a JSON string is absent.
    pub fn create_title(&self) -> Result<&str, StoreError> {
        self.field("title")
            .and_then(Value::as_str)
            .ok_or(StoreError::TitleRequired)
    }

    /// Field changes for an update. A present but non-string `title` can
    /// never become a valid title and is rejected like a blank one.
    pub fn todo_patch(&self) -> Result<TodoPatch, StoreError> {
        let title = match self.field("title") {
            None => None,
            Some(Value::String(title)) => Some(title.clone()),
            Some(_) => return Err(StoreError::EmptyTitle),
        };
        Ok(TodoPatch {
            title,
            status: self.field("status").map(truthy),
        })
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read request body: {e}")))?;

        if !is_json || bytes.is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(Value::Array(_)) => Ok(Self::default()),
            Ok(other) => Err(ApiError::Internal(format!(
                "JSON body must be an object or array, got {other}"
            ))),
            Err(e) => Err(ApiError::Internal(format!("malformed JSON body: {e}"))),
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
}

/// JavaScript-style truthiness: `false`, `null`, zero and `""` are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
