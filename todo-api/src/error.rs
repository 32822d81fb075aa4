//! Error types for the todo service.
//!
//! `StoreError` is what the in-memory store reports; its `Display` strings are
//! the exact messages clients see. `ApiError` is the request-boundary error:
//! every handler returns it and it renders the `{success: false, error}`
//! envelope with the matching status code.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejections produced by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Todo not found")]
    NotFound,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Route not found")]
    RouteNotFound,

    /// The cause is logged server-side and never sent to the caller.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::TitleRequired | StoreError::EmptyTitle => ApiError::BadRequest(e.to_string()),
            StoreError::NotFound => ApiError::NotFound(e.to_string()),
        }
    }
}

/// An undecodable path segment never reaches a handler's lookup.
impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::Internal(format!("invalid path parameter: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = %cause, "request failed");
        }
        let body = json!({ "success": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_statuses() {
        assert_eq!(ApiError::from(StoreError::TitleRequired).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(StoreError::EmptyTitle).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(StoreError::NotFound).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_error_messages_pass_through() {
        assert_eq!(ApiError::from(StoreError::TitleRequired).to_string(), "Title is required");
        assert_eq!(ApiError::from(StoreError::EmptyTitle).to_string(), "Title cannot be empty");
        assert_eq!(ApiError::from(StoreError::NotFound).to_string(), "Todo not found");
    }

    #[test]
    fn internal_error_hides_cause() {
        let err = ApiError::Internal("lock poisoned at store.rs:42".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn route_not_found_is_404() {
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.to_string(), "Route not found");
    }
}
