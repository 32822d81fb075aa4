use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::body::JsonBody;
use crate::error::{ApiError, StoreError};
use crate::store::{Db, Todo};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Todo,
}

impl TodoResponse {
    fn new(message: &'static str, data: Todo) -> Json<Self> {
        Json(Self {
            success: true,
            message,
            data,
        })
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "ToDo API running...",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /todos": "Fetch all todos",
            "POST /todos": "Add a new todo",
            "PUT /todos/:id": "Update a todo",
            "DELETE /todos/:id": "Delete a todo"
        }
    }))
}

pub async fn list_todos(State(db): State<Db>) -> Json<ListResponse> {
    let store = db.read().await;
    Json(ListResponse {
        success: true,
        count: store.len(),
        data: store.list().to_vec(),
    })
}

pub async fn create_todo(
    State(db): State<Db>,
    body: JsonBody,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let title = body.create_title()?;
    let todo = db.write().await.create(title)?;
    tracing::debug!(id = todo.id, "todo created");
    Ok((
        StatusCode::CREATED,
        TodoResponse::new("Todo created successfully", todo),
    ))
}

pub async fn update_todo(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id).ok_or(StoreError::NotFound)?;
    let mut store = db.write().await;
    if store.get(id).is_none() {
        return Err(StoreError::NotFound.into());
    }
    let todo = store.update(id, body.todo_patch()?)?;
    tracing::debug!(id = todo.id, "todo updated");
    Ok(TodoResponse::new("Todo updated successfully", todo))
}

pub async fn delete_todo(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(raw_id) = path?;
    let id = parse_id(&raw_id).ok_or(StoreError::NotFound)?;
    let todo = db.write().await.delete(id)?;
    tracing::debug!(id = todo.id, "todo deleted");
    Ok(TodoResponse::new("Todo deleted successfully", todo))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Reads a path id the way `parseInt` does: leading whitespace and a sign are
/// allowed, trailing garbage after the digits is ignored. Values that do not
/// fit in an `i64` can never name a record and parse as `None`.
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_plain_integers() {
        assert_eq!(parse_id("3"), Some(3));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("-4"), Some(-4));
        assert_eq!(parse_id("+5"), Some(5));
    }

    #[test]
    fn parse_id_ignores_trailing_garbage() {
        assert_eq!(parse_id("3abc"), Some(3));
        assert_eq!(parse_id("2.9"), Some(2));
        assert_eq!(parse_id(" 12 "), Some(12));
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id("99999999999999999999999"), None);
    }

    #[test]
    fn todo_response_envelope_shape() {
        let mut store = crate::store::TodoStore::empty();
        let todo = store.create("Test").unwrap();
        let Json(response) = TodoResponse::new("Todo created successfully", todo);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Todo created successfully");
        assert_eq!(json["data"]["title"], "Test");
    }
}
