//! Process-local todo collection.
//!
//! # Design
//! Records live in a `Vec` so listing follows insertion order and deletes
//! keep the relative order of the survivors. Ids come from a monotonically
//! increasing counter that is never reused, even after deletes. The store
//! itself is plain data; callers share it behind a single lock (`Db`) so
//! lookup-then-mutate and append-then-increment happen atomically.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tokio::sync::RwLock;

use crate::error::StoreError;

pub type Db = Arc<RwLock<TodoStore>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub status: bool,
    /// Absent on the seed records, which predate any create.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "iso_millis_opt"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "iso_millis_opt"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Field changes requested by an update. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl TodoStore {
    /// A store holding the two records every fresh process starts with.
    pub fn seeded() -> Self {
        let seed = |id, title: &str, status| Todo {
            id,
            title: title.to_string(),
            status,
            created_at: None,
            updated_at: None,
        };
        Self {
            todos: vec![seed(1, "Sample todo", false), seed(2, "Learn DevSecOps", true)],
            next_id: 3,
        }
    }

    pub fn empty() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    pub fn shared(self) -> Db {
        Arc::new(RwLock::new(self))
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.position(id).map(|index| &self.todos[index])
    }

    pub fn create(&mut self, title: &str) -> Result<Todo, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::TitleRequired);
        }
        let todo = Todo {
            id: self.next_id,
            title: title.to_string(),
            status: false,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// The title is validated before anything is written, so a rejected
    /// update leaves the record (including `updatedAt`) exactly as it was.
    /// An empty patch still stamps `updatedAt`.
    pub fn update(&mut self, id: i64, patch: TodoPatch) -> Result<Todo, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound)?;
        let title = match patch.title.as_deref().map(str::trim) {
            Some("") => return Err(StoreError::EmptyTitle),
            other => other.map(str::to_string),
        };

        let todo = &mut self.todos[index];
        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(status) = patch.status {
            todo.status = status;
        }
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }

    pub fn delete(&mut self, id: i64) -> Result<Todo, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound)?;
        Ok(self.todos.remove(index))
    }

    fn position(&self, id: i64) -> Option<usize> {
        let id = u64::try_from(id).ok()?;
        self.todos.iter().position(|todo| todo.id == id)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-16T09:30:00.123Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso_millis_opt<S: Serializer>(
    at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serializer.serialize_str(&format_timestamp(at)),
        None => serializer.serialize_none(),
    }
}
