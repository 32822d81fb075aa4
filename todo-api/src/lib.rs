//! JSON-over-HTTP todo service backed by a process-local collection.
//!
//! `app()` builds the router with the seed data every fresh process starts
//! with; `app_with_store` lets callers supply their own store.

use std::{any::Any, future::Future};

use axum::{
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

pub use config::{Config, ConfigError, LogFormat};
pub use error::{ApiError, StoreError};
pub use store::{Db, Todo, TodoPatch, TodoStore};

pub fn app() -> Router {
    app_with_store(TodoStore::seeded().shared())
}

pub fn app_with_store(db: Db) -> Router {
    with_middleware(routes()).with_state(db)
}

fn routes() -> Router<Db> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
}

fn with_middleware(router: Router<Db>) -> Router<Db> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serves `app()` until `shutdown` resolves, then drains in-flight requests.
pub async fn run_with_shutdown<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
