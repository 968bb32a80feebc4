//! HTTP front end for the per-user todo store.
//!
//! # Design
//! The router owns one `TodoStore` behind a `tokio::sync::RwLock`. Reads
//! share the lock; every mutation holds the write lock across validation
//! and the change itself, so concurrent requests for the same user never
//! interleave.

use std::{future::Future, sync::Arc};

use axum::{middleware, routing::get, Router};
use serde::Serialize;
use todo_store::TodoStore;
use tokio::{net::TcpListener, sync::RwLock};

pub mod config;
pub mod error;
mod handlers;
pub mod telemetry;

pub use config::{Config, ConfigError, LogFormat};
pub use error::ApiError;

pub type Db = Arc<RwLock<TodoStore>>;

/// `{"message": ...}` body shared by success and error responses.
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub message: &'a str,
}

/// Router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(Db::default())
}

/// Router over a caller-provided store, e.g. to inspect state in tests.
pub fn app_with_store(db: Db) -> Router {
    Router::new()
        .route(
            "/{user}/todos",
            get(handlers::list_todos)
                .post(handlers::create_todo)
                .delete(handlers::delete_all_todos),
        )
        .route(
            "/{user}/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(middleware::from_fn(telemetry::log_requests))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Like `run`, but stops accepting connections once `shutdown` resolves and
/// waits for in-flight requests.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}
