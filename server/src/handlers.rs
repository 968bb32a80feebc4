use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use todo_store::Todo;

use crate::{error::ApiError, Db, Message};

#[derive(Serialize)]
struct TodoMessage<'a> {
    message: &'a str,
    todo: &'a Todo,
}

/// `axum::extract::Path` whose rejection is an `ApiError`, so undecodable
/// segments still get a `{message}` body.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Path(value))
    }
}

/// Serialize `body` up front so a failure surfaces as a logged 500 with the
/// standard message instead of axum's plain-text fallback. Bytes keep the
/// struct's field order.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let json = serde_json::to_vec(body).map_err(ApiError::internal)?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], json).into_response())
}

/// Bodies are parsed regardless of `Content-Type`; an empty body is malformed.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn list_todos(
    State(db): State<Db>,
    Path(user): Path<String>,
) -> Result<Response, ApiError> {
    let store = db.read().await;
    json_response(StatusCode::OK, &store.list_todos(&user)?)
}

pub async fn get_todo(
    State(db): State<Db>,
    Path((user, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let store = db.read().await;
    json_response(StatusCode::OK, store.get_todo(&user, &id)?)
}

pub async fn create_todo(
    State(db): State<Db>,
    Path(user): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = parse_body(&body)?;
    let todo = db.write().await.create_todo(&user, &body)?;
    json_response(
        StatusCode::CREATED,
        &TodoMessage {
            message: "Todo created",
            todo: &todo,
        },
    )
}

pub async fn update_todo(
    State(db): State<Db>,
    Path((user, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = parse_body(&body)?;
    let todo = db.write().await.update_todo(&user, &id, &body)?;
    json_response(
        StatusCode::OK,
        &TodoMessage {
            message: "Todo updated",
            todo: &todo,
        },
    )
}

pub async fn delete_todo(
    State(db): State<Db>,
    Path((user, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    db.write().await.delete_todo(&user, &id)?;
    json_response(
        StatusCode::OK,
        &Message {
            message: "Todo deleted successfully",
        },
    )
}

pub async fn delete_all_todos(
    State(db): State<Db>,
    Path(user): Path<String>,
) -> Result<Response, ApiError> {
    db.write().await.delete_all_todos(&user)?;
    json_response(
        StatusCode::OK,
        &Message {
            message: "All todos deleted successfully",
        },
    )
}

pub async fn not_found() -> (StatusCode, Json<Message<'static>>) {
    (StatusCode::NOT_FOUND, Json(Message { message: "Not found" }))
}

pub async fn method_not_allowed() -> (StatusCode, Json<Message<'static>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Message {
            message: "Method not allowed",
        }),
    )
}
