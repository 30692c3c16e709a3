// SPDX-License-Identifier: MIT

//! Todo CRUD routes. All handlers are owner-scoped by the verified
//! identity attached by the auth middleware.

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoPatch};
use crate::routes::extract::{Json, Query};
use crate::services::firebase_auth::VerifiedUser;
use crate::services::todos::{TodoFilter, TodoSort};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

/// Create a todo. The server assigns id and timestamps.
async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Json(new): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>)> {
    let todo = state.todos.create(&user.uid, new).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[derive(Deserialize)]
struct ListQuery {
    completed: Option<bool>,
    sort: Option<String>,
}

/// List the caller's todos, due date ascending with undated items last.
async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>> {
    let sort = params
        .sort
        .as_deref()
        .map(TodoSort::parse)
        .transpose()?
        .unwrap_or_default();

    let filter = TodoFilter {
        completed: params.completed,
        sort,
    };

    tracing::debug!(
        uid = %user.uid,
        completed = ?params.completed,
        sort = ?sort,
        "Listing todos"
    );

    let todos = state.todos.list(&user.uid, filter).await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Path(id): Path<String>,
) -> Result<Json<Todo>> {
    let todo = state.todos.get(&user.uid, &id).await?;
    Ok(Json(todo))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>> {
    let todo = state.todos.update(&user.uid, &id, patch).await?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.todos.delete(&user.uid, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
