//! REST endpoints for todos.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::store::TodoStore;
use crate::todos::model::{NewTodo, Todo};
use crate::todos::query::{ListParams, TodoQuery};
use crate::todos::validate;

/// Shared state for todo routes.
#[derive(Clone)]
pub struct TodoRouteState {
    pub store: Arc<dyn TodoStore>,
}

/// GET /api/todos/{id}
///
/// Returns the single todo, 400 on a malformed id, 404 when absent.
async fn get_todo(
    State(state): State<TodoRouteState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let oid = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidIdentifier)?;
    match state.store.find_by_id(oid).await? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /api/todos
///
/// Lists todos matching the query parameters. Filter and sort apply to the
/// full set; the limit trims last.
async fn list_todos(
    State(state): State<TodoRouteState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let query = TodoQuery::from_params(&params)?;
    let todos = state.store.find(&query).await?;
    Ok(Json(todos))
}

/// POST /api/todos
///
/// Validates the payload in full, persists it, and returns the generated id.
async fn add_todo(
    State(state): State<TodoRouteState>,
    Json(new): Json<NewTodo>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let draft = validate::validate(new)?;
    let id = state.store.insert(draft).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Build the todo REST routes.
pub fn todo_routes(state: TodoRouteState) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(add_todo))
        .route("/api/todos/{id}", get(get_todo))
        .with_state(state)
}
