//! Todo endpoints
//!
//! Each handler opens its own connection through [`TodoRepo::open`] and
//! closes it before responding.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Todo, TodoRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, TodoId};
use crate::http::server::AppState;
use crate::models::{
    Frequency, NewTodo, Patch, Status, TodoChanges, TodoTitle, ValidationError,
};

/// Create todo request
///
/// `title` and `frequency` are optional here only so that their absence
/// can be reported as a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub frequency: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "goalDate")]
    pub goal_date_camel: Option<String>,
    pub goal_date: Option<String>,
}

impl CreateTodoRequest {
    /// Validate and apply defaults.
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        let (Some(title), Some(frequency)) = (self.title, self.frequency) else {
            return Err(ValidationError::Missing {
                fields: "title and frequency",
            });
        };

        let title = TodoTitle::new(&title)?;
        let frequency = frequency.parse::<Frequency>()?;
        let status = self
            .status
            .map(|s| s.parse::<Status>())
            .transpose()?
            .unwrap_or_default();

        Ok(NewTodo {
            title,
            description: self.description.unwrap_or_default(),
            frequency,
            status,
            goal_date: self.goal_date_camel.or(self.goal_date),
        })
    }
}

/// Update todo request: every field is optional and tri-state.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub frequency: Patch<String>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default, rename = "goalDate")]
    pub goal_date_camel: Patch<String>,
    #[serde(default)]
    pub goal_date: Patch<String>,
}

impl UpdateTodoRequest {
    /// Validate every provided field; any failure rejects the whole update.
    pub fn validate(self) -> Result<TodoChanges, ValidationError> {
        let changes = TodoChanges {
            title: required(self.title, "title", TodoTitle::new)?,
            description: self.description.into_option(),
            frequency: required(self.frequency, "frequency", |s| s.parse())?,
            status: required(self.status, "status", |s| s.parse())?,
            goal_date: self
                .goal_date_camel
                .first_non_null(self.goal_date)
                .into_option(),
        };

        if changes.is_empty() {
            return Err(ValidationError::NoFields);
        }

        Ok(changes)
    }
}

/// A field that may be omitted but never nulled.
fn required<T>(
    patch: Patch<String>,
    field: &'static str,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, ValidationError> {
    match patch {
        Patch::Unset => Ok(None),
        Patch::Null => Err(ValidationError::Null { field }),
        Patch::Value(v) => parse(&v).map(Some),
    }
}

/// Todo response
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub status: Status,
    pub goal_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            frequency: t.frequency,
            status: t.status,
            goal_date: t.goal_date,
            created_at: t.created_at.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: t.updated_at.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/todos - list all todos, newest first
async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let mut repo = TodoRepo::open(&state.store).await?;
    let todos = repo.list().await?;
    repo.close().await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// GET /api/todos/{id} - get a single todo
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut repo = TodoRepo::open(&state.store).await?;
    let todo = repo.get(id).await?;
    repo.close().await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// POST /api/todos - create a new todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let new_todo = req.validate()?;

    let mut repo = TodoRepo::open(&state.store).await?;
    let todo = repo.create(&new_todo).await?;
    repo.close().await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// PUT /api/todos/{id} - partially update a todo
///
/// The body is decoded lazily so that an unknown id is reported as
/// not found whatever the body contains.
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    body: Result<JsonBody<UpdateTodoRequest>, ApiError>,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut repo = TodoRepo::open(&state.store).await?;
    repo.get(id).await?;

    let JsonBody(req) = body?;
    let changes = req.validate()?;

    let todo = repo.update(id, &changes).await?;
    repo.close().await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// DELETE /api/todos/{id} - delete a todo
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut repo = TodoRepo::open(&state.store).await?;
    repo.delete(id).await?;
    repo.close().await?;

    Ok(Json(DeleteResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
