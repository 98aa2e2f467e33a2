/// Task endpoints
///
/// This module provides the task list plus add, search, complete, and delete
/// operations. Every handler runs behind the session middleware and scopes
/// its queries to the authenticated user, so one user can never see or touch
/// another user's tasks.
///
/// # Endpoints
///
/// - `GET /home` - List the user's tasks
/// - `GET /add` - Add-task form
/// - `POST /add` - Create a task
/// - `POST /tasks/search` - Case-insensitive title search
/// - `POST /update/:task_id` - Mark a task complete
/// - `POST /delete/:task_id` - Delete a task

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult, ValidationErrorDetail},
    forms::empty_string_as_none,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use duetask_shared::models::task::{CreateTask, Task, TaskPriority};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Suggested categories offered by the add-task form
///
/// Category is free text in the data model; this list only feeds the form's
/// dropdown.
const CATEGORIES: &[&str] = &["Personal", "Study", "Work", "Food", "Payments"];

/// One task as shown in the list views
#[derive(Debug, Serialize)]
pub struct TaskItem {
    /// Task ID
    pub id: i64,

    /// Title
    pub title: String,

    /// Category, if one was chosen
    pub category: Option<String>,

    /// Priority
    pub priority: TaskPriority,

    /// Due date, if one was set
    pub due_date: Option<NaiveDate>,

    /// Whether the task has been completed
    pub completed: bool,

    /// Created at
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskItem {
    fn from(task: Task) -> Self {
        TaskItem {
            id: task.id,
            title: task.title,
            category: task.category,
            priority: task.priority,
            due_date: task.due_date,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// The user's tasks, oldest first
    pub tasks: Vec<TaskItem>,
}

/// Add-task form descriptor
#[derive(Debug, Serialize)]
pub struct AddTaskFormResponse {
    /// Valid priority labels
    pub priorities: Vec<&'static str>,

    /// Suggested categories
    pub categories: &'static [&'static str],
}

/// Add-task request
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskRequest {
    /// Title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Category; an empty selection is stored as no category
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,

    /// Priority label; parsed case-insensitively
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(required(message = "Priority is required"))]
    pub priority: Option<TaskPriority>,

    /// Due date in ISO format (what `<input type="date">` submits)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub due_date: Option<NaiveDate>,
}

/// Search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Substring to match against titles; empty means "show everything"
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search_term: Option<String>,
}

/// Task list
///
/// # Endpoint
///
/// ```text
/// GET /home
/// Cookie: duetask_session=<token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "tasks": [
///     {
///       "id": 1,
///       "title": "Buy groceries",
///       "category": "Food",
///       "priority": "medium",
///       "due_date": "2025-07-19",
///       "completed": false,
///       "created_at": "2025-07-12T09:30:00Z"
///     }
///   ]
/// }
/// ```
pub async fn home(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_user(&state.db, current.user.id).await?;

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(TaskItem::from).collect(),
    }))
}

/// Add-task form
///
/// # Endpoint
///
/// ```text
/// GET /add
/// ```
pub async fn add_form() -> Json<AddTaskFormResponse> {
    Json(AddTaskFormResponse {
        priorities: TaskPriority::ALL.iter().map(|p| p.as_str()).collect(),
        categories: CATEGORIES,
    })
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /add
/// Content-Type: application/x-www-form-urlencoded
///
/// title=Buy+groceries&category=Food&priority=Medium&due_date=2025-07-19
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Empty title or missing priority
/// - `500 Internal Server Error`: Server error
pub async fn add_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(req): Form<AddTaskRequest>,
) -> ApiResult<Redirect> {
    req.validate()?;

    let priority = req.priority.ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "priority".to_string(),
            message: "Priority is required".to_string(),
        }])
    })?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: current.user.id,
            title: req.title,
            category: req.category,
            priority,
            due_date: req.due_date,
        },
    )
    .await?;

    tracing::debug!(task_id = task.id, user_id = current.user.id, "Task created");

    Ok(Redirect::to("/home"))
}

/// Search tasks by title
///
/// Matches the search term as a case-insensitive substring of the title. An
/// empty or missing term returns the full list, which lets the search form
/// double as a reset.
///
/// # Endpoint
///
/// ```text
/// POST /tasks/search
/// Content-Type: application/x-www-form-urlencoded
///
/// search_term=groc
/// ```
pub async fn search_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(req): Form<SearchRequest>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = match req.search_term.as_deref() {
        Some(term) => Task::search_by_title(&state.db, current.user.id, term).await?,
        None => Task::list_by_user(&state.db, current.user.id).await?,
    };

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(TaskItem::from).collect(),
    }))
}

/// Mark a task complete
///
/// Completion is one-way and idempotent; completing an already-completed
/// task succeeds and changes nothing.
///
/// # Endpoint
///
/// ```text
/// POST /update/:task_id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task for this user (including tasks owned by
///   someone else)
/// - `500 Internal Server Error`: Server error
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_id): Path<i64>,
) -> ApiResult<Redirect> {
    let task = Task::complete(&state.db, task_id, current.user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::debug!(task_id = task.id, user_id = current.user.id, "Task completed");

    Ok(Redirect::to("/home"))
}

/// Delete a task
///
/// Deleting a task that does not exist, or that belongs to another user, is
/// a silent no-op; the browser is redirected back to the list either way.
///
/// # Endpoint
///
/// ```text
/// POST /delete/:task_id
/// ```
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_id): Path<i64>,
) -> ApiResult<Redirect> {
    let deleted = Task::delete(&state.db, task_id, current.user.id).await?;
    if deleted {
        tracing::debug!(task_id, user_id = current.user.id, "Task deleted");
    }

    Ok(Redirect::to("/home"))
}
