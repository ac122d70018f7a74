/// Task CRUD endpoints
///
/// All endpoints require a bearer token; the middleware-resolved caller
/// scopes every query. A task owned by someone else answers 404, identical to
/// a task that does not exist.
///
/// # Endpoints
///
/// - `POST   /api/tasks` - create
/// - `GET    /api/tasks` - list with filter + pagination
/// - `GET    /api/tasks/:id` - fetch one
/// - `PUT    /api/tasks/:id` - update title/description
/// - `DELETE /api/tasks/:id` - delete
/// - `PATCH  /api/tasks/:id/complete` - toggle completion
use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::task::{NewTask, Task, TaskFilter, UpdateTask};
use uuid::Uuid;
use validator::Validate;

/// Create request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Update request; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Query parameters for the list endpoint
///
/// Out-of-range values are rejected, not clamped.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListTasksQuery {
    /// When set, only tasks whose completion flag matches
    pub is_completed: Option<bool>,

    /// Page size, 1..=100, default 100
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,

    /// Rows to skip, default 0
    #[validate(range(min = 0, message = "Offset must be non-negative"))]
    pub offset: Option<i64>,
}

/// List response
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// One page of tasks, newest first
    pub tasks: Vec<Task>,

    /// Count of the returned page, not the total matching rows
    pub total: usize,
}

/// Trims a title and rejects empty results
///
/// Create and update share this rule: a title that is empty after trimming is
/// a domain-level bad request.
fn clean_title(title: &str) -> Result<String, ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trims a description, mapping whitespace-only to None
fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Trims a replacement description for update
///
/// A provided description always overwrites the stored one; empty after
/// trimming means clear it.
fn clean_replacement_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Create a task for the authenticated user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: title/description over length bounds
/// - `400 Bad Request`: title empty after trimming
/// - `401 Unauthorized`: missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let title = clean_title(&req.title)?;
    let description = clean_description(req.description);

    let task = Task::create(&state.db, user.id, NewTask { title, description }).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the authenticated user's tasks, newest first
///
/// Supports `is_completed`, `limit` (1..=100, default 100), and `offset`
/// query parameters. `total` in the response is the size of the returned
/// page.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: limit outside 1..=100 or negative offset
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    query.validate()?;

    let filter = TaskFilter {
        is_completed: query.is_completed,
        limit: query.limit.unwrap_or(TaskFilter::default().limit),
        offset: query.offset.unwrap_or(0),
    };

    let tasks = Task::list(&state.db, user.id, filter).await?;
    let total = tasks.len();

    Ok(Json(TaskListResponse { tasks, total }))
}

/// Fetch a single task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find(&state.db, user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Update a task's title and/or description
///
/// Fields omitted from the body keep their current value; a provided
/// description overwrites the stored one, with empty-after-trim clearing it.
/// `updated_at` is refreshed on any successful write.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: fields over length bounds
/// - `400 Bad Request`: provided title empty after trimming
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let title = req.title.as_deref().map(clean_title).transpose()?;
    let description = req.description.as_deref().map(clean_replacement_description);

    let task = Task::update(&state.db, user.id, id, UpdateTask { title, description })
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// Deleting an already-deleted id answers 404, so repeated deletes are safe
/// but visible.
///
/// # Errors
///
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, user.id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a task's completion flag
///
/// # Errors
///
/// - `404 Not Found`: no task with this id owned by the caller
pub async fn toggle_task_completion(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::toggle_completion(&state.db, user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_trims() {
        assert_eq!(clean_title("  Buy milk  ").unwrap(), "Buy milk");
    }

    #[test]
    fn test_clean_title_rejects_empty() {
        assert!(clean_title("").is_err());
        assert!(clean_title("   ").is_err());
        assert!(clean_title("\t\n").is_err());
    }

    #[test]
    fn test_clean_description_empty_becomes_none() {
        assert_eq!(clean_description(None), None);
        assert_eq!(clean_description(Some("   ".to_string())), None);
        assert_eq!(
            clean_description(Some("  details  ".to_string())),
            Some("details".to_string())
        );
    }

    #[test]
    fn test_replacement_description_empty_clears() {
        assert_eq!(clean_replacement_description(""), None);
        assert_eq!(clean_replacement_description("   "), None);
        assert_eq!(
            clean_replacement_description("  details  "),
            Some("details".to_string())
        );

        // Provided-but-empty must reach the store as an explicit clear,
        // distinct from an omitted field
        let provided: Option<String> = Some("  ".to_string());
        assert_eq!(
            provided.as_deref().map(clean_replacement_description),
            Some(None)
        );
        let omitted: Option<String> = None;
        assert_eq!(omitted.as_deref().map(clean_replacement_description), None);
    }

    #[test]
    fn test_list_query_rejects_out_of_range() {
        let ok = ListTasksQuery {
            is_completed: None,
            limit: Some(100),
            offset: Some(0),
        };
        assert!(ok.validate().is_ok());
        assert!(ListTasksQuery::default().validate().is_ok());

        let zero_limit = ListTasksQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(zero_limit.validate().is_err());

        let over_limit = ListTasksQuery {
            limit: Some(101),
            ..Default::default()
        };
        assert!(over_limit.validate().is_err());

        let negative_offset = ListTasksQuery {
            offset: Some(-5),
            ..Default::default()
        };
        assert!(negative_offset.validate().is_err());
    }

    #[test]
    fn test_description_length_bound() {
        let at_cap = CreateTaskRequest {
            title: "ok".to_string(),
            description: Some("d".repeat(500)),
        };
        assert!(at_cap.validate().is_ok());

        let over_cap = CreateTaskRequest {
            title: "ok".to_string(),
            description: Some("d".repeat(501)),
        };
        assert!(over_cap.validate().is_err());

        let over_cap_update = UpdateTaskRequest {
            title: None,
            description: Some("d".repeat(501)),
        };
        assert!(over_cap_update.validate().is_err());
    }
}
