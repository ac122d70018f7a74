/// Task model and owner-scoped database operations
///
/// Tasks are the core entity of Taskdeck. Every task belongs to exactly one
/// user, and every read, update, delete, and toggle filters by both task id
/// and owner id. A task belonging to someone else is indistinguishable from a
/// task that does not exist: callers get `None`, never a permission error.
///
/// # State Machine
///
/// ```text
/// create → active (is_completed = false)
/// toggle_completion flips active ↔ completed
/// delete removes the row from either state
/// update changes title/description only
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description VARCHAR(500),
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{NewTask, Task, TaskFilter};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(
///     &pool,
///     owner,
///     NewTask {
///         title: "Buy milk".to_string(),
///         description: None,
///     },
/// )
/// .await?;
///
/// let page = Task::list(&pool, owner, TaskFilter::default()).await?;
/// assert!(page.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Largest page size `list` will return
pub const MAX_PAGE_SIZE: i64 = 100;

/// Task record owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Owning user; ownership never changes
    pub user_id: Uuid,

    /// Title, non-empty, at most 200 characters
    pub title: String,

    /// Optional description, at most 500 characters
    pub description: Option<String>,

    /// Completion flag, false on creation
    pub is_completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last written
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// Title and description are expected to be validated (trimmed, length
/// checked) before reaching the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for updating a task
///
/// Only fields set to `Some` are overwritten; `None` fields keep their
/// current value. The description carries the stored value in the inner
/// option, so `Some(None)` clears it to NULL.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description; `Some(None)` clears the stored one
    pub description: Option<Option<String>>,
}

/// Filter and pagination for `Task::list`
#[derive(Debug, Clone)]
pub struct TaskFilter {
    /// When set, only tasks whose completion flag matches
    pub is_completed: Option<bool>,

    /// Page size, clamped to 1..=100
    pub limit: i64,

    /// Rows to skip, clamped to >= 0
    pub offset: i64,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            is_completed: None,
            limit: MAX_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl TaskFilter {
    /// Clamps limit into 1..=100 and offset to non-negative
    pub fn clamped(self) -> Self {
        Self {
            is_completed: self.is_completed,
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.max(0),
        }
    }
}

impl Task {
    /// Creates a task for `owner` with completion unset
    ///
    /// Timestamps are assigned by the database.
    pub async fn create(pool: &PgPool, owner: Uuid, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, is_completed, created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks owned by `owner`, newest first
    ///
    /// Optionally filtered by completion flag and paginated. The filter is
    /// clamped before use, so out-of-range limit/offset never error.
    pub async fn list(
        pool: &PgPool,
        owner: Uuid,
        filter: TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let filter = filter.clamped();

        let tasks = match filter.is_completed {
            Some(is_completed) => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, user_id, title, description, is_completed, created_at, updated_at
                    FROM tasks
                    WHERE user_id = $1 AND is_completed = $2
                    ORDER BY created_at DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(owner)
                .bind(is_completed)
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, user_id, title, description, is_completed, created_at, updated_at
                    FROM tasks
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(owner)
                .bind(filter.limit)
                .bind(filter.offset)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tasks)
    }

    /// Finds a task by id, scoped to `owner`
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// user.
    pub async fn find(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, is_completed, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Updates title and/or description, scoped to `owner`
    ///
    /// Only `Some` fields are written; a description of `Some(None)` writes
    /// NULL. `updated_at` is refreshed on any successful write. Returns
    /// `None` under the same ownership rule as `find`.
    pub async fn update(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Nothing to write; still report whether the task is visible
        if data.title.is_none() && data.description.is_none() {
            return Self::find(pool, owner, id).await;
        }

        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, title, description, is_completed, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task, scoped to `owner`
    ///
    /// # Returns
    ///
    /// True if a row was removed; false when the task does not exist or
    /// belongs to another user, including repeated deletes of the same id
    pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flips the completion flag, scoped to `owner`
    ///
    /// Refreshes `updated_at`. Returns `None` under the same ownership rule
    /// as `find`.
    pub async fn toggle_completion(
        pool: &PgPool,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = NOT is_completed, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, is_completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}
