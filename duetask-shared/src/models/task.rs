/// Task model and database operations
///
/// This module provides the Task model representing the to-do items users
/// manage from the home page. Tasks are the core entity of the DueTask system.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     title TEXT NOT NULL,
///     category TEXT,
///     priority task_priority NOT NULL,
///     due_date DATE,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use duetask_shared::models::task::{Task, CreateTask, TaskPriority};
/// use duetask_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id,
///     title: "Renew car insurance".to_string(),
///     category: Some("Payments".to_string()),
///     priority: TaskPriority::High,
///     due_date: Some("2026-09-01".parse()?),
/// }).await?;
///
/// // Mark it done
/// Task::complete(&pool, task.id, user_id).await?;
/// # Ok(())
/// # }
/// ```

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Can slip without consequence
    Low,

    /// The default middle ground
    Medium,

    /// Needs attention before anything else
    High,
}

impl TaskPriority {
    /// All priority levels, in ascending order of urgency
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    /// Converts the priority to its database/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Error returned when a priority string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for TaskPriority {
    type Err = ParsePriorityError;

    /// Parses a priority level, ignoring case
    ///
    /// Form submissions send capitalized labels ("High") while the API and
    /// database use lowercase, so both spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Task model representing a single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (BIGSERIAL)
    pub id: i64,

    /// User who owns the task
    pub user_id: i64,

    /// Short description of what needs doing
    pub title: String,

    /// Optional grouping label (e.g., "Personal", "Work")
    pub category: Option<String>,

    /// Priority level
    pub priority: TaskPriority,

    /// Optional due date (no time component)
    pub due_date: Option<NaiveDate>,

    /// Whether the task has been marked done
    ///
    /// Completion is one-way; there is no un-complete operation
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user ID
    pub user_id: i64,

    /// Task title
    pub title: String,

    /// Optional category label
    pub category: Option<String>,

    /// Priority level
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

/// Escapes LIKE/ILIKE metacharacters in a user-supplied search term
///
/// `%` and `_` are wildcards inside a LIKE pattern, and `\` is the escape
/// character. Escaping them keeps the search a literal substring match.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Task {
    /// Creates a new task for a user
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Task creation data
    ///
    /// # Returns
    ///
    /// The newly created task with generated ID and timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use duetask_shared::models::task::{Task, CreateTask, TaskPriority};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    /// let task = Task::create(&pool, CreateTask {
    ///     user_id,
    ///     title: "Submit assignment".to_string(),
    ///     category: Some("Study".to_string()),
    ///     priority: TaskPriority::Medium,
    ///     due_date: None,
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, category, priority, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, category, priority, due_date, completed, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.category)
        .bind(data.priority)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, oldest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, category, priority, due_date, completed, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Searches a user's tasks by title substring, ignoring case
    ///
    /// The term is escaped before being wrapped in `%...%`, so wildcard
    /// characters in user input match literally.
    pub async fn search_by_title(
        pool: &PgPool,
        user_id: i64,
        term: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, category, priority, due_date, completed, created_at
            FROM tasks
            WHERE user_id = $1 AND title ILIKE $2
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Marks a task completed
    ///
    /// Filters on both the task ID and the owning user ID, so a user cannot
    /// complete another user's task. Completing an already-completed task
    /// succeeds and returns the task unchanged.
    ///
    /// # Returns
    ///
    /// The task if it exists and belongs to the user, None otherwise
    pub async fn complete(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, category, priority, due_date, completed, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Filters on both the task ID and the owning user ID. Deleting a task
    /// that doesn't exist (or belongs to someone else) is a no-op.
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false otherwise
    pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every task due on the given date, across all users
    ///
    /// Used by the reminder service. Completed tasks are included on purpose:
    /// a reminder still goes out even if the task was finished early.
    pub async fn list_due_on(pool: &PgPool, date: NaiveDate) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, category, priority, due_date, completed, created_at
            FROM tasks
            WHERE due_date = $1
            ORDER BY id ASC
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_priority_from_str_is_case_insensitive() {
        assert_eq!("high".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!("High".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!("MEDIUM".parse::<TaskPriority>(), Ok(TaskPriority::Medium));
        assert_eq!("low".parse::<TaskPriority>(), Ok(TaskPriority::Low));
    }

    #[test]
    fn test_priority_from_str_rejects_unknown() {
        let err = "urgent".parse::<TaskPriority>().unwrap_err();
        assert_eq!(err, ParsePriorityError("urgent".to_string()));
        assert_eq!(err.to_string(), "unrecognized priority: urgent");
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&TaskPriority::High).unwrap();
        assert_eq!(json, "\"high\"");

        let parsed: TaskPriority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, TaskPriority::Medium);
    }

    #[test]
    fn test_escape_like_passes_plain_terms_through() {
        assert_eq!(escape_like("groceries"), "groceries");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_create_task_struct() {
        let create = CreateTask {
            user_id: 1,
            title: "Water the plants".to_string(),
            category: None,
            priority: TaskPriority::Low,
            due_date: None,
        };

        assert_eq!(create.title, "Water the plants");
        assert!(create.category.is_none());
    }

    // Integration tests for database operations are in tests/models_tests.rs
}
