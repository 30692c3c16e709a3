//! Todo model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single task, owned by exactly one user.
///
/// Stored in the `todos` collection with the document ID equal to `id`.
/// `user_id` is indexed for owner-scoped queries and is immutable after
/// creation, as is `id` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned opaque ID (also the document ID)
    pub id: String,
    /// Owning user's Firebase UID
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Intended completion time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Importance level (1-5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; always >= created_at
    pub updated_at: DateTime<Utc>,
    /// Linked external calendar event, set only by the calendar-sync
    /// collaborator. This service carries the field but never writes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_event_id: Option<String>,
}

/// Fields accepted when creating a todo.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 5, message = "priority must be between 1 and 5"))]
    pub priority: Option<i32>,
}

/// Partial update to a todo. Absent fields are left unchanged.
/// `id`, `user_id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 5, message = "priority must be between 1 and 5"))]
    pub priority: Option<i32>,
    /// Completed -> incomplete is allowed; there is no terminal state.
    pub completed: Option<bool>,
}
