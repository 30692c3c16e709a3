// SPDX-License-Identifier: MIT

//! Owner-scoped todo operations.
//!
//! All operations take the authenticated caller's UID and enforce
//! ownership before anything about a document's existence is revealed:
//! a todo owned by another user is reported exactly like a missing one.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{NewTodo, Todo, TodoPatch};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use validator::Validate;

/// Sort key accepted by the list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoSort {
    /// Due date ascending, todos without a due date last,
    /// ties broken by creation time ascending.
    #[default]
    DueDate,
    /// Creation time ascending.
    CreatedAt,
}

impl TodoSort {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "dueDate" => Ok(Self::DueDate),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(AppError::Validation(format!(
                "unknown sort '{other}': expected 'dueDate' or 'createdAt'"
            ))),
        }
    }
}

/// Filter for the list operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub sort: TodoSort,
}

/// Entity access layer for todos.
#[derive(Clone)]
pub struct TodoService {
    db: FirestoreDb,
}

impl TodoService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Create a todo for the caller. The server assigns the ID and
    /// timestamps; new todos always start incomplete.
    pub async fn create(&self, uid: &str, new: NewTodo) -> Result<Todo> {
        validate_title(&new.title)?;
        new.validate().map_err(validation_error)?;

        let now = Utc::now();
        let todo = Todo {
            id: uuid::Uuid::new_v4().simple().to_string(),
            user_id: uid.to_string(),
            title: new.title.trim().to_string(),
            description: new.description,
            due_date: new.due_date,
            priority: new.priority,
            completed: false,
            created_at: now,
            updated_at: now,
            calendar_event_id: None,
        };

        self.db.set_todo(&todo).await?;

        tracing::info!(uid, todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// Get one of the caller's todos.
    pub async fn get(&self, uid: &str, id: &str) -> Result<Todo> {
        self.get_owned(uid, id).await
    }

    /// List the caller's todos, filtered and ordered.
    pub async fn list(&self, uid: &str, filter: TodoFilter) -> Result<Vec<Todo>> {
        let mut todos = self.db.get_todos_for_user(uid, filter.completed).await?;
        sort_todos(&mut todos, filter.sort);
        Ok(todos)
    }

    /// Apply a partial update to one of the caller's todos.
    pub async fn update(&self, uid: &str, id: &str, patch: TodoPatch) -> Result<Todo> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        patch.validate().map_err(validation_error)?;

        let mut todo = self.get_owned(uid, id).await?;
        apply_patch(&mut todo, patch, Utc::now());
        self.db.set_todo(&todo).await?;

        Ok(todo)
    }

    /// Delete one of the caller's todos.
    pub async fn delete(&self, uid: &str, id: &str) -> Result<()> {
        // Ownership check before deletion; same NotFound as get.
        self.get_owned(uid, id).await?;
        self.db.delete_todo(id).await?;

        tracing::info!(uid, todo_id = id, "Deleted todo");
        Ok(())
    }

    /// Fetch a todo and verify ownership. Cross-user access is reported
    /// as NotFound so existence is never leaked across users.
    async fn get_owned(&self, uid: &str, id: &str) -> Result<Todo> {
        match self.db.get_todo(id).await? {
            Some(todo) if todo.user_id == uid => Ok(todo),
            _ => Err(AppError::NotFound(format!("Todo {} not found", id))),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    AppError::Validation(errors.to_string())
}

/// Apply a patch in place. `id`, `user_id` and `created_at` are never
/// touched; `updated_at` is always refreshed.
fn apply_patch(todo: &mut Todo, patch: TodoPatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
        todo.title = title.trim().to_string();
    }
    if let Some(description) = patch.description {
        todo.description = Some(description);
    }
    if let Some(due_date) = patch.due_date {
        todo.due_date = Some(due_date);
    }
    if let Some(priority) = patch.priority {
        todo.priority = Some(priority);
    }
    if let Some(completed) = patch.completed {
        todo.completed = completed;
    }
    todo.updated_at = now;
}

/// Sort todos for listing. Missing due dates sort last.
fn sort_todos(todos: &mut [Todo], sort: TodoSort) {
    match sort {
        TodoSort::DueDate => todos.sort_by(|a, b| match (&a.due_date, &b.due_date) {
            (Some(x), Some(y)) => x.cmp(y).then_with(|| a.created_at.cmp(&b.created_at)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.created_at.cmp(&b.created_at),
        }),
        TodoSort::CreatedAt => todos.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}
